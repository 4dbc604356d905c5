use crate::csv_io::CsvError;
use csv::{ReaderBuilder, Trim};
use indexmap::IndexMap;

/// Rows of an uploaded file keyed by header name, plus the header itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<IndexMap<String, String>>,
}

/// Parses CSV bytes into column maps.
///
/// The first record is the header. Header names and values are trimmed and a
/// leading byte-order mark is dropped. Short records simply lack the trailing
/// columns; cells beyond the header are ignored. Blank lines are skipped.
pub fn parse_rows(bytes: &[u8]) -> Result<ParsedCsv, CsvError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(CsvError::Read)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(CsvError::Read)?;
        let row: IndexMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(ParsedCsv { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_headers_and_values() {
        let csv = "\u{feff} Topic ,SubTopic,Industry,Classification\n AI , ML ,Tech,safe\n";
        let parsed = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(
            parsed.headers,
            vec!["Topic", "SubTopic", "Industry", "Classification"]
        );
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0]["Topic"], "AI");
        assert_eq!(parsed.rows[0]["SubTopic"], "ML");
    }

    #[test]
    fn handles_quoted_cells() {
        let csv = "Topic,SubTopic,Industry,Classification\n\"AI, applied\",\"say \"\"hi\"\"\",Tech,safe\n";
        let parsed = parse_rows(csv.as_bytes()).unwrap();
        assert_eq!(parsed.rows[0]["Topic"], "AI, applied");
        assert_eq!(parsed.rows[0]["SubTopic"], "say \"hi\"");
    }

    #[test]
    fn short_records_lack_trailing_columns() {
        let csv = "Topic,SubTopic,Industry,Classification\nAI,ML\n";
        let parsed = parse_rows(csv.as_bytes()).unwrap();
        let row = &parsed.rows[0];
        assert_eq!(row.len(), 2);
        assert!(!row.contains_key("Industry"));
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let parsed = parse_rows(b"Topic,SubTopic,Industry,Classification\n").unwrap();
        assert_eq!(parsed.headers.len(), 4);
        assert!(parsed.rows.is_empty());
    }

    #[test]
    fn rejects_invalid_utf8() {
        let bytes = b"Topic,SubTopic\n\xff\xfe,ML\n";
        assert!(matches!(parse_rows(bytes), Err(CsvError::Read(_))));
    }
}
