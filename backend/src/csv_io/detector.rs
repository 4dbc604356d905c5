use common::model::csv::{ClassificationRow, CsvRow, FileType, StringsRow};

/// Decides the dataset type from a header set.
///
/// A header carrying every strings column is a strings file, even if it also
/// carries every classifications column. `None` means the structure is not
/// recognised.
pub fn detect_file_type<S: AsRef<str>>(headers: &[S]) -> Option<FileType> {
    let has_all = |columns: &[&str]| {
        columns
            .iter()
            .all(|column| headers.iter().any(|h| h.as_ref() == *column))
    };

    if has_all(StringsRow::COLUMNS) {
        Some(FileType::Strings)
    } else if has_all(ClassificationRow::COLUMNS) {
        Some(FileType::Classifications)
    } else {
        None
    }
}
