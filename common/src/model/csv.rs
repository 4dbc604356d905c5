use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two dataset shapes the service knows about.
///
/// The type of an uploaded file is always decided from its header structure
/// (see `backend::csv_io::detect_file_type`), never from the upload field name or
/// the original filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// The primary dataset: prompt strings tagged with a Topic/Subtopic/Industry.
    Strings,
    /// The reference dataset: allowed combinations and their classification label.
    Classifications,
}

impl FileType {
    pub const ALL: [FileType; 2] = [FileType::Strings, FileType::Classifications];

    pub fn as_str(self) -> &'static str {
        match self {
            FileType::Strings => "strings",
            FileType::Classifications => "classifications",
        }
    }

    /// Name used for a dataset that was never uploaded under a real filename.
    pub fn default_filename(self) -> &'static str {
        match self {
            FileType::Strings => "strings.csv",
            FileType::Classifications => "classifications.csv",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a path segment or query value is not a known file type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFileType(pub String);

impl fmt::Display for UnknownFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown file type '{}'", self.0)
    }
}

impl std::error::Error for UnknownFileType {}

impl FromStr for FileType {
    type Err = UnknownFileType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strings" => Ok(FileType::Strings),
            "classifications" => Ok(FileType::Classifications),
            other => Err(UnknownFileType(other.to_string())),
        }
    }
}

/// Common behaviour of both row shapes.
///
/// Rows keep every known column as an `Option` so that "column absent" and
/// "column present but blank" stay distinguishable, which the structural
/// validator relies on. Any column outside the known set is carried through
/// untouched in an ordered side map so exports round-trip.
pub trait CsvRow:
    Clone + fmt::Debug + PartialEq + From<IndexMap<String, String>> + Into<IndexMap<String, String>>
{
    const FILE_TYPE: FileType;
    /// Every column a well-formed file of this type must carry, in canonical order.
    const COLUMNS: &'static [&'static str];
    /// Columns whose values must be non-blank on every row.
    const REQUIRED_VALUES: &'static [&'static str];

    /// Value of a column, known or extra. `None` when the column is absent.
    fn field(&self, column: &str) -> Option<&str>;

    /// Names of the columns present on this row, known columns first.
    fn column_names(&self) -> Vec<String>;
}

/// A row of the "strings" dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<String, String>",
    into = "IndexMap<String, String>"
)]
pub struct StringsRow {
    pub tier: Option<String>,
    pub industry: Option<String>,
    pub topic: Option<String>,
    pub subtopic: Option<String>,
    pub prefix: Option<String>,
    pub fuzzing_idx: Option<String>,
    pub prompt: Option<String>,
    pub risks: Option<String>,
    pub keywords: Option<String>,
    /// Columns outside the known set, in the order they were read.
    pub extra: IndexMap<String, String>,
}

impl StringsRow {
    /// A row with every known column present. Columns other than the four
    /// that make up its identity are left blank.
    pub fn new(tier: &str, industry: &str, topic: &str, subtopic: &str) -> Self {
        Self {
            tier: Some(tier.to_string()),
            industry: Some(industry.to_string()),
            topic: Some(topic.to_string()),
            subtopic: Some(subtopic.to_string()),
            prefix: Some(String::new()),
            fuzzing_idx: Some(String::new()),
            prompt: Some(String::new()),
            risks: Some(String::new()),
            keywords: Some(String::new()),
            extra: IndexMap::new(),
        }
    }

    pub fn tier(&self) -> &str {
        self.tier.as_deref().unwrap_or_default()
    }

    pub fn industry(&self) -> &str {
        self.industry.as_deref().unwrap_or_default()
    }

    pub fn topic(&self) -> &str {
        self.topic.as_deref().unwrap_or_default()
    }

    pub fn subtopic(&self) -> &str {
        self.subtopic.as_deref().unwrap_or_default()
    }

    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or_default()
    }
}

impl From<IndexMap<String, String>> for StringsRow {
    fn from(fields: IndexMap<String, String>) -> Self {
        let mut row = StringsRow::default();
        for (column, value) in fields {
            match column.as_str() {
                "Tier" => row.tier = Some(value),
                "Industry" => row.industry = Some(value),
                "Topic" => row.topic = Some(value),
                "Subtopic" => row.subtopic = Some(value),
                "Prefix" => row.prefix = Some(value),
                "Fuzzing-Idx" => row.fuzzing_idx = Some(value),
                "Prompt" => row.prompt = Some(value),
                "Risks" => row.risks = Some(value),
                "Keywords" => row.keywords = Some(value),
                _ => {
                    row.extra.insert(column, value);
                }
            }
        }
        row
    }
}

impl From<StringsRow> for IndexMap<String, String> {
    fn from(row: StringsRow) -> Self {
        let known = [
            ("Tier", row.tier),
            ("Industry", row.industry),
            ("Topic", row.topic),
            ("Subtopic", row.subtopic),
            ("Prefix", row.prefix),
            ("Fuzzing-Idx", row.fuzzing_idx),
            ("Prompt", row.prompt),
            ("Risks", row.risks),
            ("Keywords", row.keywords),
        ];
        let mut fields = IndexMap::with_capacity(known.len() + row.extra.len());
        for (column, value) in known {
            if let Some(value) = value {
                fields.insert(column.to_string(), value);
            }
        }
        fields.extend(row.extra);
        fields
    }
}

impl CsvRow for StringsRow {
    const FILE_TYPE: FileType = FileType::Strings;
    const COLUMNS: &'static [&'static str] = &[
        "Tier",
        "Industry",
        "Topic",
        "Subtopic",
        "Prefix",
        "Fuzzing-Idx",
        "Prompt",
        "Risks",
        "Keywords",
    ];
    // Subtopic is deliberately absent here; only the header check covers it.
    const REQUIRED_VALUES: &'static [&'static str] = &["Tier", "Topic", "Industry"];

    fn field(&self, column: &str) -> Option<&str> {
        let known = match column {
            "Tier" => &self.tier,
            "Industry" => &self.industry,
            "Topic" => &self.topic,
            "Subtopic" => &self.subtopic,
            "Prefix" => &self.prefix,
            "Fuzzing-Idx" => &self.fuzzing_idx,
            "Prompt" => &self.prompt,
            "Risks" => &self.risks,
            "Keywords" => &self.keywords,
            _ => return self.extra.get(column).map(String::as_str),
        };
        known.as_deref()
    }

    fn column_names(&self) -> Vec<String> {
        Self::COLUMNS
            .iter()
            .filter(|column| self.field(column).is_some())
            .map(|column| column.to_string())
            .chain(self.extra.keys().cloned())
            .collect()
    }
}

/// A row of the "classifications" dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<String, String>",
    into = "IndexMap<String, String>"
)]
pub struct ClassificationRow {
    pub topic: Option<String>,
    pub sub_topic: Option<String>,
    pub industry: Option<String>,
    pub classification: Option<String>,
    pub extra: IndexMap<String, String>,
}

impl ClassificationRow {
    pub fn new(topic: &str, sub_topic: &str, industry: &str, classification: &str) -> Self {
        Self {
            topic: Some(topic.to_string()),
            sub_topic: Some(sub_topic.to_string()),
            industry: Some(industry.to_string()),
            classification: Some(classification.to_string()),
            extra: IndexMap::new(),
        }
    }

    pub fn topic(&self) -> &str {
        self.topic.as_deref().unwrap_or_default()
    }

    pub fn sub_topic(&self) -> &str {
        self.sub_topic.as_deref().unwrap_or_default()
    }

    pub fn industry(&self) -> &str {
        self.industry.as_deref().unwrap_or_default()
    }

    pub fn classification(&self) -> &str {
        self.classification.as_deref().unwrap_or_default()
    }
}

impl From<IndexMap<String, String>> for ClassificationRow {
    fn from(fields: IndexMap<String, String>) -> Self {
        let mut row = ClassificationRow::default();
        for (column, value) in fields {
            match column.as_str() {
                "Topic" => row.topic = Some(value),
                "SubTopic" => row.sub_topic = Some(value),
                "Industry" => row.industry = Some(value),
                "Classification" => row.classification = Some(value),
                _ => {
                    row.extra.insert(column, value);
                }
            }
        }
        row
    }
}

impl From<ClassificationRow> for IndexMap<String, String> {
    fn from(row: ClassificationRow) -> Self {
        let known = [
            ("Topic", row.topic),
            ("SubTopic", row.sub_topic),
            ("Industry", row.industry),
            ("Classification", row.classification),
        ];
        let mut fields = IndexMap::with_capacity(known.len() + row.extra.len());
        for (column, value) in known {
            if let Some(value) = value {
                fields.insert(column.to_string(), value);
            }
        }
        fields.extend(row.extra);
        fields
    }
}

impl CsvRow for ClassificationRow {
    const FILE_TYPE: FileType = FileType::Classifications;
    const COLUMNS: &'static [&'static str] = &["Topic", "SubTopic", "Industry", "Classification"];
    const REQUIRED_VALUES: &'static [&'static str] =
        &["Topic", "SubTopic", "Industry", "Classification"];

    fn field(&self, column: &str) -> Option<&str> {
        let known = match column {
            "Topic" => &self.topic,
            "SubTopic" => &self.sub_topic,
            "Industry" => &self.industry,
            "Classification" => &self.classification,
            _ => return self.extra.get(column).map(String::as_str),
        };
        known.as_deref()
    }

    fn column_names(&self) -> Vec<String> {
        Self::COLUMNS
            .iter()
            .filter(|column| self.field(column).is_some())
            .map(|column| column.to_string())
            .chain(self.extra.keys().cloned())
            .collect()
    }
}
