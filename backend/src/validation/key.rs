use common::model::csv::{ClassificationRow, StringsRow};
use std::fmt;

/// Normalized `topic|subtopic|industry` join key between the two datasets.
///
/// Each component is trimmed and lowercased, so case and surrounding
/// whitespace never influence matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CombinationKey(String);

impl CombinationKey {
    pub fn new(topic: &str, subtopic: &str, industry: &str) -> Self {
        Self(format!(
            "{}|{}|{}",
            normalize(topic),
            normalize(subtopic),
            normalize(industry)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

fn normalize(component: &str) -> String {
    component.trim().to_lowercase()
}

impl fmt::Display for CombinationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&StringsRow> for CombinationKey {
    fn from(row: &StringsRow) -> Self {
        CombinationKey::new(row.topic(), row.subtopic(), row.industry())
    }
}

impl From<&ClassificationRow> for CombinationKey {
    fn from(row: &ClassificationRow) -> Self {
        CombinationKey::new(row.topic(), row.sub_topic(), row.industry())
    }
}
