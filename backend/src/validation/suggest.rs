use common::model::csv::ClassificationRow;
use indexmap::IndexMap;

/// Proposes a classification for a combination the reference data lacks.
///
/// Candidates are the classifications rows sharing either the industry or
/// the topic (case-insensitive, untrimmed). The most frequent label among
/// them wins; on a tie the label seen first wins. This is a hint, not a
/// resolution.
pub fn suggest_classification(
    topic: &str,
    industry: &str,
    classifications: &[ClassificationRow],
) -> Option<String> {
    let topic = topic.to_lowercase();
    let industry = industry.to_lowercase();

    let mut tally: IndexMap<&str, usize> = IndexMap::new();
    for row in classifications {
        if row.industry().to_lowercase() == industry || row.topic().to_lowercase() == topic {
            *tally.entry(row.classification()).or_insert(0) += 1;
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (label, count) in tally {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> Vec<ClassificationRow> {
        vec![
            ClassificationRow::new("AI", "ML", "Tech", "safe"),
            ClassificationRow::new("AI", "Vision", "Health", "review"),
            ClassificationRow::new("Cloud", "Storage", "Tech", "safe"),
            ClassificationRow::new("Blockchain", "DeFi", "Finance", "risky"),
        ]
    }

    #[test]
    fn picks_most_frequent_label_among_candidates() {
        // Tech rows: safe, safe; AI rows: safe, review.
        let suggestion = suggest_classification("AI", "tech", &reference());
        assert_eq!(suggestion.as_deref(), Some("safe"));
    }

    #[test]
    fn topic_or_industry_is_enough() {
        let suggestion = suggest_classification("blockchain", "Retail", &reference());
        assert_eq!(suggestion.as_deref(), Some("risky"));
    }

    #[test]
    fn no_candidates_means_no_suggestion() {
        assert_eq!(suggest_classification("Quantum", "Retail", &reference()), None);
        assert_eq!(suggest_classification("AI", "Tech", &[]), None);
    }

    #[test]
    fn first_seen_label_wins_a_tie() {
        let reference = vec![
            ClassificationRow::new("AI", "ML", "Tech", "review"),
            ClassificationRow::new("AI", "Vision", "Tech", "safe"),
        ];
        assert_eq!(
            suggest_classification("AI", "Tech", &reference).as_deref(),
            Some("review")
        );
    }
}
