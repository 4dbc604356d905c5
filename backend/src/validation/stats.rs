use crate::validation::key::CombinationKey;
use common::model::csv::{ClassificationRow, StringsRow};
use common::model::validation::ValidationStats;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Counts combinations used by the strings data and how many of them the
/// classifications cover.
pub fn validation_stats(
    strings: &[StringsRow],
    classifications: &[ClassificationRow],
) -> ValidationStats {
    let mut occurrences: IndexMap<CombinationKey, usize> = IndexMap::new();
    for row in strings {
        *occurrences.entry(CombinationKey::from(row)).or_insert(0) += 1;
    }

    let known: HashSet<CombinationKey> = classifications.iter().map(CombinationKey::from).collect();
    let valid = occurrences.keys().filter(|key| known.contains(*key)).count();
    let duplicate_rows = occurrences.values().map(|count| count.saturating_sub(1)).sum();

    ValidationStats {
        total_combinations: strings.len(),
        unique_combinations: occurrences.len(),
        valid_combinations: valid,
        invalid_combinations: occurrences.len() - valid,
        duplicate_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_excess_occurrences_as_duplicates() {
        let strings = vec![
            StringsRow::new("1", "Tech", "AI", "ML"),
            StringsRow::new("2", "tech", "ai", "ml"),
            StringsRow::new("3", "Finance", "Blockchain", "DeFi"),
        ];
        let reference = vec![
            ClassificationRow::new("AI", "ML", "Tech", "safe"),
            ClassificationRow::new("Blockchain", "DeFi", "Finance", "risky"),
        ];
        let stats = validation_stats(&strings, &reference);
        assert_eq!(
            stats,
            ValidationStats {
                total_combinations: 3,
                unique_combinations: 2,
                valid_combinations: 2,
                invalid_combinations: 0,
                duplicate_rows: 1,
            }
        );
    }

    #[test]
    fn duplicates_are_excess_rows_not_repeated_keys() {
        let strings = vec![
            StringsRow::new("1", "Tech", "AI", "ML"),
            StringsRow::new("1", "Tech", "AI", "ML"),
            StringsRow::new("1", "Tech", "AI", "ML"),
            StringsRow::new("1", "Tech", "AI", "Vision"),
        ];
        let reference = vec![ClassificationRow::new("AI", "ML", "Tech", "safe")];
        let stats = validation_stats(&strings, &reference);
        assert_eq!(stats.duplicate_rows, 2);
        assert_eq!(stats.unique_combinations, 2);
        assert_eq!(stats.valid_combinations, 1);
        assert_eq!(stats.invalid_combinations, 1);
    }

    #[test]
    fn empty_strings_give_zeroes() {
        assert_eq!(validation_stats(&[], &[]), ValidationStats::default());
    }
}
