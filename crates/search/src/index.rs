//! Fuzzy index over a catalog of records.
//!
//! The index is built once and never mutated, so a single instance can be
//! shared across threads and queried concurrently without locking.

use crate::error::{Result, SearchError};
use crate::relevance::{relevance_chars, MatchKind, Relevance};
use crate::Record;
use serde::{Deserialize, Serialize};

/// Default minimum similarity for a candidate to count as a match.
///
/// Equivalent to allowing 40% of the characters to differ.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    threshold: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD }
    }
}

impl SearchConfig {
    /// Creates a configuration with the given similarity threshold.
    ///
    /// The threshold must lie in `(0, 1]`.
    pub fn new(threshold: f64) -> Result<Self> {
        if threshold > 0.0 && threshold <= 1.0 {
            Ok(Self { threshold })
        } else {
            Err(SearchError::InvalidThreshold(threshold))
        }
    }

    /// Minimum score a candidate needs to be returned.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// A record that matched a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The matched record
    pub record: Record,
    /// Position of the record in the catalog
    pub position: usize,
    /// Similarity in `[0, 1]`
    pub score: f64,
    /// 0 for the best match
    pub rank: usize,
    /// How the name matched
    pub kind: MatchKind,
}

#[derive(Debug, Clone)]
struct Entry {
    name: Vec<char>,
    record: Record,
}

/// Searchable, read-only view of a catalog.
#[derive(Debug, Clone)]
pub struct FuzzyIndex {
    entries: Vec<Entry>,
    config: SearchConfig,
}

impl FuzzyIndex {
    /// Builds an index with the default threshold.
    ///
    /// Records keep their catalog order; names are neither validated nor
    /// deduplicated. Names are matched trimmed, so a blank name can never
    /// match.
    pub fn build(catalog: Vec<Record>) -> Self {
        Self::with_config(catalog, SearchConfig::default())
    }

    /// Builds an index with a custom configuration.
    pub fn with_config(catalog: Vec<Record>, config: SearchConfig) -> Self {
        let entries: Vec<Entry> = catalog
            .into_iter()
            .map(|record| Entry {
                name: record.name.trim().to_lowercase().chars().collect(),
                record,
            })
            .collect();

        tracing::debug!(
            records = entries.len(),
            threshold = config.threshold,
            "Built fuzzy index"
        );

        Self { entries, config }
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the catalog was empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Active configuration.
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Record at a catalog position.
    pub fn get(&self, position: usize) -> Option<&Record> {
        self.entries.get(position).map(|entry| &entry.record)
    }

    /// Iterates over the records in catalog order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entries.iter().map(|entry| &entry.record)
    }

    /// Finds the single best match for a query.
    ///
    /// Returns `None` for a blank query, an empty catalog, or when no name
    /// reaches the threshold. Equal scores resolve to the record that comes
    /// first in the catalog.
    pub fn search(&self, query: &str) -> Option<MatchResult> {
        let query = normalize_query(query)?;

        let mut best: Option<(usize, Relevance)> = None;
        for (position, relevance) in self.survivors(&query) {
            match best {
                Some((_, current)) if relevance.score <= current.score => {}
                _ => best = Some((position, relevance)),
            }
        }

        tracing::trace!(
            query = %query.iter().collect::<String>(),
            position = ?best.map(|(position, _)| position),
            "Fuzzy search"
        );

        best.map(|(position, relevance)| self.to_result(position, relevance, 0))
    }

    /// Returns every match above the threshold, best first.
    ///
    /// Results are ordered by score, then by catalog position. A `limit` of
    /// 0 returns all of them.
    pub fn search_ranked(&self, query: &str, limit: usize) -> Vec<MatchResult> {
        let Some(query) = normalize_query(query) else {
            return Vec::new();
        };

        let mut survivors: Vec<(usize, Relevance)> = self.survivors(&query).collect();
        survivors.sort_by(|a, b| {
            b.1.score
                .total_cmp(&a.1.score)
                .then_with(|| a.0.cmp(&b.0))
        });

        if limit > 0 {
            survivors.truncate(limit);
        }

        survivors
            .into_iter()
            .enumerate()
            .map(|(rank, (position, relevance))| self.to_result(position, relevance, rank))
            .collect()
    }

    fn survivors<'a>(
        &'a self,
        query: &'a [char],
    ) -> impl Iterator<Item = (usize, Relevance)> + 'a {
        let threshold = self.config.threshold;
        self.entries
            .iter()
            .enumerate()
            .map(move |(position, entry)| (position, relevance_chars(query, &entry.name)))
            .filter(move |(_, relevance)| relevance.score >= threshold)
    }

    fn to_result(&self, position: usize, relevance: Relevance, rank: usize) -> MatchResult {
        MatchResult {
            record: self.entries[position].record.clone(),
            position,
            score: relevance.score,
            rank,
            kind: relevance.kind,
        }
    }
}

/// Trims and lower-cases a query; `None` if nothing is left.
fn normalize_query(query: &str) -> Option<Vec<char>> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase().chars().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DISHES: &[&str] = &[
        "Idli",
        "Dosa",
        "Masala Dosa",
        "Sambar",
        "Rasam",
        "Medu Vada",
        "Pongal",
        "Upma",
        "Uttapam",
        "Appam",
        "Puttu",
        "Avial",
        "Bisi Bele Bath",
        "Lemon Rice",
        "Curd Rice",
        "Payasam",
        "Kesari",
    ];

    fn index_of(names: &[&str]) -> FuzzyIndex {
        FuzzyIndex::build(names.iter().map(|name| Record::new(*name)).collect())
    }

    fn best_name(index: &FuzzyIndex, query: &str) -> Option<String> {
        index.search(query).map(|result| result.record.name)
    }

    #[test]
    fn test_exact_match_scores_one() {
        let index = index_of(DISHES);
        for (position, name) in DISHES.iter().enumerate() {
            let result = index.search(name).unwrap();
            assert_eq!(result.position, position);
            assert_eq!(result.score, 1.0);
            assert_eq!(result.rank, 0);
            assert_eq!(result.kind, MatchKind::Exact);
        }
    }

    #[test]
    fn test_case_insensitive() {
        let index = index_of(DISHES);
        let upper = index.search("IDLI").unwrap();
        let lower = index.search("idli").unwrap();
        let title = index.search("Idli").unwrap();

        assert_eq!(upper.record.name, "Idli");
        assert_eq!(upper, lower);
        assert_eq!(lower, title);
    }

    #[test]
    fn test_single_typo_substitution() {
        let index = index_of(DISHES);
        assert_eq!(best_name(&index, "Pongel").as_deref(), Some("Pongal"));
        assert_eq!(best_name(&index, "Dosu").as_deref(), Some("Dosa"));
        assert_eq!(best_name(&index, "Zambar").as_deref(), Some("Sambar"));
    }

    #[test]
    fn test_single_typo_insertion() {
        let index = index_of(DISHES);
        assert_eq!(best_name(&index, "Idlli").as_deref(), Some("Idli"));
        assert_eq!(best_name(&index, "Sambhar").as_deref(), Some("Sambar"));
        assert_eq!(best_name(&index, "Rassam").as_deref(), Some("Rasam"));
    }

    #[test]
    fn test_single_typo_deletion() {
        let index = index_of(DISHES);
        assert_eq!(best_name(&index, "Upm").as_deref(), Some("Upma"));
        assert_eq!(best_name(&index, "Sambr").as_deref(), Some("Sambar"));
        assert_eq!(best_name(&index, "Kesri").as_deref(), Some("Kesari"));
    }

    #[test]
    fn test_transposition() {
        let index = index_of(DISHES);
        assert_eq!(best_name(&index, "Pognal").as_deref(), Some("Pongal"));
    }

    #[test]
    fn test_iddly_finds_idli() {
        let index = index_of(DISHES);
        let result = index.search("iddly").unwrap();
        assert_eq!(result.record.name, "Idli");
        assert_eq!(result.kind, MatchKind::Fuzzy);
    }

    #[test]
    fn test_short_name_boundary() {
        let index = index_of(&["Ada", "Ab"]);

        // One substitution in three chars keeps 2/3 similarity.
        let result = index.search("Adx").unwrap();
        assert_eq!(result.record.name, "Ada");
        assert!((result.score - 2.0 / 3.0).abs() < 1e-9);

        // One substitution in two chars drops to 0.5.
        assert!(index.search("Ax").is_none());
    }

    #[test]
    fn test_empty_query_is_no_match() {
        let index = index_of(DISHES);
        assert!(index.search("").is_none());
        assert!(index.search("   ").is_none());
        assert!(index.search_ranked("\t\n", 0).is_empty());
    }

    #[test]
    fn test_empty_catalog_is_no_match() {
        let index = FuzzyIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(index.search("idli").is_none());
        assert!(index.search_ranked("idli", 0).is_empty());
    }

    #[test]
    fn test_unrelated_query_is_excluded() {
        let index = index_of(DISHES);
        assert!(index.search("zzzzzzz").is_none());
        assert!(index.search_ranked("zzzzzzz", 0).is_empty());
    }

    #[test]
    fn test_query_is_trimmed() {
        let index = index_of(DISHES);
        let result = index.search("  rasam \n").unwrap();
        assert_eq!(result.record.name, "Rasam");
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_duplicate_names_prefer_first() {
        let catalog = vec![
            Record::new("Sambar").with_attribute("Toor dal", "1 cup"),
            Record::new("Rasam"),
            Record::new("Sambar").with_attribute("Moong dal", "1 cup"),
        ];
        let index = FuzzyIndex::build(catalog);

        for _ in 0..10 {
            let result = index.search("sambar").unwrap();
            assert_eq!(result.position, 0);
            assert_eq!(result.record.attributes[0].label, "Toor dal");
        }
    }

    #[test]
    fn test_exact_beats_earlier_partial() {
        let index = index_of(&["Kidli-Variant", "Idli"]);
        let result = index.search("idli").unwrap();
        assert_eq!(result.record.name, "Idli");
        assert_eq!(result.position, 1);
    }

    #[test]
    fn test_prefix_beats_earlier_infix() {
        let index = index_of(&["Kidli", "Idlis"]);
        let result = index.search("idli").unwrap();
        assert_eq!(result.record.name, "Idlis");
        assert_eq!(result.kind, MatchKind::Prefix);
    }

    #[test]
    fn test_exact_beats_containing_name() {
        let index = index_of(&["Masala Dosa", "Dosa"]);
        assert_eq!(best_name(&index, "dosa").as_deref(), Some("Dosa"));
        assert_eq!(best_name(&index, "masala").as_deref(), Some("Masala Dosa"));
    }

    #[test]
    fn test_search_ranked_order() {
        let index = index_of(&["Masala Dosa", "Rasam", "Dosa", "Rava Dosa"]);
        let results = index.search_ranked("dosa", 0);

        let names: Vec<&str> = results.iter().map(|r| r.record.name.as_str()).collect();
        assert_eq!(names, vec!["Dosa", "Rava Dosa", "Masala Dosa"]);
        for (rank, result) in results.iter().enumerate() {
            assert_eq!(result.rank, rank);
        }
        assert_eq!(results[0], index.search("dosa").unwrap());
    }

    #[test]
    fn test_search_ranked_limit() {
        let index = index_of(&["Masala Dosa", "Dosa", "Rava Dosa"]);
        let results = index.search_ranked("dosa", 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].record.name, "Dosa");
    }

    #[test]
    fn test_custom_threshold() {
        let strict = FuzzyIndex::with_config(
            vec![Record::new("Sambar")],
            SearchConfig::new(0.9).unwrap(),
        );
        assert!(strict.search("Sambr").is_none());
        assert!(strict.search("Sambar").is_some());

        let loose = FuzzyIndex::with_config(
            vec![Record::new("Sambar")],
            SearchConfig::new(0.4).unwrap(),
        );
        assert!(loose.search("Zanbr").is_some());
    }

    #[test]
    fn test_invalid_threshold() {
        assert_eq!(SearchConfig::new(0.0), Err(SearchError::InvalidThreshold(0.0)));
        assert!(SearchConfig::new(1.5).is_err());
        assert!(SearchConfig::new(f64::NAN).is_err());
        assert!(SearchConfig::new(1.0).is_ok());
    }

    #[test]
    fn test_padded_name_is_exact() {
        let index = index_of(&["Sambar", " Idli "]);
        for query in [" Idli ", "idli", "Idli  "] {
            let result = index.search(query).unwrap();
            assert_eq!(result.position, 1);
            assert_eq!(result.score, 1.0);
            assert_eq!(result.kind, MatchKind::Exact);
            assert_eq!(result.record.name, " Idli ");
        }
    }

    #[test]
    fn test_blank_name_is_unmatchable() {
        let index = index_of(&["   ", "Upma"]);
        assert_eq!(index.search("a").unwrap().position, 1);
        assert_eq!(best_name(&index, "upma").as_deref(), Some("Upma"));
    }

    #[test]
    fn test_empty_name_is_unmatchable() {
        let index = index_of(&["", "Upma"]);
        assert_eq!(index.len(), 2);
        assert_eq!(best_name(&index, "upma").as_deref(), Some("Upma"));
        assert!(index.search("x").is_none());
    }

    #[test]
    fn test_records_keep_catalog_order() {
        let index = index_of(&["Rasam", "Idli", "Rasam"]);
        let names: Vec<&str> = index.records().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Rasam", "Idli", "Rasam"]);
        assert_eq!(index.get(1).map(|r| r.name.as_str()), Some("Idli"));
        assert!(index.get(3).is_none());
    }

    #[test]
    fn test_index_is_shareable_across_threads() {
        let index = std::sync::Arc::new(index_of(DISHES));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let index = index.clone();
                std::thread::spawn(move || index.search("Avail").map(|r| r.position))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(11));
        }
    }

    fn name_strategy() -> impl Strategy<Value = String> {
        "[a-z]{4,12}"
    }

    proptest! {
        #[test]
        fn prop_scores_are_bounded(query in "[a-z ]{0,12}", name in "[a-z ]{0,16}") {
            let index = FuzzyIndex::with_config(
                vec![Record::new(name)],
                SearchConfig::new(f64::MIN_POSITIVE).unwrap(),
            );
            if let Some(result) = index.search(&query) {
                prop_assert!(result.score > 0.0 && result.score <= 1.0);
            }
        }

        #[test]
        fn prop_exact_name_scores_one(names in prop::collection::vec(name_strategy(), 1..8)) {
            let index = FuzzyIndex::build(names.iter().map(|n| Record::new(n.as_str())).collect());
            for name in &names {
                let result = index.search(name).unwrap();
                prop_assert_eq!(result.score, 1.0);
                prop_assert_eq!(&result.record.name, name);
            }
        }

        #[test]
        fn prop_single_substitution_still_matches(name in name_strategy(), at in 0usize..12) {
            let mut chars: Vec<char> = name.chars().collect();
            let at = at % chars.len();
            chars[at] = if chars[at] == 'q' { 'x' } else { 'q' };
            let typo: String = chars.into_iter().collect();

            let index = FuzzyIndex::build(vec![Record::new(name.as_str())]);
            let result = index.search(&typo);
            prop_assert!(result.is_some());
            prop_assert!(result.unwrap().score >= 0.75);
        }

        #[test]
        fn prop_search_is_deterministic(
            names in prop::collection::vec(name_strategy(), 0..8),
            query in "[a-z]{1,8}",
        ) {
            let index = FuzzyIndex::build(names.iter().map(|n| Record::new(n.as_str())).collect());
            let first = index.search(&query);
            let second = index.search(&query);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_ranked_results_are_sorted(
            names in prop::collection::vec(name_strategy(), 0..10),
            query in "[a-z]{1,6}",
        ) {
            let index = FuzzyIndex::build(names.iter().map(|n| Record::new(n.as_str())).collect());
            let results = index.search_ranked(&query, 0);
            for pair in results.windows(2) {
                prop_assert!(
                    pair[0].score > pair[1].score
                        || (pair[0].score == pair[1].score && pair[0].position < pair[1].position)
                );
            }
            prop_assert_eq!(results.first().cloned(), index.search(&query));
        }
    }
}
