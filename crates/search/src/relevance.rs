//! Relevance scoring for search results.

use crate::fuzzy::{best_window_chars, osa_distance_chars};
use serde::{Deserialize, Serialize};

/// Ceiling for a match that covers only part of the candidate.
///
/// Kept below 1.0 so an exact name always outranks a name that merely
/// contains the query.
pub const PARTIAL_WEIGHT: f64 = 0.9;

/// Penalty applied to a partial match, scaled by how far into the
/// candidate the matching window starts.
pub const LOCATION_WEIGHT: f64 = 0.1;

/// How a candidate matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// No plausible relation
    None,
    /// Query occurs inside the candidate, possibly with typos
    Infix,
    /// Query occurs at the start of the candidate, possibly with typos
    Prefix,
    /// Whole candidate within a few edits of the query
    Fuzzy,
    /// Identical after case folding
    Exact,
}

impl MatchKind {
    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            MatchKind::None => "none",
            MatchKind::Infix => "infix",
            MatchKind::Prefix => "prefix",
            MatchKind::Fuzzy => "fuzzy",
            MatchKind::Exact => "exact",
        }
    }
}

/// Similarity of a candidate to a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Relevance {
    /// Similarity in `[0, 1]`, 1.0 being an exact match
    pub score: f64,
    /// Which scoring path produced `score`
    pub kind: MatchKind,
}

impl Relevance {
    /// Relevance of an unrelated candidate.
    pub const NONE: Relevance = Relevance { score: 0.0, kind: MatchKind::None };
}

/// Calculate relevance of a candidate against a query.
///
/// Both sides are lower-cased before comparison. The score is the better of:
///
/// - the whole-name score `1 - d / max(len(query), len(candidate))`, with
///   `d` the optimal string alignment distance;
/// - when the query is shorter than the candidate, the best window score
///   `(1 - w / len(query)) * PARTIAL_WEIGHT - LOCATION_WEIGHT * start / len(candidate)`,
///   with `w` the distance to the closest substring starting at `start`.
///
/// # Arguments
/// * `query` - The search query
/// * `candidate` - The text to score
///
/// # Returns
/// Relevance with a score in `[0, 1]`; an empty query scores zero
pub fn calculate_relevance(query: &str, candidate: &str) -> Relevance {
    let query: Vec<char> = query.to_lowercase().chars().collect();
    let candidate: Vec<char> = candidate.to_lowercase().chars().collect();
    relevance_chars(&query, &candidate)
}

/// Similarity score of a candidate against a query.
///
/// Shorthand for `calculate_relevance(query, candidate).score`.
///
/// # Example
/// ```
/// use cookbuddy_search::similarity;
///
/// assert_eq!(similarity("Idli", "idli"), 1.0);
/// assert!(similarity("sambr", "Sambar") > similarity("zanbr", "Sambar"));
/// ```
pub fn similarity(query: &str, candidate: &str) -> f64 {
    calculate_relevance(query, candidate).score
}

/// Relevance over already lower-cased chars.
pub(crate) fn relevance_chars(query: &[char], candidate: &[char]) -> Relevance {
    if query.is_empty() {
        return Relevance::NONE;
    }

    let longest = query.len().max(candidate.len());
    let distance = osa_distance_chars(query, candidate);
    let whole = Relevance {
        score: longest.saturating_sub(distance) as f64 / longest as f64,
        kind: if distance == 0 { MatchKind::Exact } else { MatchKind::Fuzzy },
    };

    if query.len() >= candidate.len() {
        return settle(whole);
    }

    let window = best_window_chars(query, candidate);
    let coverage = query.len().saturating_sub(window.distance) as f64 / query.len() as f64;
    let offset = window.start as f64 / candidate.len() as f64;
    let partial = Relevance {
        score: (coverage * PARTIAL_WEIGHT - LOCATION_WEIGHT * offset).max(0.0),
        kind: if window.start == 0 { MatchKind::Prefix } else { MatchKind::Infix },
    };

    if partial.score > whole.score {
        settle(partial)
    } else {
        settle(whole)
    }
}

fn settle(relevance: Relevance) -> Relevance {
    if relevance.score <= 0.0 {
        Relevance::NONE
    } else {
        Relevance {
            score: relevance.score.min(1.0),
            kind: relevance.kind,
        }
    }
}
