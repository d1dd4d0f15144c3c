//! Typo-tolerant recipe lookup for CookBuddy.
//!
//! This crate provides:
//! - Optimal string alignment (Levenshtein + transposition) distance
//! - Best-window alignment for prefix and infix matches
//! - Relevance scoring with a configurable similarity threshold
//! - A read-only fuzzy index with deterministic tie-breaks
//!
//! The engine is pure: no I/O, no interior mutability, no background work.
//!
//! # Example
//!
//! ```
//! use cookbuddy_search::{FuzzyIndex, Record};
//!
//! let index = FuzzyIndex::build(vec![
//!     Record::new("Idli").with_attribute("Rice", "2 cups"),
//!     Record::new("Masala Dosa"),
//!     Record::new("Sambar"),
//! ]);
//!
//! let best = index.search("iddly").unwrap();
//! assert_eq!(best.record.name, "Idli");
//! assert!(index.search("zzzzzzz").is_none());
//! ```

mod error;
mod fuzzy;
mod index;
mod relevance;

pub use error::{Result, SearchError, SearchErrorCode};
pub use fuzzy::{best_window, osa_distance, Window};
pub use index::{FuzzyIndex, MatchResult, SearchConfig, DEFAULT_THRESHOLD};
pub use relevance::{
    calculate_relevance, similarity, MatchKind, Relevance, LOCATION_WEIGHT, PARTIAL_WEIGHT,
};

use serde::{Deserialize, Serialize};

/// One labelled value attached to a record, e.g. an ingredient and its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Label, e.g. "Urad dal"
    pub label: String,
    /// Value, e.g. "1 cup"
    pub value: String,
}

impl Attribute {
    /// Creates a new attribute.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A named catalog entry. Only the name is searched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Display name
    pub name: String,
    /// Ordered attributes
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Record {
    /// Creates a record without attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Appends an attribute.
    #[must_use]
    pub fn with_attribute(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(label, value));
        self
    }
}
