//! Recipe catalog parsing.
//!
//! Two record shapes are accepted and may be mixed in one file:
//!
//! ```json
//! [
//!   { "name": "Idli", "ingredients": ["Rice", "Urad dal"], "quantities": ["2 cups", "1 cup"] },
//!   { "name": "Rasam", "attributes": [{ "label": "Tamarind", "value": "1 lemon-sized ball" }] }
//! ]
//! ```
//!
//! A record with a missing or null name is rejected. Empty names load but
//! can never be matched.

use crate::error::{CatalogError, Result};
use cookbuddy_search::{Attribute, Record};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    quantities: Vec<String>,
    #[serde(default)]
    attributes: Option<Vec<Attribute>>,
}

impl RawRecord {
    fn into_record(self, index: usize) -> Result<Record> {
        let name = self.name.ok_or(CatalogError::MissingName { index })?;

        // Explicit attributes win over the parallel lists
        if let Some(attributes) = self.attributes {
            return Ok(Record { name, attributes });
        }

        if self.ingredients.len() != self.quantities.len() {
            return Err(CatalogError::MismatchedAttributes {
                name,
                labels: self.ingredients.len(),
                values: self.quantities.len(),
            });
        }

        let attributes = self
            .ingredients
            .into_iter()
            .zip(self.quantities)
            .map(|(label, value)| Attribute { label, value })
            .collect();

        Ok(Record { name, attributes })
    }
}

/// Summary of a loaded catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CatalogStats {
    /// Number of records
    pub records: usize,
    /// Total attribute pairs across all records
    pub attributes: usize,
    /// Records whose name is empty
    pub empty_names: usize,
}

impl CatalogStats {
    /// Computes statistics for a catalog.
    pub fn of(catalog: &[Record]) -> Self {
        catalog.iter().fold(Self::default(), |mut stats, record| {
            stats.records += 1;
            stats.attributes += record.attributes.len();
            if record.name.trim().is_empty() {
                stats.empty_names += 1;
            }
            stats
        })
    }
}

/// Parse a catalog from a JSON string.
///
/// # Arguments
/// * `json` - JSON array of records
///
/// # Returns
/// Records in file order
pub fn parse_catalog(json: &str) -> Result<Vec<Record>> {
    let raw: Vec<RawRecord> = serde_json::from_str(json)?;

    let catalog = raw
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_record(index))
        .collect::<Result<Vec<Record>>>()?;

    for (index, record) in catalog.iter().enumerate() {
        if record.name.trim().is_empty() {
            warn!(index, "Recipe has an empty name and can never match");
        }
    }

    Ok(catalog)
}

/// Load a catalog from a JSON file.
///
/// # Arguments
/// * `path` - Path to the recipes file
///
/// # Returns
/// Records in file order
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog(&content)?;
    let stats = CatalogStats::of(&catalog);
    debug!(
        path = %path.display(),
        records = stats.records,
        attributes = stats.attributes,
        "Loaded recipe catalog"
    );

    Ok(catalog)
}
