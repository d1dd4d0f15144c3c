//! Recipe catalog loading for CookBuddy.
//!
//! Reads the static recipe collection into the ordered `Record` list the
//! search engine indexes. The engine itself never touches the filesystem.
//!
//! # Example
//!
//! ```
//! use cookbuddy_catalog::parse_catalog;
//!
//! let catalog = parse_catalog(
//!     r#"[{"name": "Idli", "ingredients": ["Rice"], "quantities": ["2 cups"]}]"#,
//! ).unwrap();
//! assert_eq!(catalog[0].attributes[0].value, "2 cups");
//! ```

mod error;
mod loader;

pub use error::{CatalogError, CatalogErrorCode, Result};
pub use loader::{load_catalog, parse_catalog, CatalogStats};
