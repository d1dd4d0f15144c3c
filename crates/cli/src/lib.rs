//! Terminal output for CookBuddy
//!
//! Provides shared CLI functionality:
//! - Status messages and error reports
//! - Recipe cards
//! - Spinners for network lookups

#![warn(missing_docs)]

pub mod card;
pub mod output;
pub mod progress;

pub use card::{print_card, render_card};
pub use output::{format_count, format_score, Status};
