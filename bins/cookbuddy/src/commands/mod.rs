//! Subcommand implementations

pub mod interactive;
pub mod list;
pub mod search;
