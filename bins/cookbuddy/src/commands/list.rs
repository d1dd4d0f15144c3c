//! `cookbuddy list`

use crate::app::App;
use anyhow::Result;
use cookbuddy_cli::{format_count, Status};
use cookbuddy_core::error::exit_codes;
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Serialize)]
struct ListOutput<'a> {
    catalog: String,
    count: usize,
    recipes: Vec<&'a str>,
}

/// List every recipe name in catalog order
pub fn run(app: &App, json: bool) -> Result<i32> {
    let names: Vec<&str> = app.index.records().map(|r| r.name.as_str()).collect();

    if json {
        let output = ListOutput {
            catalog: app.catalog_path.display().to_string(),
            count: names.len(),
            recipes: names,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(exit_codes::SUCCESS);
    }

    if names.is_empty() {
        Status::warning(&format!("No recipes in {}", app.catalog_path.display()));
        return Ok(exit_codes::SUCCESS);
    }

    Status::header(&format!("Recipes ({})", format_count(names.len(), "dish", "dishes")));
    for (position, name) in names.iter().enumerate() {
        println!("  {:>3}  {}", (position + 1).dimmed(), name);
    }

    Ok(exit_codes::SUCCESS)
}
