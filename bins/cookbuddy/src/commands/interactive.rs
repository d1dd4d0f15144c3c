//! `cookbuddy interactive`
//!
//! One query per line; each line is matched on its own, like a search box
//! that re-runs on every keystroke.

use super::search::print_best_for;
use crate::app::App;
use anyhow::{Context, Result};
use cookbuddy_core::error::exit_codes;
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};

/// Read queries from stdin until EOF or `:q`
pub fn run(app: &App) -> Result<i32> {
    let prompt = console::user_attended();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    if prompt {
        println!(
            "{} recipes loaded. Type a dish name, or {} to quit.",
            app.index.len(),
            ":q".bold()
        );
    }

    loop {
        if prompt {
            print!("{} ", "›".cyan());
            io::stdout().flush().context("Failed to flush stdout")?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;
        let query = line.trim();

        if query == ":q" {
            break;
        }
        if query.is_empty() {
            continue;
        }

        print_best_for(app, query);
        println!();
    }

    Ok(exit_codes::SUCCESS)
}
