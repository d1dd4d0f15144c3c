//! CookBuddy - find South Indian recipes by name, typos welcome

use clap::{Parser, Subcommand};
use cookbuddy_cli::Status;
use cookbuddy_core::Error;
use cookbuddy_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod app;
mod commands;

use app::{App, Overrides};
use commands::search::SearchOptions;

/// Typo-tolerant recipe lookup
#[derive(Parser)]
#[command(name = "cookbuddy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a cookbuddy.toml config file
    #[arg(short, long, global = true, env = "COOKBUDDY_CONFIG")]
    config: Option<String>,

    /// Path to the recipes JSON file (overrides the config)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Minimum similarity in (0, 1] for a match (overrides the config)
    #[arg(short, long, global = true)]
    threshold: Option<f64>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the recipe closest to a dish name
    Search {
        /// Dish name; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// List every match above the threshold, best first
        #[arg(short, long)]
        all: bool,

        /// Look up a cooking video for the best match
        #[arg(long)]
        video: bool,
    },

    /// List every recipe in the catalog
    List {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read dish names from stdin, one per line
    Interactive,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let overrides = Overrides {
        config: cli.config.clone(),
        catalog: cli.catalog.clone(),
        threshold: cli.threshold,
    };

    let json = matches!(
        cli.command,
        Commands::Search { json: true, .. } | Commands::List { json: true }
    );

    let config = match app::load_config(&overrides) {
        Ok(config) => config,
        Err(e) => return fail(&e, json),
    };

    let telemetry = TelemetryConfig::from_level(config.schema.logging.level.clone(), cli.verbose)
        .with_json(json && cli.verbose);
    if let Err(e) = cookbuddy_telemetry::init_with_config(telemetry) {
        Status::warning(&e.to_string());
    }

    let app = match App::load(config, &overrides) {
        Ok(app) => app,
        Err(e) => return fail(&e, json),
    };

    let result = match cli.command {
        Commands::Search {
            query,
            json,
            all,
            video,
        } => {
            let query = query.join(" ");
            commands::search::run(&app, &query, SearchOptions { json, all, video }).await
        }
        Commands::List { json } => commands::list::run(&app, json),
        Commands::Interactive => commands::interactive::run(&app),
    };

    match result {
        Ok(code) => exit(code),
        // Command output may already be on stdout, so these go to stderr only
        Err(e) => match e.downcast_ref::<Error>() {
            Some(err) => fail(err, false),
            None => fail(&Error::internal(format!("{e:#}")), false),
        },
    }
}

/// Report a failure and pick the exit code; JSON mode prints the report on stdout
fn fail(err: &Error, json: bool) -> ExitCode {
    if json {
        match serde_json::to_string_pretty(&err.to_report()) {
            Ok(report) => println!("{report}"),
            Err(_) => Status::report(err),
        }
    } else {
        Status::report(err);
    }
    exit(err.code.exit_code())
}

fn exit(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(2))
}
