//! `cookbuddy search`

use crate::app::{media_error, App};
use anyhow::Result;
use cookbuddy_cli::{format_score, print_card, progress, Status};
use cookbuddy_core::error::exit_codes;
use cookbuddy_media::Video;
use cookbuddy_search::MatchResult;
use cookbuddy_telemetry::Timer;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Options for a single search
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    pub json: bool,
    pub all: bool,
    pub video: bool,
}

#[derive(Serialize)]
struct VideoOutput {
    #[serde(flatten)]
    video: Video,
    watch_url: String,
    embed_url: String,
}

impl From<Video> for VideoOutput {
    fn from(video: Video) -> Self {
        Self {
            watch_url: video.watch_url(),
            embed_url: video.embed_url(),
            video,
        }
    }
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    threshold: f64,
    matches: &'a [MatchResult],
    #[serde(skip_serializing_if = "Option::is_none")]
    video: Option<VideoOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    video_error: Option<String>,
}

/// Run a search and print the result; returns the process exit code
pub async fn run(app: &App, query: &str, options: SearchOptions) -> Result<i32> {
    let timer = Timer::start("search");
    let matches = if options.all {
        app.index.search_ranked(query, app.max_results())
    } else {
        app.index.search(query).into_iter().collect()
    };
    timer.stop();

    let video = match (options.video, matches.first()) {
        (true, Some(best)) => Some(lookup_video(app, &best.record.name, options.json).await),
        _ => None,
    };

    if options.json {
        let (video, video_error) = match video {
            Some(Ok(found)) => (found.map(VideoOutput::from), None),
            Some(Err(e)) => (None, Some(e.message.clone())),
            None => (None, None),
        };
        let failed = video_error.is_some();
        let output = SearchOutput {
            query,
            threshold: app.index.config().threshold(),
            matches: &matches,
            video,
            video_error,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(exit_code(&matches, failed));
    }

    if matches.is_empty() {
        print_no_match(query);
        return Ok(exit_codes::NO_MATCH);
    }

    if options.all {
        print_ranked(query, &matches);
    }
    print_best(&matches[0]);

    let failed = match video {
        Some(Ok(Some(video))) => {
            println!();
            println!("{} {}", "▶".red(), video.title.bold());
            if !video.channel.is_empty() {
                println!("  {}", video.channel.dimmed());
            }
            println!("  {}", video.watch_url().cyan().underline());
            false
        }
        Some(Ok(None)) => {
            Status::info("No video found for this recipe");
            false
        }
        Some(Err(e)) => {
            Status::report(&e);
            true
        }
        None => false,
    };

    Ok(exit_code(&matches, failed))
}

/// Print the best match for a query as text; returns whether one was found
pub fn print_best_for(app: &App, query: &str) -> bool {
    match app.index.search(query) {
        Some(best) => {
            print_best(&best);
            true
        }
        None => {
            print_no_match(query);
            false
        }
    }
}

fn print_best(best: &MatchResult) {
    println!(
        "{} {}",
        format_score(best.score).green().bold(),
        format!("{} match", best.kind.label()).dimmed()
    );
    println!();
    print_card(&best.record);
}

fn print_ranked(query: &str, matches: &[MatchResult]) {
    Status::header(&format!("Matches for '{}'", query.trim()));
    let width = matches
        .iter()
        .map(|m| console::measure_text_width(&m.record.name))
        .max()
        .unwrap_or(0);

    for m in matches {
        let fill = width.saturating_sub(console::measure_text_width(&m.record.name));
        println!(
            "  {}. {}{}  {:>4}  {}",
            m.rank + 1,
            m.record.name,
            " ".repeat(fill),
            format_score(m.score),
            m.kind.label().dimmed()
        );
    }
    println!();
}

fn print_no_match(query: &str) {
    println!("{}", "No Match Found".yellow().bold());
    eprintln!(
        "  {} no recipe is close enough to '{}'; try `cookbuddy list`",
        "hint:".cyan(),
        query.trim()
    );
}

async fn lookup_video(
    app: &App,
    dish: &str,
    quiet: bool,
) -> std::result::Result<Option<Video>, cookbuddy_core::Error> {
    let client = app.media_client()?;

    let spinner = (!quiet).then(|| progress::spinner(&format!("Looking up a video for {dish}...")));
    let result = client.search_video(dish).await.map_err(media_error);
    if let Some(spinner) = spinner {
        progress::finish_clear(&spinner);
    }

    result
}

fn exit_code(matches: &[MatchResult], video_failed: bool) -> i32 {
    if matches.is_empty() {
        exit_codes::NO_MATCH
    } else if video_failed {
        exit_codes::MEDIA_ERROR
    } else {
        exit_codes::SUCCESS
    }
}
