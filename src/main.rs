//! programboard - program listings from a published spreadsheet.
//!
//! Fetches the public CSV export of the program sheet, categorizes the
//! entries into upcoming and past, and prints both lists. Results are
//! cached briefly so repeated runs stay fast and a dead network still
//! shows the last known data.

mod api;
mod cache;
mod config;
mod loader;
mod models;
mod parser;
mod utils;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use api::FeedClient;
use cache::{CacheManager, FileStore};
use config::Config;
use loader::ProgramLoader;
use models::{Program, ProgramCollection};
use utils::{format_date, starts_within_week};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_usage() {
    println!("Usage: programboard [OPTIONS]");
    println!();
    println!("  --refresh, -r      Bypass the cache and fetch fresh data");
    println!("  --json             Print the collection as JSON");
    println!("  --set-sheet <id>   Save the sheet id to the config file");
    println!("  --image-urls <url> Print the renderable forms of a Drive image link");
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return ExitCode::SUCCESS;
    }

    // CLI utility commands, handled before any feed wiring
    if args.len() > 2 && args[1] == "--set-sheet" {
        return match set_sheet(&args[2]) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        };
    }
    if args.len() > 2 && args[1] == "--image-urls" {
        for url in utils::alternate_image_urls(&args[2]) {
            println!("{}", url);
        }
        return ExitCode::SUCCESS;
    }

    let force_refresh = args.iter().any(|a| a == "--refresh" || a == "-r");
    let as_json = args.iter().any(|a| a == "--json");

    match run(force_refresh, as_json).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run the command again to retry.");
            ExitCode::FAILURE
        }
    }
}

async fn run(force_refresh: bool, as_json: bool) -> Result<()> {
    let config = Config::load()?;
    let feed_url = config.resolve_feed_url()?;
    let cache_dir = config.cache_dir().unwrap_or_else(|_| PathBuf::from("./cache"));

    info!("programboard starting");

    let store = FileStore::new(cache_dir)?;
    let cache = CacheManager::new(Box::new(store));
    let client = FeedClient::new(feed_url)?;
    let loader = ProgramLoader::new(client, cache);

    let collection = loader.load(force_refresh).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&collection)?);
        return Ok(());
    }

    print_collection(&collection, loader.cache_age());
    Ok(())
}

fn set_sheet(id: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.sheet_id = Some(id.to_string());
    config.save()?;
    println!("Sheet id saved.");
    Ok(())
}

fn print_collection(collection: &ProgramCollection, cache_age: Option<String>) {
    if collection.is_empty() {
        println!("No programs found.");
        return;
    }

    if !collection.upcoming.is_empty() {
        println!("Upcoming programs");
        println!("-----------------");
        for program in &collection.upcoming {
            print_program(program, true);
        }
        println!();
    }

    if !collection.past.is_empty() {
        println!("Past programs");
        println!("-------------");
        for program in &collection.past {
            print_program(program, false);
        }
        println!();
    }

    if let Some(age) = cache_age {
        println!("Data cached {}", age);
    }
}

fn print_program(program: &Program, mark_soon: bool) {
    print!("  {}  {}", format_date(&program.date), program.title);
    if mark_soon && starts_within_week(&program.date) {
        print!("  (starting soon)");
    }
    println!();

    let mut details: Vec<&str> = Vec::new();
    if !program.time.is_empty() {
        details.push(&program.time);
    }
    if !program.location.is_empty() {
        details.push(&program.location);
    }
    if !program.category.is_empty() {
        details.push(&program.category);
    }
    if !details.is_empty() {
        println!("      {}", details.join(" | "));
    }
    if !program.registration_url.is_empty() {
        println!("      Register: {}", program.registration_url);
    }
}
