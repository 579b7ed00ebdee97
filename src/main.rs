//! Chunkload CLI - initialize the chunk table and bulk-load JSON chunk files

use std::path::PathBuf;
use std::process::ExitCode;

use chunkload::commands;
use chunkload::config::Settings;
use chunkload::ui;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "chunkload")]
#[command(version = "0.1.0")]
#[command(about = "Bulk-load RAG document chunks with embedding vectors from JSON into SQLite")]
#[command(long_about = r#"
Chunkload owns one table of document chunks (source, text, embedding vector)
and fills it from a JSON file in a single all-or-nothing transaction.

Connection string comes from the DATABASE_URL environment variable,
optionally read from a local .env file.

Example usage:
  chunkload init-db
  chunkload load-data ./chunks.json
"#)]
struct Cli {
    /// Enable verbose logging (shows executed SQL and per-item diagnostics)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the document_chunks table (safe to run repeatedly)
    InitDb,

    /// Load chunks from a JSON file into the table
    LoadData {
        /// Path to the JSON file with the chunks (top-level array)
        #[arg(value_parser = existing_file)]
        json_file: PathBuf,
    },
}

/// Value parser for the load-data argument: the path must exist and be a
/// readable regular file, checked before the command body ever runs.
fn existing_file(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    if !path.exists() {
        return Err(format!("path '{raw}' does not exist"));
    }
    if !path.is_file() {
        return Err(format!("'{raw}' is not a regular file"));
    }
    std::fs::File::open(&path).map_err(|err| format!("cannot open '{raw}' for reading: {err}"))?;
    Ok(path)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Connection string is required before any command logic runs.
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            ui::error(&err.to_string());
            ui::warn("set DATABASE_URL or create a .env file with the connection string");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::InitDb => commands::run_init_db(&settings),
        Commands::LoadData { json_file } => commands::run_load_data(&settings, &json_file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}
