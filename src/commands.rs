//! Command implementations for the chunkload CLI
//!
//! One `run_*` function per subcommand. Each builds its own `ChunkStore`
//! from the settings, does the work, and prints the human-facing lines;
//! errors bubble up to `main` for rendering and the exit code.

use std::path::Path;

use crate::Result;
use crate::config::Settings;
use crate::loader;
use crate::storage::{ChunkStore, schema};
use crate::ui;

/// `init-db`: idempotently create the document_chunks table and its index.
pub fn run_init_db(settings: &Settings) -> Result<()> {
    tracing::info!("initializing database schema");
    ui::database(&settings.database_url);
    ui::phase("Creating tables");

    let store = ChunkStore::connect(&settings.database_url)?;
    store.create_all_tables()?;

    ui::success("Tables created");
    Ok(())
}

/// `load-data`: bulk-load one JSON file of chunks in a single transaction.
pub fn run_load_data(settings: &Settings, json_file: &Path) -> Result<()> {
    ui::header(&format!("Loading chunks from {}", json_file.display()));
    ui::database(&settings.database_url);

    let mut store = ChunkStore::connect(&settings.database_url)?;
    let report = loader::load_file(&mut store, json_file)?;

    if report.skipped > 0 {
        ui::warn(&format!(
            "{} malformed record(s) skipped, see warnings above",
            report.skipped
        ));
    }
    ui::success(&format!(
        "{} chunks inserted into '{}'",
        report.staged,
        schema::TABLE_NAME
    ));
    Ok(())
}
