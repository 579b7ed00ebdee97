//! # Chunkload - JSON-to-SQLite loader for RAG document chunks
//!
//! A small ETL command line: initialize one relational table, then bulk-load
//! document chunks (source label, text body, embedding vector) from a JSON
//! array into it.
//!
//! Chunkload provides:
//! - A `DocumentChunk` record model mapped from the `fonte`/`texto`/`vetor`
//!   input keys
//! - SQLite-backed storage with an idempotent schema and a unit-of-work
//!   session (stage everything, commit or roll back as one transaction)
//! - A load routine with per-item error tolerance and progress reporting
//! - `init-db` / `load-data` CLI commands configured via `DATABASE_URL`

pub mod chunk;
pub mod commands;
pub mod config;
pub mod loader;
pub mod storage;
pub mod ui;

// Re-exports for convenient access
pub use chunk::DocumentChunk;
pub use config::Settings;
pub use loader::LoadReport;
pub use storage::ChunkStore;

/// Result type alias for Chunkload operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds for Chunkload operations.
///
/// One variant per failure class; rendering to user-facing text happens
/// only at the CLI boundary in `main`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The connection string is missing from the environment.
    #[error("Configuration error: environment variable `{name}` is not set or empty")]
    Configuration { name: &'static str },

    /// The input file could not be read at all.
    #[error("Input error: cannot read {}: {source}", .path.display())]
    InputRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file is not valid JSON.
    #[error("Input error: {} is not valid JSON: {source}", .path.display())]
    InputJson {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The input parsed, but the top level is not an array.
    #[error("Input error: expected a top-level JSON array, found {found}")]
    InputShape { found: &'static str },

    /// One element of the input array does not convert to a record.
    /// Reported as a warning by the loader, never propagated.
    #[error("Record {index} cannot be converted to a document chunk: {source}")]
    Record {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The staged batch failed to persist; a rollback was issued and no
    /// rows from the batch remain.
    #[error("Transaction failed, batch rolled back: {0}")]
    Transaction(#[source] rusqlite::Error),

    /// Table or index creation failed during `init-db`.
    #[error("Schema creation failed: {0}")]
    Schema(#[source] rusqlite::Error),

    /// Any other database error (opening connections, reading rows).
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}
