//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with one table:
//! - document_chunks(id, source, text, vector)
//!
//! `vector` holds the embedding as a JSON array string (the JSON-typed
//! column); `source` is indexed and bounded to 255 chars.

pub mod schema;
pub mod sqlite;

pub use sqlite::{ChunkStore, Session};
