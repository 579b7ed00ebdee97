//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use crate::chunk::DocumentChunk;
use crate::{Error, Result};
use super::schema;

/// SQL to insert one staged chunk. Executed once per pending record inside
/// the session's transaction.
const INSERT_CHUNK: &str =
    "INSERT INTO document_chunks (source, text, vector) VALUES (?1, ?2, ?3)";

/// SQLite-backed storage for document chunks.
///
/// Owns the single connection for one process invocation. Opening a store
/// does not create the schema; that is `init-db`'s job via
/// [`ChunkStore::create_all_tables`].
pub struct ChunkStore {
    conn: Connection,
}

impl ChunkStore {
    /// Open a store from a connection string.
    ///
    /// Accepts a `sqlite://` or `sqlite:` prefixed URL or a bare filesystem
    /// path; `:memory:` (with or without scheme) opens an in-memory
    /// database. No scheme validation happens here; anything unrecognized
    /// is treated as a path and fails to open like any other bad path.
    pub fn connect(database_url: &str) -> Result<Self> {
        let target = database_url
            .strip_prefix("sqlite://")
            .or_else(|| database_url.strip_prefix("sqlite:"))
            .unwrap_or(database_url);

        if target == ":memory:" {
            Self::open_in_memory()
        } else {
            Self::open(Path::new(target))
        }
    }

    /// Open a database file (creates the file if it doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Ensure the document_chunks table and its index exist.
    ///
    /// Every statement is an `IF NOT EXISTS` form, so calling this against
    /// an already-initialized database is a no-op.
    pub fn create_all_tables(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            tracing::debug!(statement = stmt, "executing DDL");
            self.conn.execute(stmt, []).map_err(Error::Schema)?;
        }
        Ok(())
    }

    /// Open a unit-of-work session bound to this store's connection.
    ///
    /// The mutable borrow keeps the session exclusive for its whole scope
    /// and guarantees release on every exit path.
    pub fn session(&mut self) -> Session<'_> {
        Session {
            conn: &mut self.conn,
            pending: Vec::new(),
        }
    }

    /// Count all stored chunks
    pub fn count_chunks(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM document_chunks", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get a chunk by its assigned id
    pub fn get_chunk(&self, id: i64) -> Result<Option<DocumentChunk>> {
        self.conn
            .query_row(
                "SELECT id, source, text, vector FROM document_chunks WHERE id = ?1",
                [id],
                |row| self.row_to_chunk(row),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Find all chunks loaded from one source, in insertion order
    pub fn chunks_by_source(&self, source: &str) -> Result<Vec<DocumentChunk>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, source, text, vector FROM document_chunks WHERE source = ?1 ORDER BY id",
        )?;

        let chunks = stmt
            .query_map([source], |row| self.row_to_chunk(row))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(chunks)
    }

    /// Helper to convert a row to a DocumentChunk
    fn row_to_chunk(&self, row: &rusqlite::Row) -> rusqlite::Result<DocumentChunk> {
        let vector_text: String = row.get(3)?;
        let vector: Vec<f64> = serde_json::from_str(&vector_text).map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(err))
        })?;

        Ok(DocumentChunk {
            id: Some(row.get(0)?),
            source: Some(row.get(1)?),
            text: Some(row.get(2)?),
            vector: Some(vector),
        })
    }
}

/// Unit-of-work session: batches pending inserts and commits or rolls them
/// back atomically.
///
/// [`Session::stage`] only appends to an in-memory pending set; nothing
/// touches the database until [`Session::commit`] runs the whole batch in
/// one transaction. Dropping an uncommitted session discards the batch.
pub struct Session<'a> {
    conn: &'a mut Connection,
    pending: Vec<DocumentChunk>,
}

impl Session<'_> {
    /// Add a chunk to the pending set (no database I/O).
    pub fn stage(&mut self, chunk: DocumentChunk) {
        self.pending.push(chunk);
    }

    /// Number of chunks staged so far
    pub fn staged(&self) -> usize {
        self.pending.len()
    }

    /// Persist the whole pending set in one transaction.
    ///
    /// Returns the number of rows written. Any failure (a constraint
    /// violation on one row, a missing table, the commit itself) issues an
    /// explicit rollback and returns [`Error::Transaction`]; no rows from
    /// the batch remain.
    pub fn commit(self) -> Result<usize> {
        let Session { conn, pending } = self;
        let count = pending.len();

        let tx = conn.transaction().map_err(Error::Transaction)?;
        match insert_all(&tx, &pending) {
            Ok(()) => {
                tx.commit().map_err(Error::Transaction)?;
                tracing::debug!(rows = count, "batch committed");
                Ok(count)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    tracing::error!("rollback after failed batch also failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }
}

fn insert_all(tx: &Transaction<'_>, pending: &[DocumentChunk]) -> Result<()> {
    tracing::debug!(statement = INSERT_CHUNK, rows = pending.len(), "inserting batch");
    for chunk in pending {
        let vector = vector_json(chunk.vector.as_deref())?;
        tx.execute(INSERT_CHUNK, params![chunk.source, chunk.text, vector])
            .map_err(Error::Transaction)?;
    }
    Ok(())
}

/// Encode the embedding for the JSON-typed column. `None` passes through as
/// SQL `NULL` so the table's constraints get the final say.
fn vector_json(vector: Option<&[f64]>) -> Result<Option<String>> {
    vector
        .map(serde_json::to_string)
        .transpose()
        .map_err(|err| Error::Transaction(rusqlite::Error::ToSqlConversionFailure(Box::new(err))))
}
