//! Database schema definitions

/// Name of the one table this tool owns.
pub const TABLE_NAME: &str = "document_chunks";

/// Upper bound on `source`, mirrored by the CHECK below. SQLite ignores
/// `VARCHAR(n)` limits, so the bound has to be spelled out to hold.
pub const SOURCE_MAX_LEN: usize = 255;

/// SQL to create the document_chunks table.
///
/// `vector` is the JSON-typed column: a TEXT payload constrained to valid
/// JSON, holding the embedding as a JSON array of numbers.
pub const CREATE_DOCUMENT_CHUNKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS document_chunks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source TEXT NOT NULL CHECK (length(source) <= 255),
    text TEXT NOT NULL,
    vector TEXT NOT NULL CHECK (json_valid(vector))
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_document_chunks_source ON document_chunks(source)",
];

/// All schema creation statements, in execution order. Every statement is
/// an `IF NOT EXISTS` form, so the whole set is idempotent.
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_DOCUMENT_CHUNKS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
