//! Load routine - the batch-insert core
//!
//! Reads a JSON file whose top level must be an array of chunk objects,
//! stages every convertible element in one session, and commits the batch
//! as a single transaction. A per-item conversion failure is a warning and
//! the item is simply left out; a read, parse, shape, or commit failure
//! aborts the whole operation with nothing persisted.

use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::chunk::DocumentChunk;
use crate::storage::ChunkStore;
use crate::ui::{self, ChunkProgress};
use crate::{Error, Result};

/// Outcome of one load run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Records staged and committed
    pub staged: usize,
    /// Records skipped because they failed to convert
    pub skipped: usize,
    /// Records found in the input file
    pub total: usize,
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} inserted, {} skipped ({} total)",
            self.staged, self.skipped, self.total
        )
    }
}

/// Load every chunk in `path` into the store as one transaction.
///
/// Elements are processed in file order. Items that fail to convert are
/// reported as warnings and excluded from the batch; they never abort it.
/// The commit is all-or-nothing: on any transaction failure a rollback is
/// issued and the error propagates, so no partial batch survives.
pub fn load_file(store: &mut ChunkStore, path: &Path) -> Result<LoadReport> {
    tracing::info!("loading chunks from {}", path.display());
    let items = read_items(path)?;
    let total = items.len();
    ui::count("Records found", total);

    let mut session = store.session();
    let progress = ChunkProgress::new(total);
    let mut skipped = 0usize;

    for (index, item) in items.iter().enumerate() {
        match DocumentChunk::from_json(item) {
            Ok(chunk) => session.stage(chunk),
            Err(source) => {
                skipped += 1;
                let err = Error::Record { index, source };
                tracing::debug!(%item, "skipping record: {}", err);
                progress.warn(&err.to_string());
            }
        }
        progress.inc();
    }
    progress.finish();

    let staged = session.commit()?;
    Ok(LoadReport {
        staged,
        skipped,
        total,
    })
}

/// Read and parse the whole input file, requiring a top-level JSON array.
/// Nothing touches the database until this has succeeded.
fn read_items(path: &Path) -> Result<Vec<Value>> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::InputRead {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&raw).map_err(|source| Error::InputJson {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Array(items) => Ok(items),
        other => Err(Error::InputShape {
            found: json_type_name(&other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn store_with_schema() -> ChunkStore {
        let store = ChunkStore::open_in_memory().unwrap();
        store.create_all_tables().unwrap();
        store
    }

    fn write_input(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("chunks.json");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_file_inserts_all_well_formed_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(
            &dir,
            r#"[
                {"fonte": "doc1", "texto": "hello", "vetor": [0.1, 0.2]},
                {"fonte": "doc2", "texto": "world", "vetor": [0.3, 0.4]}
            ]"#,
        );

        let mut store = store_with_schema();
        let report = load_file(&mut store, &path).unwrap();

        assert_eq!(
            report,
            LoadReport {
                staged: 2,
                skipped: 0,
                total: 2
            }
        );
        assert_eq!(store.count_chunks().unwrap(), 2);

        let first = store.get_chunk(1).unwrap().unwrap();
        assert_eq!(first.source.as_deref(), Some("doc1"));
        assert_eq!(first.text.as_deref(), Some("hello"));
        assert_eq!(first.vector, Some(vec![0.1, 0.2]));

        let second = store.get_chunk(2).unwrap().unwrap();
        assert_eq!(second.source.as_deref(), Some("doc2"));
        assert_eq!(second.text.as_deref(), Some("world"));
        assert_eq!(second.vector, Some(vec![0.3, 0.4]));
    }

    #[test]
    fn test_load_file_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "this is { not json");

        let mut store = store_with_schema();
        let err = load_file(&mut store, &path).unwrap_err();

        assert!(matches!(err, Error::InputJson { .. }));
        assert_eq!(store.count_chunks().unwrap(), 0);
    }

    #[test]
    fn test_load_file_rejects_top_level_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, r#"{"not": "a list"}"#);

        let mut store = store_with_schema();
        let err = load_file(&mut store, &path).unwrap_err();

        assert!(matches!(err, Error::InputShape { found: "an object" }));
        assert!(err.to_string().contains("array"));
        assert_eq!(store.count_chunks().unwrap(), 0);
    }

    #[test]
    fn test_load_file_skips_malformed_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(
            &dir,
            r#"[
                {"fonte": "doc1", "texto": "first", "vetor": [0.1]},
                {"fonte": "doc2", "texto": "bad", "vetor": "not an array"},
                {"fonte": "doc3", "texto": "third", "vetor": [0.3]}
            ]"#,
        );

        let mut store = store_with_schema();
        let report = load_file(&mut store, &path).unwrap();

        assert_eq!(
            report,
            LoadReport {
                staged: 2,
                skipped: 1,
                total: 3
            }
        );
        assert_eq!(store.count_chunks().unwrap(), 2);
        assert_eq!(store.chunks_by_source("doc2").unwrap().len(), 0);
        assert_eq!(store.chunks_by_source("doc3").unwrap().len(), 1);
    }

    #[test]
    fn test_load_file_rolls_back_when_commit_fails() {
        let dir = tempfile::tempdir().unwrap();
        let long_source = "s".repeat(300);
        let path = write_input(
            &dir,
            &format!(
                r#"[
                    {{"fonte": "doc1", "texto": "fine", "vetor": [0.1]}},
                    {{"fonte": "{long_source}", "texto": "over the bound", "vetor": [0.2]}}
                ]"#
            ),
        );

        let mut store = store_with_schema();
        let err = load_file(&mut store, &path).unwrap_err();

        // both items stage cleanly; the constraint fires at commit and
        // takes the whole batch down with it
        assert!(matches!(err, Error::Transaction(_)));
        assert_eq!(store.count_chunks().unwrap(), 0);
    }

    #[test]
    fn test_load_file_missing_file_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nowhere.json");

        let mut store = store_with_schema();
        let err = load_file(&mut store, &path).unwrap_err();

        assert!(matches!(err, Error::InputRead { .. }));
    }

    #[test]
    fn test_load_file_accepts_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "[]");

        let mut store = store_with_schema();
        let report = load_file(&mut store, &path).unwrap();

        assert_eq!(
            report,
            LoadReport {
                staged: 0,
                skipped: 0,
                total: 0
            }
        );
    }

    #[test]
    fn test_report_display() {
        let report = LoadReport {
            staged: 2,
            skipped: 1,
            total: 3,
        };
        assert_eq!(report.to_string(), "2 inserted, 1 skipped (3 total)");
    }
}
