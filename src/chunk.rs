//! Record model - one document chunk per table row
//!
//! The input file carries Portuguese keys (`fonte`, `texto`, `vetor`);
//! the record and the table use English names. Serde renames bridge the
//! two so nothing downstream has to know about the wire spelling.

use serde::Deserialize;
use serde_json::Value;

/// One unit of source document text paired with its embedding vector.
///
/// Every field is optional on the record: `id` is assigned by storage on
/// insert, and absent input keys become `None` and are passed through
/// uncoerced; the table's `NOT NULL` constraints reject them at commit
/// time rather than at construction time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentChunk {
    /// Primary key, assigned by SQLite on insert. Never read from input;
    /// an `id` key in the JSON is just another unrecognized key.
    #[serde(skip)]
    pub id: Option<i64>,
    /// Label of the document this chunk came from (bounded to 255 chars
    /// by the table).
    #[serde(rename = "fonte")]
    pub source: Option<String>,
    /// The chunk's text body, unbounded.
    #[serde(rename = "texto")]
    pub text: Option<String>,
    /// Embedding vector; `f64` because that is how JSON numbers
    /// round-trip through the JSON-typed column.
    #[serde(rename = "vetor")]
    pub vector: Option<Vec<f64>>,
}

impl DocumentChunk {
    /// Create a fully-populated chunk (not yet inserted, so no id).
    pub fn new(source: impl Into<String>, text: impl Into<String>, vector: Vec<f64>) -> Self {
        Self {
            id: None,
            source: Some(source.into()),
            text: Some(text.into()),
            vector: Some(vector),
        }
    }

    /// Convert one parsed JSON element into a chunk.
    ///
    /// Missing keys yield `None` fields; unrecognized keys are ignored.
    /// Only a type/shape mismatch (e.g. `vetor` holding a string) is an
    /// error here, and the caller treats that as a per-item failure.
    pub fn from_json(value: &Value) -> std::result::Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_maps_input_keys() {
        let value = json!({"fonte": "doc1", "texto": "hello", "vetor": [0.1, 0.2]});
        let chunk = DocumentChunk::from_json(&value).unwrap();

        assert_eq!(chunk.id, None);
        assert_eq!(chunk.source.as_deref(), Some("doc1"));
        assert_eq!(chunk.text.as_deref(), Some("hello"));
        assert_eq!(chunk.vector, Some(vec![0.1, 0.2]));
    }

    #[test]
    fn test_from_json_missing_keys_become_none() {
        let chunk = DocumentChunk::from_json(&json!({})).unwrap();

        assert_eq!(chunk.source, None);
        assert_eq!(chunk.text, None);
        assert_eq!(chunk.vector, None);
    }

    #[test]
    fn test_from_json_ignores_unrecognized_keys() {
        let value = json!({
            "id": 99,
            "fonte": "doc1",
            "texto": "hello",
            "vetor": [1.0],
            "pagina": 7
        });
        let chunk = DocumentChunk::from_json(&value).unwrap();

        assert_eq!(chunk.id, None);
        assert_eq!(chunk.source.as_deref(), Some("doc1"));
    }

    #[test]
    fn test_from_json_rejects_wrong_vector_shape() {
        let value = json!({"fonte": "doc1", "texto": "hello", "vetor": "not numbers"});
        assert!(DocumentChunk::from_json(&value).is_err());
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(DocumentChunk::from_json(&json!([1, 2, 3])).is_err());
        assert!(DocumentChunk::from_json(&json!("chunk")).is_err());
    }

    #[test]
    fn test_new_builds_complete_chunk() {
        let chunk = DocumentChunk::new("doc1", "hello", vec![0.5]);

        assert_eq!(chunk.id, None);
        assert_eq!(chunk.source.as_deref(), Some("doc1"));
        assert_eq!(chunk.text.as_deref(), Some("hello"));
        assert_eq!(chunk.vector, Some(vec![0.5]));
    }
}
