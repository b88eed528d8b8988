//! Search result wire types and strategy selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Search strategy for a query.
///
/// Selected by a pure decision function from the extracted filter tags and
/// the natural-language flag; see [`crate::search::determine_strategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Filtered and unfiltered vector search, merged with filtered priority.
    Hybrid,
    /// Keyword-filtered vector search only.
    Filtered,
    /// Unfiltered vector search only.
    Semantic,
}

impl SearchStrategy {
    /// Returns the strategy as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hybrid => "hybrid",
            Self::Filtered => "filtered",
            Self::Semantic => "semantic",
        }
    }
}

/// A point id as returned by the index: integer or UUID string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    /// Numeric point id.
    Num(u64),
    /// String (UUID) point id.
    Str(String),
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

/// A cross-reference to a related knowledge chunk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkReference {
    /// Identifier of the referenced chunk.
    #[serde(default)]
    pub chunk: String,
    /// Short description of the referenced chunk.
    #[serde(default)]
    pub description: String,
}

/// Payload stored with each indexed chunk.
///
/// Only the fields this tool consumes are modeled; anything else in the
/// stored payload is ignored on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkPayload {
    /// Chunk title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Source filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Document type label.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    /// The stored document body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    /// Cross-references to related chunks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<ChunkReference>,
    /// Keyword tags attached at indexing time.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl ChunkPayload {
    /// Display title: `title`, falling back to `filename`, then "untitled".
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.filename.as_deref())
            .unwrap_or("untitled")
    }
}

/// A single search hit from the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Point id.
    pub id: PointId,
    /// Similarity score.
    pub score: f32,
    /// Stored payload.
    #[serde(default)]
    pub payload: ChunkPayload,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_labels() {
        assert_eq!(SearchStrategy::Hybrid.as_str(), "hybrid");
        assert_eq!(SearchStrategy::Filtered.as_str(), "filtered");
        assert_eq!(SearchStrategy::Semantic.as_str(), "semantic");
    }

    #[test]
    fn test_display_title_fallbacks() {
        let payload = ChunkPayload {
            title: Some("VIC-II Registers".to_string()),
            filename: Some("vic.md".to_string()),
            ..ChunkPayload::default()
        };
        assert_eq!(payload.display_title(), "VIC-II Registers");

        let payload = ChunkPayload {
            filename: Some("vic.md".to_string()),
            ..ChunkPayload::default()
        };
        assert_eq!(payload.display_title(), "vic.md");

        assert_eq!(ChunkPayload::default().display_title(), "untitled");
    }

    #[test]
    fn test_hit_deserializes_mixed_id_types() {
        let json = r#"{"id": 42, "score": 0.91, "payload": {"title": "t"}}"#;
        let hit: SearchHit = serde_json::from_str(json).unwrap();
        assert_eq!(hit.id, PointId::Num(42));

        let json = r#"{"id": "a1b2", "score": 0.5, "payload": {}}"#;
        let hit: SearchHit = serde_json::from_str(json).unwrap();
        assert_eq!(hit.id, PointId::Str("a1b2".to_string()));
    }

    #[test]
    fn test_unknown_payload_fields_ignored() {
        let json = r#"{"id": 1, "score": 0.2, "payload": {"title": "t", "extra": [1, 2]}}"#;
        let hit: SearchHit = serde_json::from_str(json).unwrap();
        assert_eq!(hit.payload.display_title(), "t");
    }
}
