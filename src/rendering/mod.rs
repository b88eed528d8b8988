//! Result rendering.
//!
//! Renders a ranked hit list as markdown blocks for consumption by a
//! person or an AI assistant reading stdout.

use crate::models::SearchHit;

/// Fixed message for an empty result set, a valid terminal state kept
/// visually distinct from errors (which go to stderr).
pub const NO_RESULTS: &str = "No results found.";

/// Formats search results as markdown.
///
/// Each hit renders as a titled block with score, payload type, source
/// filename, the stored document body and a related-chunks sub-list;
/// blocks are joined with a visible separator.
#[must_use]
pub fn format_results(results: &[SearchHit], search_mode: &str) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut parts = Vec::with_capacity(results.len() + 1);

    if !search_mode.is_empty() {
        parts.push(format!("_Search mode: {search_mode}_\n"));
    }

    for (index, hit) in results.iter().enumerate() {
        let payload = &hit.payload;
        let title = payload.display_title();
        let doc_type = payload.doc_type.as_deref().unwrap_or("unknown");

        let mut meta = format!("score={:.3} | type={doc_type}", hit.score);
        if let Some(filename) = payload.filename.as_deref() {
            meta.push_str(" | file=");
            meta.push_str(filename);
        }

        let mut block = format!(
            "### Result {}: {title}\n_{meta}_\n\n{}",
            index + 1,
            payload.document.as_deref().unwrap_or_default()
        );

        if !payload.references.is_empty() {
            block.push_str("\n\n**Related chunks:**");
            for reference in &payload.references {
                block.push_str(&format!("\n- `{}` — {}", reference.chunk, reference.description));
            }
        }

        parts.push(block);
    }

    parts.join("\n\n---\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChunkPayload, ChunkReference, PointId};

    fn hit(title: Option<&str>, filename: Option<&str>) -> SearchHit {
        SearchHit {
            id: PointId::Num(1),
            score: 0.876,
            payload: ChunkPayload {
                title: title.map(String::from),
                filename: filename.map(String::from),
                doc_type: Some("reference".to_string()),
                document: Some("Border color register.".to_string()),
                references: Vec::new(),
                tags: Vec::new(),
            },
        }
    }

    #[test]
    fn test_empty_results_message() {
        assert_eq!(format_results(&[], "semantic"), "No results found.");
    }

    #[test]
    fn test_block_layout() {
        let rendered = format_results(&[hit(Some("VIC-II Colors"), Some("vic.md"))], "semantic");
        assert!(rendered.starts_with("_Search mode: semantic_\n"));
        assert!(rendered.contains("### Result 1: VIC-II Colors"));
        assert!(rendered.contains("score=0.876 | type=reference | file=vic.md"));
        assert!(rendered.contains("Border color register."));
    }

    #[test]
    fn test_title_falls_back_to_filename() {
        let rendered = format_results(&[hit(None, Some("vic.md"))], "");
        assert!(rendered.contains("### Result 1: vic.md"));
    }

    #[test]
    fn test_untitled_fallback() {
        let rendered = format_results(&[hit(None, None)], "");
        assert!(rendered.contains("### Result 1: untitled"));
    }

    #[test]
    fn test_references_render_as_sublist() {
        let mut hit = hit(Some("Sprites"), None);
        hit.payload.references = vec![ChunkReference {
            chunk: "vic_sprite_pointers".to_string(),
            description: "sprite data pointers".to_string(),
        }];
        let rendered = format_results(&[hit], "");
        assert!(rendered.contains("**Related chunks:**"));
        assert!(rendered.contains("- `vic_sprite_pointers` — sprite data pointers"));
    }

    #[test]
    fn test_blocks_joined_with_separator() {
        let rendered = format_results(
            &[hit(Some("A"), None), hit(Some("B"), None)],
            "semantic",
        );
        assert!(rendered.contains("\n\n---\n\n"));
        assert!(rendered.contains("### Result 2: B"));
    }
}
