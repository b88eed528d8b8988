//! Query enrichment pipeline.
//!
//! A fixed set of passes inspects the raw query and its extracted numeric
//! tokens. Each pass returns value annotations, memory-region hints and
//! keyword filter tags; the pipeline concatenates annotations in
//! registration order and unions the tags. Passes are stateless and the
//! pass list is built once, so concurrent queries share nothing mutable.

mod colors;
mod kernal;
mod memory_map;
mod mirrors;
mod numbers;
mod opcodes;
mod registers;
mod tokenizer;

pub use colors::ColorPass;
pub use kernal::KernalPass;
pub use memory_map::{MemoryMapPass, MemoryRegion, lookup_address_region};
pub use mirrors::MirrorPass;
pub use numbers::{NumberPass, enrich_number};
pub use opcodes::{OpcodePass, is_opcode};
pub use registers::RegisterPass;
pub use tokenizer::{ExtractedNumber, TokenRule, extract_hex_addresses, extract_numbers};

/// Whether a word is in the closed KnownTag vocabulary, ignoring case.
///
/// The vocabulary covers register mnemonics, KERNAL API labels and color
/// names; it is built once at first use and never mutated.
#[must_use]
pub fn is_known_tag(word: &str) -> bool {
    let upper = word.to_uppercase();
    registers::REGISTER_MNEMONICS.contains(upper.as_str())
        || kernal::KERNAL_LABELS.contains(upper.as_str())
        || colors::COLOR_NAME_TAGS.contains(upper.as_str())
}

/// Extracts the sorted set of KnownTag vocabulary matches from query text.
///
/// Candidates are word-boundary delimited, matched case-insensitively and
/// returned uppercase.
#[must_use]
pub fn extract_known_tags(query: &str) -> Vec<String> {
    let mut tags: Vec<String> = query
        .split(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .filter(|word| !word.is_empty() && is_known_tag(word))
        .map(str::to_uppercase)
        .collect();
    tags.sort_unstable();
    tags.dedup();
    tags
}

/// Read-only input handed to every enrichment pass.
#[derive(Debug)]
pub struct EnrichmentInput<'a> {
    /// Original query text.
    pub query: &'a str,
    /// Numeric tokens extracted from the query.
    pub numbers: &'a [ExtractedNumber],
}

/// Output of a single enrichment pass.
#[derive(Debug, Default)]
pub struct PassOutput {
    /// Value annotations for the bracket's first half.
    pub annotations: Vec<String>,
    /// Memory-region hints for the bracket's second half.
    pub region_hints: Vec<String>,
    /// Keyword tags for index filtering.
    pub filter_tags: Vec<String>,
}

/// A single enrichment pass.
pub trait EnrichmentPass: Send + Sync {
    /// Unique pass identifier, e.g. `"numbers"` or `"memory_map"`.
    fn name(&self) -> &'static str;

    /// Inspects the input and returns enrichment data.
    fn enrich(&self, input: &EnrichmentInput<'_>) -> PassOutput;
}

/// A query together with its enrichment annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedQuery {
    /// The unmodified query text.
    pub original: String,
    /// Value annotations (alternate bases, color names, mirror notes).
    pub annotations: Vec<String>,
    /// Memory-region hints for address-sized values.
    pub region_hints: Vec<String>,
    /// Sorted, deduplicated keyword filter tags.
    pub filter_tags: Vec<String>,
}

impl EnrichedQuery {
    /// A query that received no enrichment at all.
    #[must_use]
    pub const fn unchanged(original: String) -> Self {
        Self {
            original,
            annotations: Vec::new(),
            region_hints: Vec::new(),
            filter_tags: Vec::new(),
        }
    }

    /// Whether any annotation or hint was attached.
    #[must_use]
    pub fn is_annotated(&self) -> bool {
        !self.annotations.is_empty() || !self.region_hints.is_empty()
    }

    /// Renders the enriched query text.
    ///
    /// The original query, then a bracketed block holding the `"; "`-joined
    /// value annotations and region hints separated by `" | "`. An empty
    /// half is omitted; an empty block yields the original unchanged.
    #[must_use]
    pub fn text(&self) -> String {
        if !self.is_annotated() {
            return self.original.clone();
        }

        let mut halves = Vec::with_capacity(2);
        if !self.annotations.is_empty() {
            halves.push(self.annotations.join("; "));
        }
        if !self.region_hints.is_empty() {
            halves.push(self.region_hints.join("; "));
        }
        format!("{}\n[{}]", self.original, halves.join(" | "))
    }
}

/// The standard enrichment pipeline.
///
/// Pass order is fixed: value annotations come out in number → mirror →
/// color order, region hints after, and tag-only passes last. Order only
/// affects annotation readability; tags are unioned and sorted regardless.
pub struct EnrichmentPipeline {
    passes: Vec<Box<dyn EnrichmentPass>>,
}

impl EnrichmentPipeline {
    /// Creates the standard pipeline with all passes registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            passes: vec![
                Box::new(NumberPass),
                Box::new(MirrorPass),
                Box::new(ColorPass),
                Box::new(MemoryMapPass),
                Box::new(RegisterPass),
                Box::new(KernalPass),
                Box::new(OpcodePass),
            ],
        }
    }

    /// Runs every pass over the query and aggregates the results.
    #[must_use]
    pub fn run(&self, query: &str) -> EnrichedQuery {
        let numbers = extract_numbers(query);
        let input = EnrichmentInput {
            query,
            numbers: &numbers,
        };

        let mut annotations = Vec::new();
        let mut region_hints = Vec::new();
        let mut filter_tags = Vec::new();

        for pass in &self.passes {
            let output = pass.enrich(&input);
            tracing::debug!(
                pass = pass.name(),
                annotations = output.annotations.len(),
                tags = output.filter_tags.len(),
                "enrichment pass"
            );
            annotations.extend(output.annotations);
            region_hints.extend(output.region_hints);
            filter_tags.extend(output.filter_tags);
        }

        filter_tags.sort_unstable();
        filter_tags.dedup();

        EnrichedQuery {
            original: query.to_string(),
            annotations,
            region_hints,
            filter_tags,
        }
    }
}

impl Default for EnrichmentPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unannotated_query_passes_through() {
        let pipeline = EnrichmentPipeline::new();
        let enriched = pipeline.run("how do sprites work");
        assert_eq!(enriched.text(), "how do sprites work");
        assert!(enriched.filter_tags.is_empty());
    }

    #[test]
    fn test_poke_idiom_end_to_end() {
        let pipeline = EnrichmentPipeline::new();
        let enriched = pipeline.run("53280, 13");

        let text = enriched.text();
        assert!(text.starts_with("53280, 13\n["));
        assert!(text.contains("53280 = $D020"));
        assert!(text.contains("13 = $0D / %00001101"));
        assert!(text.contains(" | "));
        assert!(text.contains("$D020 → VIC-II Border Color (border color (16 colors, bits 0-3))"));
        assert_eq!(enriched.filter_tags, vec!["$D020"]);
    }

    #[test]
    fn test_bracket_omitted_without_value_half() {
        let enriched = EnrichedQuery {
            original: "q".to_string(),
            annotations: Vec::new(),
            region_hints: vec!["$D020 → VIC-II (Video Interface Controller)".to_string()],
            filter_tags: Vec::new(),
        };
        assert_eq!(
            enriched.text(),
            "q\n[$D020 → VIC-II (Video Interface Controller)]"
        );
    }

    #[test]
    fn test_tags_sorted_and_deduplicated() {
        let pipeline = EnrichmentPipeline::new();
        let enriched = pipeline.run("CHROUT and chrout at $FFD2");
        assert_eq!(enriched.filter_tags, vec!["$FFD2", "CHROUT"]);
    }
}
