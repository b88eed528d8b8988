//! Query classification and strategy execution.
//!
//! Three strategies: hybrid (tags + natural language), filtered (tags
//! only, for bare-identifier lookups where filtering *is* the search) and
//! semantic (no tags). The decision is a pure function so it stays
//! testable apart from the network calls that execute it.

// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use super::embedding::EmbeddingClient;
use super::qdrant::{QdrantClient, merge_results, trim_by_score};
use crate::Result;
use crate::config::QueryConfig;
use crate::enrichment::{is_known_tag, is_opcode};
use crate::models::{SearchHit, SearchStrategy};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static NUMERIC_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$[0-9A-Fa-f]{1,4}|%[01]{4,8}").expect("static regex: numeric literals")
});

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9_]*").expect("static regex: words"));

/// Checks whether a query carries meaningful natural language beyond bare
/// identifiers.
///
/// Hex and binary literals, instruction mnemonics, the closed KnownTag
/// vocabulary and the supplied filter tags are all discounted; digits and
/// punctuation never form words. At least two words longer than one
/// character must remain.
#[must_use]
pub fn has_natural_language(query: &str, filter_tags: &[String]) -> bool {
    let stripped = NUMERIC_LITERAL.replace_all(query, " ");

    let tags: HashSet<String> = filter_tags
        .iter()
        .map(|tag| tag.trim_start_matches('$').to_uppercase())
        .collect();

    let mut words = 0;
    for word in WORD.find_iter(&stripped) {
        let word = word.as_str();
        if word.len() <= 1 {
            continue;
        }
        let upper = word.to_uppercase();
        if is_opcode(&upper) || is_known_tag(&upper) || tags.contains(&upper) {
            continue;
        }
        words += 1;
        if words >= 2 {
            return true;
        }
    }
    false
}

/// Picks the retrieval strategy for a query.
#[must_use]
pub fn determine_strategy(query: &str, filter_tags: &[String]) -> SearchStrategy {
    if filter_tags.is_empty() {
        return SearchStrategy::Semantic;
    }
    if has_natural_language(query, filter_tags) {
        SearchStrategy::Hybrid
    } else {
        SearchStrategy::Filtered
    }
}

/// Result of executing a strategy.
#[derive(Debug)]
pub struct Retrieval {
    /// Ranked, deduplicated, trimmed hits.
    pub hits: Vec<SearchHit>,
    /// Human-readable label for the mode that ran.
    pub mode: String,
}

/// Executes search strategies against the embedding provider and the index.
pub struct Retriever {
    embedder: EmbeddingClient,
    index: QdrantClient,
    limit: usize,
    fetch_limit: usize,
    min_score_ratio: f32,
}

impl Retriever {
    /// Builds a retriever from the query configuration.
    pub fn new(config: &QueryConfig) -> Result<Self> {
        let mut embedder = EmbeddingClient::new()?.with_model(config.embedding_model.clone());
        if let Some(key) = &config.api_key {
            embedder = embedder.with_api_key(key.clone());
        }

        Ok(Self {
            embedder,
            index: QdrantClient::new(config.qdrant_url.clone(), config.collection.clone())?,
            limit: config.limit,
            fetch_limit: config.effective_fetch_limit(),
            min_score_ratio: config.min_score_ratio,
        })
    }

    /// Probes the index before retrieval starts.
    pub fn check_connection(&self) -> Result<()> {
        self.index.check_connection()
    }

    /// Runs the chosen strategy: one embedding request, then one or two
    /// point searches, then merge and score-trim.
    ///
    /// # Errors
    ///
    /// Any failed request aborts the query. A hybrid run needs both
    /// searches to succeed; there is no fallback to a lesser strategy.
    pub fn retrieve(
        &self,
        text: &str,
        filter_tags: &[String],
        strategy: SearchStrategy,
    ) -> Result<Retrieval> {
        let vector = self.embedder.embed(text)?;
        tracing::debug!(
            strategy = strategy.as_str(),
            dimensions = vector.len(),
            "executing search"
        );

        match strategy {
            SearchStrategy::Hybrid => {
                let filtered = self.index.search(&vector, self.fetch_limit, Some(filter_tags))?;
                let unfiltered = self.index.search(&vector, self.fetch_limit, None)?;
                let merged = merge_results(filtered, unfiltered, self.fetch_limit);
                Ok(Retrieval {
                    hits: trim_by_score(merged, self.limit, self.min_score_ratio),
                    mode: format!("hybrid (filtered on {} + semantic)", filter_tags.join(", ")),
                })
            },
            SearchStrategy::Filtered => {
                let results = self.index.search(&vector, self.fetch_limit, Some(filter_tags))?;
                Ok(Retrieval {
                    hits: trim_by_score(results, self.limit, self.min_score_ratio),
                    mode: format!("filtered ({})", filter_tags.join(", ")),
                })
            },
            SearchStrategy::Semantic => {
                let results = self.index.search(&vector, self.fetch_limit, None)?;
                Ok(Retrieval {
                    hits: trim_by_score(results, self.limit, self.min_score_ratio),
                    mode: "semantic".to_string(),
                })
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("$D016", &[], false; "bare hex register")]
    #[test_case("CHROUT", &[], false; "bare kernal label")]
    #[test_case("EXTCOL BGCOL0", &[], false; "two register mnemonics")]
    #[test_case("STA $D020,7", &["$D020".to_string()], false; "opcode plus address")]
    #[test_case("what does $D020 do", &["$D020".to_string()], true; "question about address")]
    #[test_case("how do raster interrupts work", &[], true; "full prose")]
    #[test_case("53280, 13", &["$D020".to_string()], false; "poke idiom")]
    fn test_has_natural_language(query: &str, tags: &[String], expected: bool) {
        assert_eq!(has_natural_language(query, tags), expected);
    }

    #[test]
    fn test_strategy_hybrid() {
        let tags = vec!["$D020".to_string()];
        assert_eq!(
            determine_strategy("what does $D020 do", &tags),
            SearchStrategy::Hybrid
        );
    }

    #[test]
    fn test_strategy_filtered() {
        let tags = vec!["$D016".to_string()];
        assert_eq!(determine_strategy("$D016", &tags), SearchStrategy::Filtered);
    }

    #[test]
    fn test_strategy_semantic() {
        assert_eq!(
            determine_strategy("how does sprite multiplexing work", &[]),
            SearchStrategy::Semantic
        );
    }
}
