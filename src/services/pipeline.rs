//! End-to-end query pipeline.
//!
//! Connects token extraction → enrichment passes → classification →
//! retrieval → rendering. The orchestrator is generic over pass output: it
//! concatenates annotations and collects filter tags without knowing what
//! any pass does.

use crate::config::QueryConfig;
use crate::enrichment::{EnrichedQuery, EnrichmentPipeline};
use crate::models::SearchHit;
use crate::rendering::format_results;
use crate::search::{Retriever, determine_strategy};
use crate::{Error, Result};

/// Behavior switches for one pipeline run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    /// Skip enrichment and pass the query through verbatim.
    pub raw: bool,
    /// Stop after enrichment; never touch the network.
    pub enrich_only: bool,
}

/// Everything a pipeline run produced.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// The enriched query text that was (or would be) embedded.
    pub enriched_query: String,
    /// Keyword filter tags extracted from the query.
    pub filter_tags: Vec<String>,
    /// Human-readable label of the search mode that ran; empty for
    /// enrich-only runs.
    pub mode: String,
    /// Ranked hits.
    pub hits: Vec<SearchHit>,
    /// Rendered output for stdout.
    pub formatted: String,
}

/// The query pipeline service.
pub struct QueryPipeline {
    config: QueryConfig,
    enrichment: EnrichmentPipeline,
    retriever: Retriever,
}

impl QueryPipeline {
    /// Creates a pipeline from the query configuration.
    ///
    /// Building the clients performs no network traffic, so an
    /// enrich-only run works without credentials or a reachable index.
    pub fn new(config: QueryConfig) -> Result<Self> {
        let retriever = Retriever::new(&config)?;
        Ok(Self {
            config,
            enrichment: EnrichmentPipeline::new(),
            retriever,
        })
    }

    /// Verifies the embedding credential is configured.
    pub fn ensure_credentials(&self) -> Result<()> {
        if self.config.api_key.is_none() && std::env::var("OPENAI_API_KEY").is_err() {
            return Err(Error::Configuration(
                "OPENAI_API_KEY not set (required unless --enrich-only)".to_string(),
            ));
        }
        Ok(())
    }

    /// Probes the vector index.
    pub fn check_connection(&self) -> Result<()> {
        self.retriever.check_connection()
    }

    /// Runs the pipeline for one query.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty query and propagates
    /// any embedding or search failure unchanged; a failed request aborts
    /// the query rather than degrading to partial results.
    pub fn execute(&self, query: &str, options: PipelineOptions) -> Result<PipelineOutcome> {
        if query.trim().is_empty() {
            return Err(Error::InvalidInput("query text is empty".to_string()));
        }

        let enriched = if options.raw {
            EnrichedQuery::unchanged(query.to_string())
        } else {
            self.enrichment.run(query)
        };

        let enriched_text = enriched.text();
        tracing::debug!(
            tags = enriched.filter_tags.len(),
            annotated = enriched.is_annotated(),
            "query enriched"
        );

        if options.enrich_only {
            return Ok(PipelineOutcome {
                formatted: enriched_text.clone(),
                enriched_query: enriched_text,
                filter_tags: enriched.filter_tags,
                mode: String::new(),
                hits: Vec::new(),
            });
        }

        let strategy = determine_strategy(&enriched.original, &enriched.filter_tags);
        tracing::debug!(strategy = strategy.as_str(), "strategy selected");
        let retrieval =
            self.retriever
                .retrieve(&enriched_text, &enriched.filter_tags, strategy)?;

        let formatted = format_results(&retrieval.hits, &retrieval.mode);

        Ok(PipelineOutcome {
            enriched_query: enriched_text,
            filter_tags: enriched.filter_tags,
            mode: retrieval.mode,
            hits: retrieval.hits,
            formatted,
        })
    }
}
