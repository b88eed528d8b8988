//! Configuration management.

/// Main configuration for a query run.
///
/// Endpoint and model values come from CLI flags or their environment
/// variables; the remaining fields carry tuning defaults that match the
/// indexed collection.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Base URL of the Qdrant instance.
    pub qdrant_url: String,
    /// Name of the collection holding the knowledge base.
    pub collection: String,
    /// Embedding model identifier.
    pub embedding_model: String,
    /// Embedding-provider API key, if configured.
    pub api_key: Option<String>,
    /// Maximum number of results to display.
    pub limit: usize,
    /// Over-fetch size requested from the index before merging and trimming.
    pub fetch_limit: usize,
    /// Fraction of the best score below which results are discarded.
    pub min_score_ratio: f32,
}

impl QueryConfig {
    /// Default Qdrant endpoint.
    pub const DEFAULT_QDRANT_URL: &'static str = "http://localhost:6333";

    /// Default collection name.
    pub const DEFAULT_COLLECTION: &'static str = "c64_training";

    /// Default embedding model.
    pub const DEFAULT_EMBEDDING_MODEL: &'static str = "text-embedding-3-large";

    /// Default display limit.
    pub const DEFAULT_LIMIT: usize = 15;

    /// Default over-fetch size.
    pub const DEFAULT_FETCH_LIMIT: usize = 20;

    /// Default score-trim ratio.
    pub const DEFAULT_MIN_SCORE_RATIO: f32 = 0.6;

    /// Sets the display limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Effective per-search fetch size: never below the display limit.
    #[must_use]
    pub fn effective_fetch_limit(&self) -> usize {
        self.fetch_limit.max(self.limit)
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            qdrant_url: Self::DEFAULT_QDRANT_URL.to_string(),
            collection: Self::DEFAULT_COLLECTION.to_string(),
            embedding_model: Self::DEFAULT_EMBEDDING_MODEL.to_string(),
            api_key: None,
            limit: Self::DEFAULT_LIMIT,
            fetch_limit: Self::DEFAULT_FETCH_LIMIT,
            min_score_ratio: Self::DEFAULT_MIN_SCORE_RATIO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QueryConfig::default();
        assert_eq!(config.qdrant_url, "http://localhost:6333");
        assert_eq!(config.collection, "c64_training");
        assert_eq!(config.limit, 15);
        assert_eq!(config.fetch_limit, 20);
        assert!((config.min_score_ratio - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fetch_limit_never_below_display_limit() {
        let config = QueryConfig::default().with_limit(50);
        assert_eq!(config.effective_fetch_limit(), 50);

        let config = QueryConfig::default().with_limit(5);
        assert_eq!(config.effective_fetch_limit(), 20);
    }
}
