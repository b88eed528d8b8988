//! # c64query
//!
//! Query enrichment and hybrid retrieval for a Commodore 64 knowledge base.
//!
//! c64query takes a free-text query that may mix natural language with
//! hardware register addresses, numeric literals, instruction mnemonics and
//! symbolic labels, enriches it with alternate-base and memory-map context,
//! and retrieves matching knowledge chunks from a Qdrant collection using a
//! keyword-filtered, semantic, or hybrid search strategy.
//!
//! ## Example
//!
//! ```rust,ignore
//! use c64query::enrichment::EnrichmentPipeline;
//!
//! let pipeline = EnrichmentPipeline::new();
//! let enriched = pipeline.run("what does $D020 do");
//! println!("{}", enriched.text());
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (detects duplicate transitive dependencies).
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod enrichment;
pub mod models;
pub mod rendering;
pub mod search;
pub mod services;

// Re-exports for convenience
pub use config::QueryConfig;
pub use enrichment::{EnrichedQuery, EnrichmentPipeline};
pub use models::{ChunkPayload, ChunkReference, NumericToken, SearchHit, SearchStrategy};
pub use search::{EmbeddingClient, QdrantClient, Retriever};
pub use services::{PipelineOptions, PipelineOutcome, QueryPipeline};

/// Error type for c64query operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `Configuration` | Missing embedding-provider credential |
/// | `Connectivity` | Vector index unreachable at the startup probe |
/// | `UpstreamRequest` | Embedding or search request fails mid-query |
/// | `InvalidInput` | Empty query text, malformed CLI input |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Configuration is incomplete.
    ///
    /// Raised before any network call, e.g. when `OPENAI_API_KEY` is not
    /// set and the invocation needs an embedding.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The vector index could not be reached.
    ///
    /// Raised by the startup connectivity probe. Retrieval never starts
    /// when this is returned.
    #[error("cannot reach vector index at {endpoint}: {cause}")]
    Connectivity {
        /// The endpoint that was probed.
        endpoint: String,
        /// The underlying cause.
        cause: String,
    },

    /// An upstream request failed.
    ///
    /// Raised when:
    /// - The embedding request returns a non-success status or network fault
    /// - A point search against the index fails
    ///
    /// These abort the whole query; a partial result is never returned.
    #[error("request '{operation}' failed: {cause}")]
    UpstreamRequest {
        /// The request that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for c64query operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Configuration("OPENAI_API_KEY not set".to_string());
        assert_eq!(err.to_string(), "configuration error: OPENAI_API_KEY not set");

        let err = Error::Connectivity {
            endpoint: "http://localhost:6333".to_string(),
            cause: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("http://localhost:6333"));
        assert!(err.to_string().contains("connection refused"));

        let err = Error::UpstreamRequest {
            operation: "embedding".to_string(),
            cause: "status 500".to_string(),
        };
        assert_eq!(err.to_string(), "request 'embedding' failed: status 500");
    }
}
