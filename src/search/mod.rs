//! Retrieval against the external vector index.

mod embedding;
mod qdrant;
mod strategy;

pub use embedding::EmbeddingClient;
pub use qdrant::{QdrantClient, merge_results, trim_by_score};
pub use strategy::{Retrieval, Retriever, determine_strategy, has_natural_language};
