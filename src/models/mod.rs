//! Data models for c64query.
//!
//! Request-scoped value objects shared across the enrichment and search
//! modules. Nothing here holds state beyond one query.

mod numeric;
mod search;

pub use numeric::{NumericBase, NumericToken, to_binary, to_hex};
pub use search::{ChunkPayload, ChunkReference, PointId, SearchHit, SearchStrategy};
