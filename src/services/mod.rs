//! Service layer.

mod pipeline;

pub use pipeline::{PipelineOptions, PipelineOutcome, QueryPipeline};
