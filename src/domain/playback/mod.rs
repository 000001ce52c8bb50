// Dashboard quarter auto-play
pub mod quarter_cycle;

// Semantic search diagram reveal
pub mod process_pipeline;

pub use process_pipeline::{PipelineStep, ProcessPipeline, SEMANTIC_SEARCH_STEPS};
pub use quarter_cycle::QuarterCycle;
