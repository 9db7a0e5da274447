pub mod pipeline;
pub mod state;

pub use pipeline::LivePipeline;
pub use state::{PipelineError, PipelineErrorKind, PipelinePhase, PipelineState};
