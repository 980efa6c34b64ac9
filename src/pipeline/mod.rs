//! Frame pipeline
//!
//! Routes landmark frames through the active mode and delivers the
//! resulting commands.

pub mod engine;
pub mod error;
pub mod runner;

pub use engine::{GestureEngine, Mode};
pub use error::{PipelineError, PipelineResult};
pub use runner::{run_pipeline, RunStats};
