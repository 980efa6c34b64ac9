use thiserror::Error;

/// Errors that stop the frame pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Command sink closed")]
    SinkClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
