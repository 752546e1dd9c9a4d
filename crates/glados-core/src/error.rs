//! Pipeline-level errors.

use thiserror::Error;

use crate::ports::BackendError;

/// Errors that escape the pipeline to its caller.
///
/// Inference and synthesis failures never appear here: they degrade to a
/// fallback reply or a skipped segment inside the background tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// The model never became ready.
    #[error("Could not connect to model '{model}' after {attempts} attempts: {source}")]
    Connection {
        model: String,
        attempts: u32,
        #[source]
        source: BackendError,
    },
}

impl PipelineError {
    /// Name of the model the failed operation targeted.
    #[must_use]
    pub fn model(&self) -> &str {
        match self {
            Self::Connection { model, .. } => model,
        }
    }
}
