//! Chat backend port — the generation engine as seen by the pipeline.
//!
//! Implementations wrap a locally hosted model server. Calls may block for
//! seconds and may fail transiently; retry policy lives in the pipeline,
//! not in implementations.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ChatMessage, ModelDescriptor};

/// Errors reported by a chat backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// The backend could not be reached or refused the model.
    #[error("Backend unreachable: {0}")]
    Connection(String),

    /// A chat request failed or produced no usable reply.
    #[error("Inference failed: {0}")]
    Inference(String),

    /// The model catalog could not be listed.
    #[error("Model catalog unavailable: {0}")]
    Catalog(String),
}

/// Port for the text-generation engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatBackendPort: Send + Sync {
    /// List the models the backend can serve.
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, BackendError>;

    /// Perform a trivial exchange so the model is loaded and ready.
    ///
    /// Failures are reported as [`BackendError::Connection`].
    async fn warm_up(&self, model: &str) -> Result<(), BackendError>;

    /// Generate the next assistant message for the given history.
    ///
    /// Returns the raw reply text. Failures are reported as
    /// [`BackendError::Inference`].
    async fn chat(&self, model: &str, history: &[ChatMessage]) -> Result<String, BackendError>;
}
