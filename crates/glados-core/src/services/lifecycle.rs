//! Model activation.
//!
//! A model is only handed to the pipeline once a warm-up exchange has
//! succeeded. Activation builds a brand new [`GenerationWorker`]; nothing
//! from a previous worker carries over.

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::error::PipelineError;
use crate::ports::ChatBackendPort;
use crate::retry::{RetryPolicy, retry_async};

use super::generation::{GenerationConfig, GenerationWorker};

/// Creates generation workers for models that have proven reachable.
pub struct ModelLifecycleManager {
    backend: Arc<dyn ChatBackendPort>,
    connect: RetryPolicy,
    generation: GenerationConfig,
    runtime: Handle,
}

impl ModelLifecycleManager {
    /// Manager with the default connect and inference policies.
    pub fn new(backend: Arc<dyn ChatBackendPort>, runtime: Handle) -> Self {
        Self {
            backend,
            connect: RetryPolicy::connect(),
            generation: GenerationConfig::default(),
            runtime,
        }
    }

    #[must_use]
    pub const fn with_connect_policy(mut self, policy: RetryPolicy) -> Self {
        self.connect = policy;
        self
    }

    #[must_use]
    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation = config;
        self
    }

    /// Runtime that background work is spawned on.
    #[must_use]
    pub const fn runtime(&self) -> &Handle {
        &self.runtime
    }

    /// The backend shared by every worker this manager creates.
    #[must_use]
    pub fn backend(&self) -> Arc<dyn ChatBackendPort> {
        Arc::clone(&self.backend)
    }

    /// Warm `model` up and return a ready worker for it.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Connection`] with the last backend error
    /// once every connect attempt has failed.
    pub async fn activate(
        &self,
        model: &str,
        system_prompt: &str,
    ) -> Result<GenerationWorker, PipelineError> {
        tracing::info!(model, "Connecting to model");

        let backend = &self.backend;
        retry_async(self.connect, "warm_up", |attempt| async move {
            tracing::debug!(model, attempt, "Warm-up attempt");
            backend.warm_up(model).await
        })
        .await
        .map_err(|source| PipelineError::Connection {
            model: model.to_string(),
            attempts: self.connect.max_attempts,
            source,
        })?;

        tracing::info!(model, "Model ready");
        Ok(GenerationWorker::new(
            model,
            system_prompt,
            Arc::clone(&self.backend),
            self.generation.clone(),
            self.runtime.clone(),
        ))
    }
}
