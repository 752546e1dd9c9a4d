//! The pipeline façade.
//!
//! [`Pipeline`] is the only surface the interactive loop touches. It holds
//! the active generation worker, the optional speech output, and the
//! speech toggle; everything else lives in the workers.
//!
//! All methods are non-blocking except [`Pipeline::switch_model`], which
//! waits for the new model to warm up.

use std::sync::Arc;

use crate::domain::ChatMessage;
use crate::error::PipelineError;
use crate::ports::SpeechOutputPort;

use super::generation::GenerationWorker;
use super::lifecycle::ModelLifecycleManager;

/// Result of handing user text to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A background request was started.
    Accepted,
    /// A request is already in flight; the text was dropped.
    Busy,
    /// No model is active; the text was dropped.
    NoActiveModel,
}

/// Façade over model lifecycle, generation and speech.
pub struct Pipeline {
    lifecycle: ModelLifecycleManager,
    system_prompt: String,
    active: Option<GenerationWorker>,
    speech: Option<Arc<dyn SpeechOutputPort>>,
    speech_enabled: bool,
}

impl Pipeline {
    /// Pipeline with no active model and no speech output.
    pub fn new(lifecycle: ModelLifecycleManager, system_prompt: impl Into<String>) -> Self {
        Self {
            lifecycle,
            system_prompt: system_prompt.into(),
            active: None,
            speech: None,
            speech_enabled: false,
        }
    }

    /// Install a speech output stage.
    #[must_use]
    pub fn with_speech(mut self, speech: Arc<dyn SpeechOutputPort>, enabled: bool) -> Self {
        self.speech = Some(speech);
        self.speech_enabled = enabled;
        self
    }

    /// Hand user text to the active model.
    pub fn submit_user_text(&self, text: &str) -> SubmitOutcome {
        let Some(worker) = &self.active else {
            return SubmitOutcome::NoActiveModel;
        };
        if worker.submit(text) {
            SubmitOutcome::Accepted
        } else {
            SubmitOutcome::Busy
        }
    }

    /// Take a finished reply if one is ready. Call once per frame.
    pub fn poll_reply(&mut self) -> Option<String> {
        self.active.as_mut().and_then(GenerationWorker::poll)
    }

    /// Forward a reply to speech output when speech is enabled.
    ///
    /// Returns `true` if synthesis was started.
    pub fn speak(&self, text: &str) -> bool {
        match &self.speech {
            Some(speech) if self.speech_enabled => speech.submit(text),
            _ => false,
        }
    }

    /// Turn speech on or off. Returns the resulting state, which stays off
    /// when no speech output is installed.
    ///
    /// Turning speech off silences the reply being spoken, including one
    /// still being synthesized.
    pub fn set_speech_enabled(&mut self, enabled: bool) -> bool {
        if !enabled {
            if let Some(speech) = &self.speech {
                speech.silence();
            }
        }
        self.speech_enabled = enabled && self.speech.is_some();
        tracing::debug!(enabled = self.speech_enabled, "Speech output toggled");
        self.speech_enabled
    }

    #[must_use]
    pub const fn speech_enabled(&self) -> bool {
        self.speech_enabled
    }

    #[must_use]
    pub const fn has_speech(&self) -> bool {
        self.speech.is_some()
    }

    /// Replace the active model, blocking until it is warm.
    ///
    /// The previous worker is dropped first, so on failure no model is
    /// active. An in-flight request of the previous worker finishes in the
    /// background and its reply is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Connection`] when the model never answers
    /// the warm-up exchange.
    ///
    /// # Panics
    ///
    /// Panics if called from within an async context, because it blocks on
    /// the runtime.
    pub fn switch_model(&mut self, model: &str) -> Result<(), PipelineError> {
        if let Some(previous) = self.active.take() {
            tracing::info!(from = previous.model(), to = model, "Switching model");
        }

        let worker = self
            .lifecycle
            .runtime()
            .block_on(self.lifecycle.activate(model, &self.system_prompt))?;
        self.active = Some(worker);
        Ok(())
    }

    /// Reset the active conversation to the system prompt.
    ///
    /// Returns `false` when there is no model or a request is in flight.
    pub fn reset_conversation(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|worker| worker.clear_history(&self.system_prompt))
    }

    #[must_use]
    pub fn is_generation_busy(&self) -> bool {
        self.active.as_ref().is_some_and(GenerationWorker::is_busy)
    }

    #[must_use]
    pub fn is_synthesis_busy(&self) -> bool {
        self.speech.as_ref().is_some_and(|speech| speech.is_busy())
    }

    /// Whether new text would be accepted right now.
    ///
    /// While speech is on, input also waits for the previous reply to
    /// finish synthesizing.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.active.is_some()
            && !self.is_generation_busy()
            && !(self.speech_enabled && self.is_synthesis_busy())
    }

    #[must_use]
    pub fn active_model(&self) -> Option<&str> {
        self.active.as_ref().map(GenerationWorker::model)
    }

    #[must_use]
    pub const fn active_worker(&self) -> Option<&GenerationWorker> {
        self.active.as_ref()
    }

    /// Conversation of the active model; empty when none is active.
    #[must_use]
    pub fn history(&self) -> Vec<ChatMessage> {
        self.active
            .as_ref()
            .map(GenerationWorker::history)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}
