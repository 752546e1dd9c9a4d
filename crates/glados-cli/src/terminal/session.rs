//! What the terminal does with each line of input and each frame.
//!
//! [`Session`] owns the [`Pipeline`] and the model catalog and collects
//! the lines to print; the frame loop in the parent module only moves
//! input in and output out. Keeping terminal I/O out of here lets the
//! whole interaction be driven from tests.

use glados_core::{ModelDescriptor, Pipeline, SubmitOutcome};

use crate::presentation::{HELP_LINES, WELCOME, model_table, reply_line, system_line};

use super::command::{Command, ModelSelector};

/// Whether the loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// State of one interactive session.
pub struct Session {
    pipeline: Pipeline,
    catalog: Vec<ModelDescriptor>,
    output: Vec<String>,
}

impl Session {
    pub fn new(pipeline: Pipeline, catalog: Vec<ModelDescriptor>) -> Self {
        Self {
            pipeline,
            catalog,
            output: Vec::new(),
        }
    }

    /// Print the greeting and the current speech state.
    pub fn greet(&mut self) {
        self.output.push(WELCOME.to_string());
        self.output
            .push("Type /models to pick a model, /tts to toggle speech, /help for more.".to_string());
        let speech = if !self.pipeline.has_speech() {
            "TTS unavailable"
        } else if self.pipeline.speech_enabled() {
            "TTS enabled"
        } else {
            "TTS disabled"
        };
        self.system(speech);
    }

    /// Activate the model configured for startup, if any.
    ///
    /// A failure is reported and the session continues without a model.
    pub fn activate_startup_model(&mut self, model: Option<&str>) {
        if let Some(model) = model {
            self.switch_to(model);
        }
    }

    /// React to one line of input.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        match Command::parse(line) {
            Command::Say(text) => self.say(&text),
            Command::ListModels => self.list_models(),
            Command::SelectModel(selector) => self.select_model(&selector),
            Command::NextModel => self.next_model(),
            Command::ToggleSpeech => self.toggle_speech(),
            Command::Reset => self.reset(),
            Command::Help => self.output.extend(HELP_LINES.iter().map(ToString::to_string)),
            Command::Quit => return Flow::Quit,
            Command::Nothing => {}
            Command::Invalid(message) => self.system(&message),
        }
        Flow::Continue
    }

    /// Per-frame work: deliver a finished reply, if any.
    pub fn tick(&mut self) {
        if let Some(reply) = self.pipeline.poll_reply() {
            self.output
                .push(reply_line(&reply, self.pipeline.speech_enabled()));
            self.pipeline.speak(&reply);
        }
    }

    /// Lines produced since the last call.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    #[must_use]
    pub const fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    #[must_use]
    pub fn catalog(&self) -> &[ModelDescriptor] {
        &self.catalog
    }

    fn system(&mut self, message: &str) {
        self.output.push(system_line(message));
    }

    fn say(&mut self, text: &str) {
        if self.pipeline.active_model().is_some() && !self.pipeline.can_submit() {
            let message = if self.pipeline.is_generation_busy() {
                "Still thinking, wait for the reply"
            } else {
                "Still speaking, wait a moment"
            };
            self.system(message);
            return;
        }

        match self.pipeline.submit_user_text(text) {
            SubmitOutcome::Accepted => {}
            SubmitOutcome::Busy => self.system("Still thinking, wait for the reply"),
            SubmitOutcome::NoActiveModel => self.system("Select a model first (/models)"),
        }
    }

    fn list_models(&mut self) {
        let rows = model_table(&self.catalog, self.pipeline.active_model());
        self.output.extend(rows);
    }

    fn select_model(&mut self, selector: &ModelSelector) {
        let name = match selector {
            ModelSelector::Index(index) => match index
                .checked_sub(1)
                .and_then(|position| self.catalog.get(position))
            {
                Some(model) => model.name.clone(),
                None => {
                    self.system(&format!("No model number {index}, see /models"));
                    return;
                }
            },
            ModelSelector::Name(name) => name.clone(),
        };
        self.switch_to(&name);
    }

    fn next_model(&mut self) {
        if self.catalog.is_empty() {
            self.system("No models available");
            return;
        }
        let next = self
            .pipeline
            .active_model()
            .and_then(|active| self.catalog.iter().position(|m| m.name == active))
            .map_or(0, |current| (current + 1) % self.catalog.len());
        let name = self.catalog[next].name.clone();
        self.switch_to(&name);
    }

    fn switch_to(&mut self, model: &str) {
        self.system(&format!("Connecting to {model}..."));
        match self.pipeline.switch_model(model) {
            Ok(()) => self.system(&format!("Now using {model}")),
            Err(e) => {
                tracing::warn!(model, error = %e, "Model activation failed");
                self.system(&format!("Could not connect to {model}, no model selected"));
            }
        }
    }

    fn toggle_speech(&mut self) {
        if !self.pipeline.has_speech() {
            self.system("TTS unavailable");
            return;
        }
        let enabled = self
            .pipeline
            .set_speech_enabled(!self.pipeline.speech_enabled());
        self.system(if enabled { "TTS enabled" } else { "TTS disabled" });
    }

    fn reset(&mut self) {
        if self.pipeline.active_model().is_none() {
            self.system("Select a model first (/models)");
        } else if self.pipeline.reset_conversation() {
            self.system("Conversation cleared");
        } else {
            self.system("Still thinking, wait for the reply");
        }
    }
}
