//! Core of GLaDOS Terminal.
//!
//! Domain types, the ports that backends and speech engines implement, and
//! the asynchronous generation pipeline that the interactive loop drives
//! once per frame.
#![deny(unused_crate_dependencies)]

pub mod busy;
pub mod domain;
pub mod error;
pub mod mailbox;
pub mod paths;
pub mod ports;
pub mod retry;
pub mod services;
pub mod settings;
pub mod text;

// Re-export commonly used types for convenience
pub use busy::{BusyFlag, BusyGuard, WorkerState};
pub use domain::{
    ChatMessage, ConversationHistory, MessageRole, ModelDescriptor, SHORT_ID_LEN, Waveform,
    fallback_catalog, format_size,
};
pub use error::PipelineError;
pub use mailbox::{Mailbox, MailboxSender, mailbox};
pub use paths::{APP_DIR_NAME, config_root, env_file_path, settings_path};
pub use ports::{
    BackendError, ChatBackendPort, PlaybackSinkPort, SpeechOutputPort, SpeechSynthesizerPort,
    SynthesisError,
};
pub use retry::{RetryPolicy, retry_async};
pub use services::{
    GenerationConfig, GenerationWorker, ModelLifecycleManager, Pipeline, SubmitOutcome,
};
pub use settings::{Settings, SettingsError, validate_settings};
pub use text::{FALLBACK_REPLY, collapse_whitespace, normalize_reply};

#[cfg(test)]
use tokio_test as _;
