//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core pipeline expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or `rodio` types in any signature
//! - Retry and fallback policy belongs to the pipeline, never to a port

pub mod chat_backend;
pub mod speech;

pub use chat_backend::{BackendError, ChatBackendPort};
pub use speech::{PlaybackSinkPort, SpeechOutputPort, SpeechSynthesizerPort, SynthesisError};

#[cfg(test)]
pub use chat_backend::MockChatBackendPort;
