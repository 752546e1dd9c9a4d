//! Ollama chat backend for GLaDOS Terminal.
//!
//! Implements [`glados_core::ChatBackendPort`] over the `/api/tags` and
//! `/api/chat` endpoints of a locally running Ollama server.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod models;

// ============================================================================
// Public API
// ============================================================================

pub use client::OllamaClient;
pub use config::{DEFAULT_BASE_URL, OllamaConfig};
pub use error::{OllamaError, OllamaResult};
