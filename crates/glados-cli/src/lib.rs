//! Interactive terminal for GLaDOS.
//!
//! The binary wires the Ollama backend and the speech stage into a
//! [`glados_core::Pipeline`] and drives it from a 30 FPS frame loop with
//! line input on its own thread.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tokio_test as _;

// Used by main.rs only
use anyhow as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod terminal;

// Re-export primary types for convenient access
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
pub use terminal::{Flow, Session};
