//! Subcommands of the `glados` binary.

use clap::Subcommand;

/// Available commands. Running `glados` without one starts a chat.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Start the interactive terminal (default)
    Chat,

    /// List the models the Ollama server offers
    Models,
}
