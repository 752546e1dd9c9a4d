//! CLI-specific error types and mappings.
//!
//! Maps the errors of the other crates to exit codes and user-facing
//! messages.

use glados_core::{PipelineError, SettingsError};
use glados_ollama::OllamaError;
use glados_voice::VoiceError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error (terminal unavailable, unreadable file, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The model backend could not be reached or used.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Audio device, thread or runtime failure.
    #[error("Process error: {0}")]
    Process(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error (reported by `main` for anything else)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Backend(_) => 69,  // EX_UNAVAILABLE
            Self::Process(_) => 71,  // EX_OSERR
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Io { .. } => Self::Io(err.to_string()),
            _ => Self::Config(err.to_string()),
        }
    }
}

impl From<PipelineError> for CliError {
    fn from(err: PipelineError) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<OllamaError> for CliError {
    fn from(err: OllamaError) -> Self {
        match err {
            OllamaError::InvalidUrl(_) => Self::Config(err.to_string()),
            _ => Self::Backend(err.to_string()),
        }
    }
}

impl From<VoiceError> for CliError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::Config(msg) => Self::Config(msg),
            _ => Self::Process(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_errors_are_config_errors() {
        let err = CliError::from(SettingsError::EmptySystemPrompt);
        assert_eq!(err.exit_code(), 78);

        let err = CliError::from(SettingsError::Io {
            path: "/nowhere/settings.json".to_string(),
            reason: "permission denied".to_string(),
        });
        assert_eq!(err.exit_code(), 74);
    }

    #[test]
    fn voice_config_error_keeps_message() {
        let err = CliError::from(VoiceError::Config("bad client".to_string()));
        assert!(matches!(err, CliError::Config(ref msg) if msg == "bad client"));
        assert_eq!(CliError::from(VoiceError::AudioThreadDied).exit_code(), 71);
    }
}
