//! Voice error types.

/// Errors that can occur while setting up or driving audio output.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    /// Failed to open audio output stream.
    #[error("Failed to open audio output stream: {0}")]
    OutputStreamError(String),

    /// The dedicated audio thread is gone.
    #[error("Audio thread is not running")]
    AudioThreadDied,

    /// The speech server client could not be configured.
    #[error("Invalid speech server configuration: {0}")]
    Config(String),
}
