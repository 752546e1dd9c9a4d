//! Speech ports — synthesis engine, playback sink, and the speech stage
//! as seen by the pipeline façade.
//!
//! # Design Rules
//!
//! - The core never depends on `glados-voice`; the voice crate implements
//!   [`SpeechOutputPort`] and the façade only sees the trait object.
//! - [`PlaybackSinkPort::play`] is fire-and-forget. Device errors are the
//!   sink's concern and are logged there.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Waveform;

/// Errors reported by a speech synthesizer for a single piece of text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SynthesisError {
    /// The synthesis engine rejected the request or was unreachable.
    #[error("Speech synthesis failed: {0}")]
    Backend(String),

    /// The engine answered with audio that could not be decoded.
    #[error("Invalid synthesized audio: {0}")]
    InvalidAudio(String),
}

/// Backend-agnostic text-to-speech engine.
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    /// Synthesize one short clause into mono 16-bit PCM.
    async fn synthesize(&self, text: &str) -> Result<Waveform, SynthesisError>;

    /// Output sample rate (Hz) of every waveform this engine produces.
    fn sample_rate(&self) -> u32;
}

/// Audio output capability.
pub trait PlaybackSinkPort: Send + Sync {
    /// Start playing the waveform and return immediately.
    ///
    /// Ownership of the buffer moves to the sink.
    fn play(&self, waveform: Waveform);

    /// Stop whatever is playing.
    fn stop(&self);
}

/// The speech stage of the pipeline.
pub trait SpeechOutputPort: Send + Sync {
    /// Speak a finished reply in the background.
    ///
    /// Returns `false` (and does nothing) while a previous reply is still
    /// being synthesized.
    fn submit(&self, text: &str) -> bool;

    /// Whether a synthesis task is in flight.
    fn is_busy(&self) -> bool;

    /// Stop playback now, and drop the audio of a reply that is still
    /// being synthesized instead of playing it when it is ready.
    fn silence(&self);
}
