//! Spoken replies for GLaDOS Terminal.
//!
//! # Architecture
//!
//! - [`SpeechWorker`] implements [`glados_core::SpeechOutputPort`]: one
//!   background task per reply, single-flight.
//! - [`text`] segments replies into clauses; [`audio`] trims and joins
//!   the synthesized clips.
//! - [`HttpSpeechSynthesizer`] talks to an OpenAI-compatible speech server.
//! - [`AudioThreadHandle`] plays buffers on a dedicated rodio thread.
#![deny(unused_crate_dependencies)]

pub mod audio;
pub mod audio_thread;
pub mod error;
pub mod playback;
pub mod text;
pub mod tts;
pub mod worker;

pub use audio_thread::AudioThreadHandle;
pub use error::VoiceError;
pub use tts::{HttpSpeechSynthesizer, HttpTtsConfig, decode_pcm16le};
pub use worker::SpeechWorker;

#[cfg(test)]
use tokio_test as _;
