//! Audio playback via `rodio`.
//!
//! [`AudioPlayback`] owns the output stream and must stay on the thread
//! that created it; [`crate::audio_thread`] provides the `Send + Sync`
//! proxy used by the rest of the crate.

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};

use crate::error::VoiceError;

/// Default-device playback of mono PCM buffers.
pub struct AudioPlayback {
    /// rodio output stream (must be kept alive).
    _stream: OutputStream,

    /// Handle used to create sinks.
    stream_handle: OutputStreamHandle,

    /// Current playback sink (if any).
    sink: Option<Sink>,
}

impl AudioPlayback {
    /// Open the default output device.
    pub fn new() -> Result<Self, VoiceError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| VoiceError::OutputStreamError(e.to_string()))?;

        tracing::info!("Audio playback initialized on default output device");

        Ok(Self {
            _stream: stream,
            stream_handle,
            sink: None,
        })
    }

    /// Start playing 16-bit mono samples, replacing anything still playing.
    pub fn play(&mut self, samples: Vec<i16>, sample_rate: u32) -> Result<(), VoiceError> {
        self.stop();

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| VoiceError::OutputStreamError(e.to_string()))?;
        let sample_count = samples.len();
        sink.append(SamplesBuffer::new(1, sample_rate, samples));
        self.sink = Some(sink);

        tracing::debug!(samples = sample_count, sample_rate, "Playback started");
        Ok(())
    }

    /// Stop any active playback immediately.
    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
            tracing::debug!("Audio playback stopped");
        }
    }
}
