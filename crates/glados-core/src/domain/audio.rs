//! PCM audio buffers passed between synthesis and playback.

use std::time::Duration;

/// 16-bit signed mono PCM audio at a fixed sample rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waveform {
    /// PCM samples.
    pub samples: Vec<i16>,

    /// Sample rate of the audio in Hz.
    pub sample_rate: u32,
}

impl Waveform {
    #[must_use]
    pub const fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback duration of the buffer.
    #[must_use]
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        let micros = self.samples.len() as u64 * 1_000_000 / u64::from(self.sample_rate);
        Duration::from_micros(micros)
    }
}
