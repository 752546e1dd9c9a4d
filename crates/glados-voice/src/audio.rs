//! PCM post-processing between synthesis and playback.

use glados_core::Waveform;

/// Samples at or below this absolute amplitude count as silence.
pub const SILENCE_THRESHOLD: i32 = 400;

/// Samples kept after the last non-silent one.
pub const TRAILING_PADDING: usize = 400;

/// Length a buffer keeps after trailing-silence trimming.
///
/// Returns the full length when nothing rises above the threshold, so a
/// quiet buffer is passed through rather than emptied.
#[must_use]
pub fn trimmed_len(samples: &[i16]) -> usize {
    samples
        .iter()
        .rposition(|&s| i32::from(s).abs() > SILENCE_THRESHOLD)
        .map_or(samples.len(), |last_loud| {
            samples.len().min(last_loud + TRAILING_PADDING)
        })
}

/// Cut the silent tail off a waveform. Applying it twice changes nothing.
#[must_use]
pub fn trim_trailing_silence(mut waveform: Waveform) -> Waveform {
    let keep = trimmed_len(&waveform.samples);
    waveform.samples.truncate(keep);
    waveform
}

/// Join waveforms in order into one buffer at `sample_rate`.
///
/// Segments recorded at any other rate are dropped, since appending them
/// would play them at the wrong pitch. Returns `None` when there is
/// nothing to play.
#[must_use]
pub fn concatenate<I>(waveforms: I, sample_rate: u32) -> Option<Waveform>
where
    I: IntoIterator<Item = Waveform>,
{
    let mut samples = Vec::new();
    for waveform in waveforms {
        if waveform.sample_rate != sample_rate {
            tracing::warn!(
                expected = sample_rate,
                actual = waveform.sample_rate,
                "Dropping segment with mismatched sample rate"
            );
            continue;
        }
        samples.extend_from_slice(&waveform.samples);
    }

    if samples.is_empty() {
        None
    } else {
        Some(Waveform::new(samples, sample_rate))
    }
}
