//! Speech synthesis worker.
//!
//! Turns a finished reply into one playback buffer in the background:
//! segment, synthesize each clause, trim trailing silence, concatenate,
//! and hand the result to the playback sink in a single call.
//!
//! [`SpeechOutputPort::silence`] bumps an epoch. A task that finishes
//! synthesizing under an older epoch drops its audio instead of playing it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use glados_core::{
    BusyFlag, BusyGuard, PlaybackSinkPort, SpeechOutputPort, SpeechSynthesizerPort,
};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::audio::{concatenate, trim_trailing_silence};
use crate::text::prepare_for_speech;

/// Background speech stage with single-flight submission.
pub struct SpeechWorker {
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    sink: Arc<dyn PlaybackSinkPort>,
    busy: BusyFlag,
    epoch: Arc<AtomicU64>,
    task: Mutex<Option<JoinHandle<()>>>,
    runtime: Handle,
}

impl SpeechWorker {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        sink: Arc<dyn PlaybackSinkPort>,
        runtime: Handle,
    ) -> Self {
        Self {
            synthesizer,
            sink,
            busy: BusyFlag::new(),
            epoch: Arc::new(AtomicU64::new(0)),
            task: Mutex::new(None),
            runtime,
        }
    }

    /// Handle on the busy flag.
    #[must_use]
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    /// Wait for the most recently spawned task to finish.
    pub async fn join_in_flight(&self) {
        let handle = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Speech task aborted");
            }
        }
    }
}

impl SpeechOutputPort for SpeechWorker {
    fn submit(&self, text: &str) -> bool {
        let Some(guard) = self.busy.try_acquire() else {
            tracing::debug!("Speech busy, dropping reply");
            return false;
        };

        let job = SpeechJob {
            synthesizer: Arc::clone(&self.synthesizer),
            sink: Arc::clone(&self.sink),
            started_at: self.epoch.load(Ordering::SeqCst),
            epoch: Arc::clone(&self.epoch),
        };
        let handle = self.runtime.spawn(job.speak(text.to_string(), guard));
        *self.task.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
        true
    }

    fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    fn silence(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.sink.stop();
        tracing::debug!("Speech silenced");
    }
}

/// Everything one background reply needs, detached from the worker.
struct SpeechJob {
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    sink: Arc<dyn PlaybackSinkPort>,
    epoch: Arc<AtomicU64>,
    started_at: u64,
}

impl SpeechJob {
    fn is_silenced(&self) -> bool {
        self.epoch.load(Ordering::SeqCst) != self.started_at
    }

    async fn speak(self, text: String, _guard: BusyGuard) {
        let segments = prepare_for_speech(&text);
        if segments.is_empty() {
            tracing::debug!("Nothing to speak");
            return;
        }

        let mut clips = Vec::with_capacity(segments.len());
        for (index, segment) in segments.iter().enumerate() {
            if self.is_silenced() {
                tracing::debug!(segment = index, "Speech silenced, stopping synthesis");
                return;
            }
            match self.synthesizer.synthesize(segment).await {
                Ok(waveform) => {
                    let waveform = trim_trailing_silence(waveform);
                    if waveform.is_empty() {
                        tracing::debug!(segment = index, "Synthesized segment is empty");
                        continue;
                    }
                    clips.push(waveform);
                }
                Err(e) => {
                    tracing::warn!(segment = index, text = %segment, error = %e, "Skipping segment");
                }
            }
        }

        let retained = clips.len();
        match concatenate(clips, self.synthesizer.sample_rate()) {
            Some(_) if self.is_silenced() => {
                tracing::debug!("Speech silenced, dropping reply audio");
            }
            Some(buffer) => {
                tracing::debug!(
                    segments = segments.len(),
                    retained,
                    duration_ms = buffer.duration().as_millis(),
                    "Handing reply audio to playback"
                );
                self.sink.play(buffer);
            }
            None => tracing::debug!(segments = segments.len(), "No audio synthesized"),
        }
    }
}
