//! Dedicated audio output thread.
//!
//! `rodio::OutputStream` is `!Send` on some platforms. Rather than using
//! `unsafe impl Send/Sync`, it is confined to a single OS thread and driven
//! through a command channel. [`AudioThreadHandle`] is the `Send + Sync`
//! proxy, and the crate's [`PlaybackSinkPort`] implementation.

use std::sync::mpsc;
use std::thread;

use glados_core::{PlaybackSinkPort, Waveform};

use crate::error::VoiceError;
use crate::playback::AudioPlayback;

// ── Commands ───────────────────────────────────────────────────────

/// A command sent to the audio thread.
enum AudioCommand {
    /// Replace current playback with this buffer (fire-and-forget).
    Play(Waveform),

    /// Stop any active playback immediately (fire-and-forget).
    Stop,

    /// Shut down the audio thread, releasing the output device.
    Shutdown,
}

// ── Handle (Send + Sync proxy) ─────────────────────────────────────

/// `Send + Sync` handle to the dedicated audio thread.
pub struct AudioThreadHandle {
    cmd_tx: mpsc::Sender<AudioCommand>,
    thread: Option<thread::JoinHandle<()>>,
}

impl AudioThreadHandle {
    /// Spawn the audio thread, open the default output device, and return
    /// the handle.
    ///
    /// Device errors are propagated back to the caller via a one-shot init
    /// channel.
    pub fn spawn() -> Result<Self, VoiceError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<AudioCommand>();
        let (init_tx, init_rx) = mpsc::channel::<Result<(), VoiceError>>();

        let thread = thread::Builder::new()
            .name("glados-audio".into())
            .spawn(move || Self::run(&cmd_rx, &init_tx))
            .map_err(|e| {
                VoiceError::OutputStreamError(format!("failed to spawn audio thread: {e}"))
            })?;

        // Wait for the audio thread to finish initialisation.
        init_rx.recv().map_err(|_| VoiceError::AudioThreadDied)??;

        Ok(Self {
            cmd_tx,
            thread: Some(thread),
        })
    }

    // ── Audio thread event loop ────────────────────────────────────

    /// Body of the audio thread. Owns `AudioPlayback` for its entire
    /// lifetime.
    fn run(cmd_rx: &mpsc::Receiver<AudioCommand>, init_tx: &mpsc::Sender<Result<(), VoiceError>>) {
        let mut playback = match AudioPlayback::new() {
            Ok(p) => p,
            Err(e) => {
                let _ = init_tx.send(Err(e));
                return;
            }
        };

        if init_tx.send(Ok(())).is_err() {
            return;
        }

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                AudioCommand::Play(waveform) => {
                    if let Err(e) = playback.play(waveform.samples, waveform.sample_rate) {
                        tracing::error!(error = %e, "Playback failed");
                    }
                }

                AudioCommand::Stop => playback.stop(),

                AudioCommand::Shutdown => break,
            }
        }

        // `playback` is dropped here, on the audio thread.
        tracing::debug!("Audio thread shutting down");
    }
}

impl PlaybackSinkPort for AudioThreadHandle {
    fn play(&self, waveform: Waveform) {
        if self.cmd_tx.send(AudioCommand::Play(waveform)).is_err() {
            tracing::warn!("Audio thread is gone, dropping playback");
        }
    }

    fn stop(&self) {
        let _ = self.cmd_tx.send(AudioCommand::Stop);
    }
}

impl Drop for AudioThreadHandle {
    fn drop(&mut self) {
        // Best-effort shutdown; the thread may already be dead.
        let _ = self.cmd_tx.send(AudioCommand::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}
