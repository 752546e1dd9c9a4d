//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI:
//! - Settings from `.env`, the settings file and command-line flags
//! - The Ollama backend (via glados-ollama)
//! - Speech synthesis and the audio thread (via glados-voice)
//! - The generation pipeline (via glados-core)

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use glados_core::{
    ChatBackendPort, GenerationConfig, ModelDescriptor, ModelLifecycleManager, Pipeline,
    PlaybackSinkPort, Settings, SpeechOutputPort, env_file_path, fallback_catalog, settings_path,
    validate_settings,
};
use glados_ollama::{OllamaClient, OllamaConfig};
use glados_voice::{AudioThreadHandle, HttpSpeechSynthesizer, HttpTtsConfig, SpeechWorker};
use tokio::runtime::Handle;

use crate::error::CliError;
use crate::parser::Cli;
use crate::terminal::Session;

/// Load `.env` from the working directory, then from the config dir.
///
/// Variables already set are never overwritten, so the working directory
/// wins over the config dir and the real environment wins over both.
/// Returns the files that were loaded.
pub fn load_env_files() -> Vec<PathBuf> {
    let mut loaded = Vec::new();
    if let Ok(path) = dotenvy::dotenv() {
        loaded.push(path);
    }
    if let Ok(path) = env_file_path() {
        if dotenvy::from_path(&path).is_ok() {
            loaded.push(path);
        }
    }
    loaded
}

/// Settings for this invocation: the settings file overlaid with flags.
pub fn resolve_settings(cli: &Cli) -> Result<Settings, CliError> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => settings_path()?,
    };
    load_settings(&path, cli.settings_overrides())
}

/// Load `path`, overlay `overrides` and validate the result.
pub fn load_settings(path: &Path, overrides: Settings) -> Result<Settings, CliError> {
    let settings = Settings::load_from_path(path)?.overlay(overrides);
    validate_settings(&settings)?;
    tracing::debug!(path = %path.display(), model = ?settings.model, "Settings resolved");
    Ok(settings)
}

/// Build the Ollama client.
pub fn build_backend(settings: &Settings) -> Result<Arc<dyn ChatBackendPort>, CliError> {
    let config = OllamaConfig::new()
        .with_base_url(settings.effective_ollama_url())
        .with_optional_timeout(settings.request_timeout_secs.map(Duration::from_secs));
    let client = OllamaClient::new(&config)?;
    tracing::debug!(url = %client.base_url(), "Ollama client ready");
    Ok(Arc::new(client))
}

/// The catalog shown in the terminal.
///
/// Falls back to a fixed list when the backend cannot be asked.
pub fn fetch_catalog(backend: &dyn ChatBackendPort, runtime: &Handle) -> Vec<ModelDescriptor> {
    match runtime.block_on(backend.list_models()) {
        Ok(models) => models,
        Err(e) => {
            tracing::warn!(error = %e, "Could not list models, using built-in list");
            fallback_catalog()
        }
    }
}

/// Build the speech worker and the audio thread it plays through.
///
/// Returns `None` (and logs why) when the speech client or the audio
/// device is unavailable; the terminal then runs without speech.
pub fn build_speech(
    settings: &Settings,
    api_key: Option<String>,
    runtime: &Handle,
) -> Option<Arc<SpeechWorker>> {
    let config = HttpTtsConfig {
        base_url: settings.effective_tts_url().to_string(),
        model: settings.effective_tts_model().to_string(),
        voice: settings.effective_tts_voice().to_string(),
        speed: settings.effective_tts_speed(),
        sample_rate: settings.effective_tts_sample_rate(),
        api_key,
        ..HttpTtsConfig::default()
    };

    let synthesizer = match HttpSpeechSynthesizer::new(config) {
        Ok(synthesizer) => synthesizer,
        Err(e) => {
            tracing::warn!(error = %e, "Speech disabled");
            return None;
        }
    };
    let audio = match AudioThreadHandle::spawn() {
        Ok(audio) => audio,
        Err(e) => {
            tracing::warn!(error = %e, "No audio output, speech disabled");
            return None;
        }
    };
    tracing::debug!(endpoint = synthesizer.endpoint(), "Speech ready");

    let worker = SpeechWorker::new(
        Arc::new(synthesizer),
        Arc::new(audio) as Arc<dyn PlaybackSinkPort>,
        runtime.clone(),
    );
    Some(Arc::new(worker))
}

/// Pipeline for the configured prompt and fallback reply, without speech.
pub fn build_pipeline(
    settings: &Settings,
    backend: Arc<dyn ChatBackendPort>,
    runtime: &Handle,
) -> Pipeline {
    let lifecycle = ModelLifecycleManager::new(backend, runtime.clone()).with_generation_config(
        GenerationConfig {
            fallback_reply: settings.effective_fallback_reply().to_string(),
            ..GenerationConfig::default()
        },
    );
    Pipeline::new(lifecycle, settings.effective_system_prompt())
}

/// Compose a complete interactive session.
pub fn build_session(
    settings: &Settings,
    backend: Arc<dyn ChatBackendPort>,
    speech: Option<Arc<SpeechWorker>>,
    runtime: &Handle,
) -> Session {
    let catalog = fetch_catalog(backend.as_ref(), runtime);
    let pipeline = build_pipeline(settings, backend, runtime);

    let pipeline = match speech {
        Some(worker) => pipeline.with_speech(
            worker as Arc<dyn SpeechOutputPort>,
            settings.effective_speech_enabled(),
        ),
        None => pipeline,
    };
    Session::new(pipeline, catalog)
}
