//! Command handlers.
//!
//! Each handler receives settings and the runtime from `main` and does
//! its own wiring through [`crate::bootstrap`].

use glados_core::Settings;
use tokio::runtime::Handle;

use crate::bootstrap::{build_backend, build_session, build_speech};
use crate::error::CliError;
use crate::presentation::model_table;
use crate::terminal;

/// `glados models`: print the backend's catalog.
///
/// Unlike the terminal, this fails when the backend cannot be reached.
pub fn models(settings: &Settings, runtime: &Handle) -> Result<(), CliError> {
    let backend = build_backend(settings)?;
    let models = runtime
        .block_on(backend.list_models())
        .map_err(|e| CliError::Backend(e.to_string()))?;

    for line in model_table(&models, settings.model.as_deref()) {
        println!("{line}");
    }
    Ok(())
}

/// `glados chat`: run the interactive terminal.
pub fn chat(
    settings: &Settings,
    tts_api_key: Option<String>,
    runtime: &Handle,
) -> Result<(), CliError> {
    let backend = build_backend(settings)?;
    let speech = build_speech(settings, tts_api_key, runtime);
    let session = build_session(settings, backend, speech, runtime);

    terminal::run(session, settings.model.as_deref())
}
