//! Main CLI parser and top-level argument handling.
//!
//! Every setting can also be given through a `GLADOS_*` environment
//! variable or the `.env` file; flags win over both.

use std::path::PathBuf;

use clap::Parser;
use glados_core::Settings;

use crate::commands::Commands;

/// Command-line interface of the GLaDOS terminal.
#[derive(Parser, Debug)]
#[command(name = "glados")]
#[command(about = "Talk to GLaDOS through a local Ollama model")]
#[command(version)]
pub struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, global = true, env = "GLADOS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Model to activate at startup (e.g. llama3.2:3b)
    #[arg(short, long, global = true, env = "GLADOS_MODEL")]
    pub model: Option<String>,

    /// Base URL of the Ollama server
    #[arg(long, global = true, env = "GLADOS_OLLAMA_URL")]
    pub ollama_url: Option<String>,

    /// Per-request timeout for Ollama calls, in seconds
    #[arg(long, global = true, env = "GLADOS_REQUEST_TIMEOUT")]
    pub request_timeout: Option<u64>,

    /// Base URL of the speech server
    #[arg(long, global = true, env = "GLADOS_TTS_URL")]
    pub tts_url: Option<String>,

    /// Voice used by the speech server
    #[arg(long, global = true, env = "GLADOS_TTS_VOICE")]
    pub tts_voice: Option<String>,

    /// Speaking rate (0.25-4.0)
    #[arg(long, global = true, env = "GLADOS_TTS_SPEED")]
    pub tts_speed: Option<f32>,

    /// API key sent to the speech server
    #[arg(long, global = true, env = "GLADOS_TTS_API_KEY", hide_env_values = true)]
    pub tts_api_key: Option<String>,

    /// Start with spoken replies turned off
    #[arg(long, global = true)]
    pub no_tts: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Settings given on the command line, to overlay on the file.
    #[must_use]
    pub fn settings_overrides(&self) -> Settings {
        Settings {
            model: self.model.clone(),
            ollama_url: self.ollama_url.clone(),
            request_timeout_secs: self.request_timeout,
            tts_url: self.tts_url.clone(),
            tts_voice: self.tts_voice.clone(),
            tts_speed: self.tts_speed,
            speech_enabled: self.no_tts.then_some(false),
            ..Settings::default()
        }
    }
}
