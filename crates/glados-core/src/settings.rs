//! Settings domain types and validation.
//!
//! Every field is optional so a settings file only needs to name what it
//! overrides. Callers read values through the `effective_*` accessors.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::text::FALLBACK_REPLY;

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Default OpenAI-compatible speech endpoint (Kokoro-FastAPI).
pub const DEFAULT_TTS_URL: &str = "http://127.0.0.1:8880";

pub const DEFAULT_TTS_MODEL: &str = "kokoro";
pub const DEFAULT_TTS_VOICE: &str = "af_bella";
pub const DEFAULT_TTS_SPEED: f32 = 1.0;

/// Sample rate of raw PCM returned by the speech endpoint.
pub const DEFAULT_TTS_SAMPLE_RATE: u32 = 24_000;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are GLaDOS, the sardonic artificial intelligence \
running the Aperture Science Enrichment Center. Answer briefly, in plain sentences, with dry wit.";

/// Application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Model activated at startup.
    pub model: Option<String>,

    /// System prompt seeded into every new conversation.
    pub system_prompt: Option<String>,

    /// Base URL of the Ollama server.
    pub ollama_url: Option<String>,

    /// Per-request timeout for the Ollama client, in seconds. Unset means
    /// no timeout.
    pub request_timeout_secs: Option<u64>,

    /// Base URL of the speech synthesis server.
    pub tts_url: Option<String>,

    pub tts_model: Option<String>,

    pub tts_voice: Option<String>,

    /// Speaking rate (0.25-4.0).
    pub tts_speed: Option<f32>,

    /// Sample rate of the PCM the speech server returns.
    pub tts_sample_rate: Option<u32>,

    /// Whether replies are spoken from the start.
    pub speech_enabled: Option<bool>,

    /// Reply shown when the model fails to answer.
    pub fallback_reply: Option<String>,
}

impl Settings {
    /// Load settings from a JSON file.
    ///
    /// A missing file yields empty settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] when the file cannot be read and
    /// [`SettingsError::Parse`] when it is not valid settings JSON.
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No settings file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(SettingsError::Io {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                });
            }
        };

        serde_json::from_str(&contents).map_err(|e| SettingsError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Overlay `other` on top of `self`: fields set in `other` win.
    #[must_use]
    pub fn overlay(self, other: Self) -> Self {
        Self {
            model: other.model.or(self.model),
            system_prompt: other.system_prompt.or(self.system_prompt),
            ollama_url: other.ollama_url.or(self.ollama_url),
            request_timeout_secs: other.request_timeout_secs.or(self.request_timeout_secs),
            tts_url: other.tts_url.or(self.tts_url),
            tts_model: other.tts_model.or(self.tts_model),
            tts_voice: other.tts_voice.or(self.tts_voice),
            tts_speed: other.tts_speed.or(self.tts_speed),
            tts_sample_rate: other.tts_sample_rate.or(self.tts_sample_rate),
            speech_enabled: other.speech_enabled.or(self.speech_enabled),
            fallback_reply: other.fallback_reply.or(self.fallback_reply),
        }
    }

    #[must_use]
    pub fn effective_system_prompt(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    #[must_use]
    pub fn effective_ollama_url(&self) -> &str {
        self.ollama_url.as_deref().unwrap_or(DEFAULT_OLLAMA_URL)
    }

    #[must_use]
    pub fn effective_tts_url(&self) -> &str {
        self.tts_url.as_deref().unwrap_or(DEFAULT_TTS_URL)
    }

    #[must_use]
    pub fn effective_tts_model(&self) -> &str {
        self.tts_model.as_deref().unwrap_or(DEFAULT_TTS_MODEL)
    }

    #[must_use]
    pub fn effective_tts_voice(&self) -> &str {
        self.tts_voice.as_deref().unwrap_or(DEFAULT_TTS_VOICE)
    }

    #[must_use]
    pub fn effective_tts_speed(&self) -> f32 {
        self.tts_speed.unwrap_or(DEFAULT_TTS_SPEED)
    }

    #[must_use]
    pub fn effective_tts_sample_rate(&self) -> u32 {
        self.tts_sample_rate.unwrap_or(DEFAULT_TTS_SAMPLE_RATE)
    }

    #[must_use]
    pub fn effective_speech_enabled(&self) -> bool {
        self.speech_enabled.unwrap_or(true)
    }

    #[must_use]
    pub fn effective_fallback_reply(&self) -> &str {
        self.fallback_reply.as_deref().unwrap_or(FALLBACK_REPLY)
    }
}

/// Settings loading or validation error.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{field} must be an http(s) URL, got '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("System prompt cannot be empty")]
    EmptySystemPrompt,

    #[error("Fallback reply cannot be empty")]
    EmptyFallbackReply,

    #[error("Model name cannot be empty")]
    EmptyModel,

    #[error("TTS speed must be between 0.25 and 4.0, got {0}")]
    InvalidSpeed(String),

    #[error("TTS sample rate must be between 8000 and 192000 Hz, got {0}")]
    InvalidSampleRate(u32),

    #[error("Request timeout must be at least 1 second")]
    InvalidTimeout,

    #[error("Cannot determine the user configuration directory")]
    NoConfigDir,

    #[error("Failed to access settings file {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Invalid settings file {path}: {reason}")]
    Parse { path: String, reason: String },
}

/// Validate settings values.
///
/// # Errors
///
/// Returns the first invalid field found.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    for (field, value) in [
        ("ollama_url", settings.ollama_url.as_deref()),
        ("tts_url", settings.tts_url.as_deref()),
    ] {
        if let Some(url) = value {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(SettingsError::InvalidUrl {
                    field,
                    value: url.to_string(),
                });
            }
        }
    }

    if settings
        .system_prompt
        .as_ref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(SettingsError::EmptySystemPrompt);
    }

    if settings
        .fallback_reply
        .as_ref()
        .is_some_and(|r| r.trim().is_empty())
    {
        return Err(SettingsError::EmptyFallbackReply);
    }

    if settings.model.as_ref().is_some_and(|m| m.trim().is_empty()) {
        return Err(SettingsError::EmptyModel);
    }

    if let Some(speed) = settings.tts_speed {
        if !(0.25..=4.0).contains(&speed) {
            return Err(SettingsError::InvalidSpeed(speed.to_string()));
        }
    }

    if let Some(rate) = settings.tts_sample_rate {
        if !(8_000..=192_000).contains(&rate) {
            return Err(SettingsError::InvalidSampleRate(rate));
        }
    }

    if settings.request_timeout_secs == Some(0) {
        return Err(SettingsError::InvalidTimeout);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.effective_ollama_url(), DEFAULT_OLLAMA_URL);
        assert_eq!(settings.effective_tts_sample_rate(), 24_000);
        assert!(settings.effective_speech_enabled());
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_empty_settings_fall_back() {
        let settings = Settings::default();
        assert_eq!(settings.effective_system_prompt(), DEFAULT_SYSTEM_PROMPT);
        assert_eq!(settings.effective_fallback_reply(), FALLBACK_REPLY);
        assert!(settings.model.is_none());
    }

    #[test]
    fn test_overlay_prefers_set_fields() {
        let base = Settings {
            model: Some("llama3.2:3b".to_string()),
            tts_voice: Some("am_adam".to_string()),
            ..Settings::default()
        };
        let top = Settings {
            model: Some("qwen3:0.6b".to_string()),
            ..Settings::default()
        };

        let merged = base.overlay(top);
        assert_eq!(merged.model.as_deref(), Some("qwen3:0.6b"));
        assert_eq!(merged.tts_voice.as_deref(), Some("am_adam"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_url = Settings {
            ollama_url: Some("localhost:11434".to_string()),
            ..Settings::default()
        };
        assert!(matches!(
            validate_settings(&bad_url),
            Err(SettingsError::InvalidUrl { field: "ollama_url", .. })
        ));

        let bad_speed = Settings {
            tts_speed: Some(9.0),
            ..Settings::default()
        };
        assert!(matches!(
            validate_settings(&bad_speed),
            Err(SettingsError::InvalidSpeed(_))
        ));

        let blank_prompt = Settings {
            system_prompt: Some("   ".to_string()),
            ..Settings::default()
        };
        assert_eq!(
            validate_settings(&blank_prompt),
            Err(SettingsError::EmptySystemPrompt)
        );

        let blank_fallback = Settings {
            fallback_reply: Some(" \t ".to_string()),
            ..Settings::default()
        };
        assert_eq!(
            validate_settings(&blank_fallback),
            Err(SettingsError::EmptyFallbackReply)
        );

        let zero_timeout = Settings {
            request_timeout_secs: Some(0),
            ..Settings::default()
        };
        assert_eq!(
            validate_settings(&zero_timeout),
            Err(SettingsError::InvalidTimeout)
        );
    }

    #[test]
    fn test_missing_file_is_empty_settings() {
        let dir = tempdir().unwrap();
        let settings = Settings::load_from_path(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_full_file_parses() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"model": "deepseek-r1:1.5b", "speech_enabled": false, "tts_speed": 1.25}"#,
        )
        .unwrap();

        let settings = Settings::load_from_path(&path).unwrap();
        assert_eq!(settings.model.as_deref(), Some("deepseek-r1:1.5b"));
        assert!(!settings.effective_speech_enabled());
        assert!((settings.effective_tts_speed() - 1.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_file_parses() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"tts_voice": "bf_emma"}"#).unwrap();

        let settings = Settings::load_from_path(&path).unwrap();
        assert_eq!(settings.effective_tts_voice(), "bf_emma");
        assert_eq!(settings.effective_tts_model(), DEFAULT_TTS_MODEL);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            Settings::load_from_path(&path),
            Err(SettingsError::Parse { .. })
        ));
    }
}
