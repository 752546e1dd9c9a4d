//! OpenAI-compatible HTTP speech synthesizer.
//!
//! Talks to any server exposing `POST /v1/audio/speech` (Kokoro-FastAPI,
//! openedai-speech, `OpenAI` itself) and requests raw 16-bit little-endian
//! mono PCM so no decoder is needed.

use async_trait::async_trait;
use glados_core::settings::{
    DEFAULT_TTS_MODEL, DEFAULT_TTS_SAMPLE_RATE, DEFAULT_TTS_SPEED, DEFAULT_TTS_URL,
    DEFAULT_TTS_VOICE,
};
use glados_core::{SpeechSynthesizerPort, SynthesisError, Waveform};
use std::time::Duration;

use crate::error::VoiceError;

/// Configuration for [`HttpSpeechSynthesizer`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpTtsConfig {
    pub base_url: String,
    pub model: String,
    pub voice: String,
    pub speed: f32,
    /// Sample rate the server uses for `pcm` output.
    pub sample_rate: u32,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for HttpTtsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TTS_URL.to_string(),
            model: DEFAULT_TTS_MODEL.to_string(),
            voice: DEFAULT_TTS_VOICE.to_string(),
            speed: DEFAULT_TTS_SPEED,
            sample_rate: DEFAULT_TTS_SAMPLE_RATE,
            api_key: None,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Synthesizes speech by calling a speech server.
pub struct HttpSpeechSynthesizer {
    client: reqwest::Client,
    endpoint: String,
    config: HttpTtsConfig,
}

impl HttpSpeechSynthesizer {
    /// Create a synthesizer for the configured server.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new(config: HttpTtsConfig) -> Result<Self, VoiceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| VoiceError::Config(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: speech_endpoint(&config.base_url),
            config,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn speech_endpoint(base_url: &str) -> String {
    format!("{}/v1/audio/speech", base_url.trim_end_matches('/'))
}

/// Decode little-endian 16-bit PCM. A trailing odd byte is ignored.
#[must_use]
pub fn decode_pcm16le(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

#[derive(serde::Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
    speed: f32,
}

#[async_trait]
impl SpeechSynthesizerPort for HttpSpeechSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Waveform, SynthesisError> {
        let request = SpeechRequest {
            model: &self.config.model,
            input: text,
            voice: &self.config.voice,
            response_format: "pcm",
            speed: self.config.speed,
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.header("Authorization", format!("Bearer {key}"));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| SynthesisError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Backend(format!("TTS error {status}: {body}")));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Backend(e.to_string()))?;
        if audio.len() % 2 != 0 {
            tracing::debug!(bytes = audio.len(), "PCM payload has odd length");
        }

        let samples = decode_pcm16le(&audio);
        if samples.is_empty() {
            return Err(SynthesisError::InvalidAudio("empty audio payload".to_string()));
        }
        Ok(Waveform::new(samples, self.config.sample_rate))
    }

    fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_little_endian_samples() {
        let bytes = [0x01, 0x00, 0xff, 0x7f, 0x00, 0x80, 0xff, 0xff, 0x42];
        assert_eq!(decode_pcm16le(&bytes), vec![1, i16::MAX, i16::MIN, -1]);
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        assert_eq!(
            speech_endpoint("http://127.0.0.1:8880/"),
            "http://127.0.0.1:8880/v1/audio/speech"
        );
        assert_eq!(
            speech_endpoint("https://api.openai.com"),
            "https://api.openai.com/v1/audio/speech"
        );
    }

    #[test]
    fn request_body_asks_for_pcm() {
        let request = SpeechRequest {
            model: "kokoro",
            input: "Hello.",
            voice: "af_bella",
            response_format: "pcm",
            speed: 1.0,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "model": "kokoro",
                "input": "Hello.",
                "voice": "af_bella",
                "response_format": "pcm",
                "speed": 1.0
            })
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_backend_error() {
        let synth = HttpSpeechSynthesizer::new(HttpTtsConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..HttpTtsConfig::default()
        })
        .unwrap();

        assert_eq!(synth.sample_rate(), 24_000);
        let err = synth.synthesize("Hello.").await.unwrap_err();
        assert!(matches!(err, SynthesisError::Backend(_)));
    }
}
