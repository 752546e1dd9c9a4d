//! HTTP client for a local Ollama server.

use async_trait::async_trait;
use glados_core::{BackendError, ChatBackendPort, ChatMessage, ModelDescriptor};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::OllamaConfig;
use crate::error::{OllamaError, OllamaResult};
use crate::models::{ChatRequest, ChatResponse, ErrorBody, TagsResponse};

/// Message sent to make the server load a model.
const WARM_UP_PROMPT: &str = "Hi";

/// [`ChatBackendPort`] implementation over Ollama's REST API.
///
/// The client itself never retries; retry policy belongs to the pipeline.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: Url,
}

impl OllamaClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL does not parse or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &OllamaConfig) -> OllamaResult<Self> {
        let mut root = config.base_url.trim().to_string();
        if !root.ends_with('/') {
            root.push('/');
        }
        let base_url = Url::parse(&root)?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    /// The server root requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> OllamaResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn fetch_tags(&self) -> OllamaResult<TagsResponse> {
        let url = self.endpoint("api/tags")?;
        let response = self.http.get(url.as_str()).send().await?;
        read_json(response, &url).await
    }

    async fn post_chat(&self, model: &str, messages: &[ChatMessage]) -> OllamaResult<String> {
        let url = self.endpoint("api/chat")?;
        let body = ChatRequest {
            model,
            messages,
            stream: false,
        };

        tracing::debug!(model, turns = messages.len(), "POST /api/chat");
        let response = self.http.post(url.as_str()).json(&body).send().await?;
        let chat: ChatResponse = read_json(response, &url).await?;

        chat.message
            .map(|m| m.content)
            .ok_or_else(|| OllamaError::InvalidResponse {
                message: "chat response has no message".to_string(),
            })
    }
}

/// Check the status and decode the body, surfacing Ollama's error text.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response, url: &Url) -> OllamaResult<T> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);
        return Err(OllamaError::Status {
            status: status.as_u16(),
            url: url.to_string(),
            message,
        });
    }

    response.json::<T>().await.map_err(|e| OllamaError::InvalidResponse {
        message: e.to_string(),
    })
}

#[async_trait]
impl ChatBackendPort for OllamaClient {
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, BackendError> {
        let tags = self.fetch_tags().await.map_err(OllamaError::into_catalog)?;
        tracing::debug!(count = tags.models.len(), "Fetched model catalog");
        Ok(tags.models.into_iter().map(Into::into).collect())
    }

    async fn warm_up(&self, model: &str) -> Result<(), BackendError> {
        self.post_chat(model, &[ChatMessage::user(WARM_UP_PROMPT)])
            .await
            .map(|_| ())
            .map_err(OllamaError::into_connection)
    }

    async fn chat(&self, model: &str, history: &[ChatMessage]) -> Result<String, BackendError> {
        self.post_chat(model, history)
            .await
            .map_err(OllamaError::into_inference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_under_base_path() {
        let client = OllamaClient::new(&OllamaConfig::new().with_base_url("http://host:11434/ollama"))
            .unwrap();
        assert_eq!(
            client.endpoint("api/tags").unwrap().as_str(),
            "http://host:11434/ollama/api/tags"
        );
    }

    #[test]
    fn test_default_endpoint() {
        let client = OllamaClient::new(&OllamaConfig::default()).unwrap();
        assert_eq!(
            client.endpoint("api/chat").unwrap().as_str(),
            "http://127.0.0.1:11434/api/chat"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = OllamaClient::new(&OllamaConfig::new().with_base_url("not a url")).unwrap_err();
        assert!(matches!(err, OllamaError::InvalidUrl(_)));
    }

    // Port 9 (discard) is closed on any sane test machine.
    fn unreachable_client() -> OllamaClient {
        OllamaClient::new(&OllamaConfig::new().with_base_url("http://127.0.0.1:9")).unwrap()
    }

    #[tokio::test]
    async fn test_unreachable_warm_up_is_connection_error() {
        let err = unreachable_client().warm_up("llama3.2:3b").await.unwrap_err();
        assert!(matches!(err, BackendError::Connection(_)));
    }

    #[tokio::test]
    async fn test_unreachable_chat_is_inference_error() {
        let err = unreachable_client()
            .chat("llama3.2:3b", &[ChatMessage::user("Hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Inference(_)));
    }

    #[test]
    fn test_unreachable_catalog_is_catalog_error() {
        let err = tokio_test::block_on(unreachable_client().list_models()).unwrap_err();
        assert!(matches!(err, BackendError::Catalog(_)));
    }
}
