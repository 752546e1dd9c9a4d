//! Ollama API wire types.
//!
//! Domain types live in `glados-core`; this module handles the mapping to
//! and from Ollama's JSON.

use glados_core::{ChatMessage, ModelDescriptor};
use serde::{Deserialize, Serialize};

/// `GET /api/tags` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<TagEntry>,
}

/// One locally installed model.
#[derive(Debug, Clone, Deserialize)]
pub struct TagEntry {
    pub name: String,
    /// Size on disk in bytes.
    #[serde(default)]
    pub size: u64,
    /// Content digest (hex).
    #[serde(default)]
    pub digest: String,
}

impl From<TagEntry> for ModelDescriptor {
    fn from(entry: TagEntry) -> Self {
        Self::new(entry.name, entry.size, &entry.digest)
    }
}

/// `POST /api/chat` request body.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub stream: bool,
}

/// Non-streaming `POST /api/chat` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: String,
}

/// Error body Ollama sends with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        let json = r#"{
            "models": [
                {
                    "name": "llama3.2:3b",
                    "model": "llama3.2:3b",
                    "modified_at": "2024-10-01T12:00:00Z",
                    "size": 2019393189,
                    "digest": "a80c4f17acd55265feec403c7aef86be0c25983ab279d83f3bcd3abbcb5b8b72",
                    "details": {"family": "llama"}
                },
                {"name": "tiny:latest"}
            ]
        }"#;

        let tags: TagsResponse = serde_json::from_str(json).unwrap();
        let models: Vec<ModelDescriptor> = tags.models.into_iter().map(Into::into).collect();

        assert_eq!(models.len(), 2);
        assert_eq!(models[0].name, "llama3.2:3b");
        assert_eq!(models[0].size_bytes, 2_019_393_189);
        assert_eq!(models[0].short_id, "a80c4f17acd5");
        assert_eq!(models[1].size_bytes, 0);
        assert_eq!(models[1].short_id, "");
    }

    #[test]
    fn test_empty_tags() {
        let tags: TagsResponse = serde_json::from_str("{}").unwrap();
        assert!(tags.models.is_empty());
    }

    #[test]
    fn test_chat_request_shape() {
        let messages = vec![ChatMessage::system("be brief"), ChatMessage::user("Hi")];
        let request = ChatRequest {
            model: "qwen3:0.6b",
            messages: &messages,
            stream: false,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "model": "qwen3:0.6b",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "Hi"}
                ],
                "stream": false
            })
        );
    }

    #[test]
    fn test_parse_chat_response() {
        let json = r#"{
            "model": "qwen3:0.6b",
            "created_at": "2024-10-01T12:00:00Z",
            "message": {"role": "assistant", "content": "Oh. It's you."},
            "done": true
        }"#;

        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.message.unwrap().content, "Oh. It's you.");
    }

    #[test]
    fn test_parse_error_body() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"model 'x' not found"}"#).unwrap();
        assert_eq!(body.error, "model 'x' not found");
    }
}
