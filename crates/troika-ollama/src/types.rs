// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama API request/response wire types.

use serde::{Deserialize, Serialize};

use troika_core::types::ConversationTurn;

/// Response from `GET /api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

/// One installed model as reported by `/api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelTag {
    pub name: String,
}

/// Sampling options common to generate and chat requests.
///
/// Ollama reads the temperature from the `options` object; a top-level
/// `temperature` field is silently ignored.
#[derive(Debug, Clone, Serialize)]
pub struct ApiOptions {
    pub temperature: f32,
}

/// Request body for `POST /api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiGenerateRequest {
    pub model: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub options: ApiOptions,
    pub stream: bool,
}

/// Response body for a non-streaming `POST /api/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiGenerateResponse {
    #[serde(default)]
    pub response: String,
}

/// A single message in the Ollama chat format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiChatMessage {
    pub role: String,
    pub content: String,
}

impl From<&ConversationTurn> for ApiChatMessage {
    fn from(turn: &ConversationTurn) -> Self {
        Self {
            role: turn.role.to_string(),
            content: turn.content.clone(),
        }
    }
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiChatRequest {
    pub model: String,
    pub messages: Vec<ApiChatMessage>,
    pub options: ApiOptions,
    pub stream: bool,
}

/// One chat response object.
///
/// Non-streaming responses are a single object with `done: true`; streaming
/// responses are a sequence of these, one per NDJSON line. Mid-stream
/// backend failures arrive as an object carrying only `error`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiChatChunk {
    #[serde(default)]
    pub message: Option<ApiChatMessage>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Error body returned by Ollama on non-success status codes.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use troika_core::types::Role;

    #[test]
    fn serialize_generate_request() {
        let req = ApiGenerateRequest {
            model: "qwen2.5:1.5b".into(),
            prompt: "Classify this query:\n\nhi".into(),
            system: Some("You are a query classifier.".into()),
            options: ApiOptions { temperature: 0.2 },
            stream: false,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "qwen2.5:1.5b");
        assert_eq!(json["options"]["temperature"], 0.2);
        assert_eq!(json["stream"], false);
        assert!(json["system"].is_string());
    }

    #[test]
    fn serialize_generate_request_without_system_omits_field() {
        let req = ApiGenerateRequest {
            model: "qwen2.5:1.5b".into(),
            prompt: "hi".into(),
            system: None,
            options: ApiOptions { temperature: 0.7 },
            stream: false,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("system").is_none());
    }

    #[test]
    fn chat_message_from_conversation_turn() {
        let turn = ConversationTurn::user("hello");
        let msg = ApiChatMessage::from(&turn);
        assert_eq!(msg.role, "user");
        assert_eq!(msg.content, "hello");

        let turn = ConversationTurn {
            role: Role::Assistant,
            content: "hi".into(),
        };
        assert_eq!(ApiChatMessage::from(&turn).role, "assistant");
    }

    #[test]
    fn deserialize_streaming_chunk() {
        let json = r#"{"model":"x","message":{"role":"assistant","content":"Hel"},"done":false}"#;
        let chunk: ApiChatChunk = serde_json::from_str(json).unwrap();
        assert_eq!(chunk.message.unwrap().content, "Hel");
        assert!(!chunk.done);
        assert!(chunk.error.is_none());
    }

    #[test]
    fn deserialize_final_chunk_without_message() {
        let json = r#"{"model":"x","done":true,"total_duration":12345}"#;
        let chunk: ApiChatChunk = serde_json::from_str(json).unwrap();
        assert!(chunk.done);
        assert!(chunk.message.is_none());
    }

    #[test]
    fn deserialize_error_chunk() {
        let json = r#"{"error":"model not found"}"#;
        let chunk: ApiChatChunk = serde_json::from_str(json).unwrap();
        assert_eq!(chunk.error.as_deref(), Some("model not found"));
    }

    #[test]
    fn deserialize_tags_response() {
        let json = r#"{"models":[{"name":"qwen2.5:1.5b","size":1000},{"name":"mistral:latest"}]}"#;
        let tags: TagsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(tags.models.len(), 2);
        assert_eq!(tags.models[0].name, "qwen2.5:1.5b");
    }
}
