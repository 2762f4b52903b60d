// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock provider adapter for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with pre-configured responses
//! popped from a FIFO queue. A failing variant makes every call return a
//! provider error, for exercising fallback and rollback paths.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream;
use tokio::sync::Mutex;

use troika_core::types::{ChatChunk, ChatRequest, GenerateRequest};
use troika_core::{ChunkStream, ProviderAdapter, TroikaError};

/// A mock backend that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue shared between `generate`, `chat`,
/// and `chat_stream`. When the queue is empty, a default "mock response"
/// text is returned.
pub struct MockProvider {
    responses: Arc<Mutex<VecDeque<String>>>,
    models: Vec<String>,
    failure: Option<String>,
}

impl MockProvider {
    /// Create a new mock provider with an empty response queue.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            models: Vec::new(),
            failure: None,
        }
    }

    /// Create a mock provider pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            models: Vec::new(),
            failure: None,
        }
    }

    /// Create a mock provider whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            models: Vec::new(),
            failure: Some(message.into()),
        }
    }

    /// Set the model list reported by `list_models`.
    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.models = models;
        self
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: String) {
        self.responses.lock().await.push_back(text);
    }

    /// Pop the next response, or return the default.
    async fn next_response(&self) -> String {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock response".to_string())
    }

    fn check_failure(&self) -> Result<(), TroikaError> {
        match &self.failure {
            Some(message) => Err(TroikaError::Provider {
                message: message.clone(),
                source: None,
            }),
            None => Ok(()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn list_models(&self) -> Result<Vec<String>, TroikaError> {
        self.check_failure()?;
        Ok(self.models.clone())
    }

    async fn generate(&self, _request: GenerateRequest) -> Result<String, TroikaError> {
        self.check_failure()?;
        Ok(self.next_response().await)
    }

    async fn chat(&self, _request: ChatRequest) -> Result<String, TroikaError> {
        self.check_failure()?;
        Ok(self.next_response().await)
    }

    async fn chat_stream(&self, _request: ChatRequest) -> Result<ChunkStream, TroikaError> {
        self.check_failure()?;
        let text = self.next_response().await;
        let chunks = vec![
            Ok(ChatChunk {
                content: text,
                done: false,
            }),
            Ok(ChatChunk {
                content: String::new(),
                done: true,
            }),
        ];
        Ok(Box::pin(stream::iter(chunks)))
    }
}
