// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Ollama API.
//!
//! Provides [`OllamaClient`], which implements the [`ProviderAdapter`] trait
//! for model listing, single-prompt generation, and (streaming) chat.
//! Handles request construction, per-call timeouts, and transient error
//! retry.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use troika_config::model::OllamaConfig;
use troika_core::types::{ChatRequest, GenerateRequest};
use troika_core::{ChunkStream, ProviderAdapter, TroikaError};

use crate::ndjson;
use crate::types::{
    ApiChatChunk, ApiChatMessage, ApiChatRequest, ApiErrorResponse, ApiGenerateRequest,
    ApiGenerateResponse, ApiOptions, TagsResponse,
};

/// HTTP client for Ollama backend communication.
///
/// Classification (generate) calls run under a short timeout; chat calls get
/// a longer one since responses may stream for a while. Transient errors
/// (429, 500, 503) are retried once after a 1-second delay.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    generate_timeout: Duration,
    chat_timeout: Duration,
    max_retries: u32,
}

impl OllamaClient {
    /// Creates a new Ollama client from configuration.
    pub fn new(config: &OllamaConfig) -> Result<Self, TroikaError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TroikaError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            generate_timeout: Duration::from_secs(config.generate_timeout_secs),
            chat_timeout: Duration::from_secs(config.chat_timeout_secs),
            max_retries: 1,
        })
    }

    /// Returns the configured backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a POST with retry-once on transient status codes, returning the
    /// successful response.
    async fn post_with_retry<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<reqwest::Response, TroikaError> {
        let url = format!("{}{path}", self.base_url);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, path, "retrying request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .timeout(timeout)
                .json(body)
                .send()
                .await
                .map_err(|e| send_error(e, timeout))?;

            let status = response.status();
            debug!(status = %status, attempt, path, "response received");

            if status.is_success() {
                return Ok(response);
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(TroikaError::Provider {
                    message: format!("backend returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            return Err(status_error(response).await);
        }

        Err(last_error.unwrap_or_else(|| TroikaError::Provider {
            message: "request failed after retries".into(),
            source: None,
        }))
    }
}

#[async_trait]
impl ProviderAdapter for OllamaClient {
    async fn list_models(&self) -> Result<Vec<String>, TroikaError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(self.generate_timeout)
            .send()
            .await
            .map_err(|e| send_error(e, self.generate_timeout))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let tags: TagsResponse = response.json().await.map_err(|e| TroikaError::Provider {
            message: format!("failed to parse model list: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String, TroikaError> {
        let body = ApiGenerateRequest {
            model: request.model,
            prompt: request.prompt,
            system: request.system,
            options: ApiOptions {
                temperature: request.temperature,
            },
            stream: false,
        };

        let response = self
            .post_with_retry("/api/generate", &body, self.generate_timeout)
            .await?;

        let parsed: ApiGenerateResponse =
            response.json().await.map_err(|e| TroikaError::Provider {
                message: format!("failed to parse generate response: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(parsed.response)
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, TroikaError> {
        let body = chat_body(&request, false);
        let response = self
            .post_with_retry("/api/chat", &body, self.chat_timeout)
            .await?;

        let parsed: ApiChatChunk = response.json().await.map_err(|e| TroikaError::Provider {
            message: format!("failed to parse chat response: {e}"),
            source: Some(Box::new(e)),
        })?;

        if let Some(error) = parsed.error {
            return Err(TroikaError::Provider {
                message: format!("backend error: {error}"),
                source: None,
            });
        }

        Ok(parsed.message.map(|m| m.content).unwrap_or_default())
    }

    async fn chat_stream(&self, request: ChatRequest) -> Result<ChunkStream, TroikaError> {
        let body = chat_body(&request, true);
        let response = self
            .post_with_retry("/api/chat", &body, self.chat_timeout)
            .await?;

        Ok(ndjson::parse_chat_stream(response))
    }
}

/// Build the chat request body from a core [`ChatRequest`].
fn chat_body(request: &ChatRequest, stream: bool) -> ApiChatRequest {
    ApiChatRequest {
        model: request.model.clone(),
        messages: request.messages.iter().map(ApiChatMessage::from).collect(),
        options: ApiOptions {
            temperature: request.temperature,
        },
        stream,
    }
}

/// Map a transport-level send error, distinguishing timeouts.
fn send_error(e: reqwest::Error, timeout: Duration) -> TroikaError {
    if e.is_timeout() {
        TroikaError::Timeout { duration: timeout }
    } else {
        TroikaError::Provider {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        }
    }
}

/// Build an error from a non-success response, preferring the backend's
/// structured error body.
async fn status_error(response: reqwest::Response) -> TroikaError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
        format!("backend error ({status}): {}", api_err.error)
    } else {
        format!("backend returned {status}: {body}")
    };
    TroikaError::Provider {
        message,
        source: None,
    }
}

/// Status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
