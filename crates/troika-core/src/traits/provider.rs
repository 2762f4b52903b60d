// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for inference backends (Ollama and compatibles).

use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::error::TroikaError;
use crate::types::{ChatChunk, ChatRequest, GenerateRequest};

/// A pinned, boxed stream of chat response fragments.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<ChatChunk, TroikaError>> + Send>>;

/// Adapter for an inference backend.
///
/// The backend exposes model listing, a single-prompt generate operation
/// (used by the model-assisted classifier), and chat against a turn history,
/// both buffered and streaming. Implementations translate their transport
/// errors into [`TroikaError`]; raw protocol errors never cross this trait.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Lists the model identifiers available on the backend.
    async fn list_models(&self) -> Result<Vec<String>, TroikaError>;

    /// Sends a single-prompt completion request and returns the full text.
    async fn generate(&self, request: GenerateRequest) -> Result<String, TroikaError>;

    /// Sends a chat request and returns the full response text.
    async fn chat(&self, request: ChatRequest) -> Result<String, TroikaError>;

    /// Sends a chat request and returns a stream of response fragments
    /// terminated by a chunk with `done` set.
    async fn chat_stream(&self, request: ChatRequest) -> Result<ChunkStream, TroikaError>;
}
