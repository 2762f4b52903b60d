// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama provider adapter for Troika.
//!
//! Implements the [`troika_core::ProviderAdapter`] trait against the Ollama
//! HTTP API: model listing via `/api/tags`, single-prompt generation via
//! `/api/generate`, and buffered or NDJSON-streaming chat via `/api/chat`.

pub mod client;
pub mod ndjson;
pub mod types;

pub use client::OllamaClient;
