// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared between the router, the provider adapters, and the
//! front ends.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Model capability tiers.
///
/// Capability ordering is fast < normal < strong; the ordering is
/// informational (logging, status output) and never used for comparisons,
/// so the enum intentionally derives no `Ord`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Lightweight model: greetings, quick facts, definitions.
    Fast,
    /// Mid-size model: general explanations, comparisons, basic coding.
    Normal,
    /// Largest model: multi-step reasoning, debugging, proofs.
    Strong,
}

impl Tier {
    /// All tiers in capability order.
    pub const ALL: [Tier; 3] = [Tier::Fast, Tier::Normal, Tier::Strong];
}

/// Speaker of a conversation turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single turn in a tier's conversation history. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A single-prompt completion request (used for classification calls).
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Backend model identifier.
    pub model: String,
    /// The prompt text.
    pub prompt: String,
    /// Optional system instruction.
    pub system: Option<String>,
    /// Sampling temperature in [0, 1].
    pub temperature: f32,
}

/// A multi-turn chat request against one tier's full history.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Backend model identifier.
    pub model: String,
    /// Role-tagged turns, oldest first.
    pub messages: Vec<ConversationTurn>,
    /// Sampling temperature in [0, 1].
    pub temperature: f32,
}

/// An incremental fragment of a streaming chat response.
///
/// `done` is the explicit completion signal; the final chunk of a stream
/// carries it set with empty or final content.
#[derive(Debug, Clone)]
pub struct ChatChunk {
    pub content: String,
    pub done: bool,
}
