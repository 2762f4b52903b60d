// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Troika tiered chat router.
//!
//! This crate provides the error type, the shared domain types (tiers,
//! conversation turns, provider request shapes), and the provider adapter
//! trait implemented by backend integrations.

pub mod error;
pub mod traits;
pub mod types;

pub use error::TroikaError;
pub use traits::{ChunkStream, ProviderAdapter};
pub use types::{ChatChunk, ChatRequest, ConversationTurn, GenerateRequest, Role, Tier};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variants_construct() {
        let _config = TroikaError::Config("bad value".into());
        let _provider = TroikaError::Provider {
            message: "connection refused".into(),
            source: None,
        };
        let _dispatch = TroikaError::Dispatch {
            tier: Tier::Strong,
            model: "deep-tutor".into(),
            message: "connection reset".into(),
        };
        let _timeout = TroikaError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = TroikaError::Internal("oops".into());
    }

    #[test]
    fn dispatch_error_names_tier_and_model() {
        let err = TroikaError::Dispatch {
            tier: Tier::Fast,
            model: "quick-tutor".into(),
            message: "404".into(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("fast"), "got: {rendered}");
        assert!(rendered.contains("quick-tutor"), "got: {rendered}");
    }
}
