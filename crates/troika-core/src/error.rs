// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Troika router.

use thiserror::Error;

use crate::types::Tier;

/// The primary error type used across Troika crates.
#[derive(Debug, Error)]
pub enum TroikaError {
    /// Configuration errors (invalid TOML, bad values, missing model mapping).
    #[error("configuration error: {0}")]
    Config(String),

    /// Inference backend errors (connection failure, non-success status,
    /// malformed payload).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A chat dispatch failed after a routing decision was made.
    ///
    /// Carries the tier and model so the caller can tell the user which
    /// backend model to check. Callers must roll back the user turn that
    /// was recorded for this dispatch.
    #[error("dispatch to {tier} model `{model}` failed: {message}")]
    Dispatch {
        tier: Tier,
        model: String,
        message: String,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
