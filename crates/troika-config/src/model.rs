// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so unrecognized keys are
//! rejected at startup with an actionable error message.

use serde::{Deserialize, Serialize};

/// Top-level Troika configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TroikaConfig {
    /// Identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Ollama backend settings.
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Tier routing and classification settings.
    #[serde(default)]
    pub routing: RoutingConfig,
}

/// Identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name used in the shell prompt.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "troika".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Ollama backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OllamaConfig {
    /// Base URL of the Ollama HTTP API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout in seconds for non-streaming generate calls
    /// (classification uses these, so the timeout is short).
    #[serde(default = "default_generate_timeout_secs")]
    pub generate_timeout_secs: u64,

    /// Timeout in seconds for chat calls, which may stream for a while.
    #[serde(default = "default_chat_timeout_secs")]
    pub chat_timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            generate_timeout_secs: default_generate_timeout_secs(),
            chat_timeout_secs: default_chat_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_generate_timeout_secs() -> u64 {
    30
}

fn default_chat_timeout_secs() -> u64 {
    120
}

/// Tier routing and classification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Delegate classification to the auxiliary model instead of the
    /// rule-based engine. The rules need no network call, so they are
    /// the default.
    #[serde(default)]
    pub model_assist: bool,

    /// Model identifier for the fast tier.
    #[serde(default = "default_fast_model")]
    pub fast_model: String,

    /// Model identifier for the normal tier.
    #[serde(default = "default_normal_model")]
    pub normal_model: String,

    /// Model identifier for the strong tier.
    #[serde(default = "default_strong_model")]
    pub strong_model: String,

    /// Small model used for model-assisted classification.
    #[serde(default = "default_classifier_model")]
    pub classifier_model: String,

    /// Temperature used when the classifier does not choose one
    /// (rule-based decisions, forced-tier decisions).
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Center of the Gaussian temperature shaping kernel.
    #[serde(default = "default_temp_center")]
    pub temp_center: f32,

    /// Spread (sigma) of the Gaussian temperature shaping kernel.
    #[serde(default = "default_temp_spread")]
    pub temp_spread: f32,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            model_assist: false,
            fast_model: default_fast_model(),
            normal_model: default_normal_model(),
            strong_model: default_strong_model(),
            classifier_model: default_classifier_model(),
            default_temperature: default_temperature(),
            temp_center: default_temp_center(),
            temp_spread: default_temp_spread(),
        }
    }
}

fn default_fast_model() -> String {
    "qwen2.5:1.5b".to_string()
}

fn default_normal_model() -> String {
    "qwen2.5:7b".to_string()
}

fn default_strong_model() -> String {
    "qwen2.5:14b".to_string()
}

fn default_classifier_model() -> String {
    "qwen2.5:1.5b".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_temp_center() -> f32 {
    0.7
}

fn default_temp_spread() -> f32 {
    0.15
}
