// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./troika.toml` > `~/.config/troika/troika.toml`
//! > `/etc/troika/troika.toml`, with environment variable overrides via the
//! `TROIKA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::TroikaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/troika/troika.toml` (system-wide)
/// 3. `~/.config/troika/troika.toml` (user XDG config)
/// 4. `./troika.toml` (local directory)
/// 5. `TROIKA_*` environment variables
pub fn load_config() -> Result<TroikaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TroikaConfig::default()))
        .merge(Toml::file("/etc/troika/troika.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("troika/troika.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("troika.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<TroikaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TroikaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TroikaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TroikaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TROIKA_ROUTING_FAST_MODEL` must map to
/// `routing.fast_model`, not `routing.fast.model`.
fn env_provider() -> Env {
    Env::prefixed("TROIKA_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("ollama_", "ollama.", 1)
            .replacen("routing_", "routing.", 1);
        mapped.into()
    })
}
