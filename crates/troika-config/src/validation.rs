// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as temperature ranges and non-empty model identifiers.

use crate::diagnostic::ConfigError;
use crate::model::TroikaConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TroikaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.ollama.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "ollama.base_url must not be empty".to_string(),
        });
    }

    if config.ollama.generate_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "ollama.generate_timeout_secs must be greater than zero".to_string(),
        });
    }

    if config.ollama.chat_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "ollama.chat_timeout_secs must be greater than zero".to_string(),
        });
    }

    for (key, model) in [
        ("routing.fast_model", &config.routing.fast_model),
        ("routing.normal_model", &config.routing.normal_model),
        ("routing.strong_model", &config.routing.strong_model),
        ("routing.classifier_model", &config.routing.classifier_model),
    ] {
        if model.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        }
    }

    for (key, value) in [
        (
            "routing.default_temperature",
            config.routing.default_temperature,
        ),
        ("routing.temp_center", config.routing.temp_center),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be within [0.0, 1.0], got {value}"),
            });
        }
    }

    if config.routing.temp_spread <= 0.0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "routing.temp_spread must be positive, got {}",
                config.routing.temp_spread
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
