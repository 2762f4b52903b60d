// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `troika status` command implementation.
//!
//! Queries the backend's model listing and reports, per tier plus the
//! classifier model, whether the configured model is installed. Falls back
//! gracefully when the backend is unreachable.

use std::io::IsTerminal;

use serde::Serialize;

use troika_config::model::TroikaConfig;
use troika_core::{ProviderAdapter, TroikaError};
use troika_ollama::OllamaClient;

/// Availability of one configured model.
#[derive(Debug, Serialize)]
pub struct ModelStatus {
    /// What the model is used for: a tier name or "classifier".
    pub role: String,
    pub model: String,
    pub available: bool,
}

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub backend_reachable: bool,
    pub base_url: String,
    pub models: Vec<ModelStatus>,
}

/// Whether `model` appears in the backend's installed list.
///
/// Matches on the base name before the `:` tag so `qwen2.5:1.5b` is
/// considered available when the backend reports `qwen2.5:1.5b-instruct`.
pub(crate) fn model_available(installed: &[String], model: &str) -> bool {
    let base = model.split(':').next().unwrap_or(model);
    installed.iter().any(|m| m.contains(base) || m == model)
}

/// Build the availability entries for the configured tier and classifier
/// models.
pub(crate) fn model_statuses(config: &TroikaConfig, installed: &[String]) -> Vec<ModelStatus> {
    [
        ("fast", &config.routing.fast_model),
        ("normal", &config.routing.normal_model),
        ("strong", &config.routing.strong_model),
        ("classifier", &config.routing.classifier_model),
    ]
    .into_iter()
    .map(|(role, model)| ModelStatus {
        role: role.to_string(),
        model: model.clone(),
        available: model_available(installed, model),
    })
    .collect()
}

/// Run the `troika status` command.
pub async fn run_status(config: &TroikaConfig, json: bool, plain: bool) -> Result<(), TroikaError> {
    let client = OllamaClient::new(&config.ollama)?;

    let (reachable, installed) = match client.list_models().await {
        Ok(models) => (true, models),
        Err(_) => (false, Vec::new()),
    };

    let report = StatusReport {
        backend_reachable: reachable,
        base_url: config.ollama.base_url.clone(),
        models: model_statuses(config, &installed),
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    print_report(&report, use_color);
    Ok(())
}

/// Print the human-readable report with optional colors.
fn print_report(report: &StatusReport, use_color: bool) {
    println!();
    println!("  troika status");
    println!("  {}", "-".repeat(40));

    let mark = |ok: bool| -> String {
        if use_color {
            use colored::Colorize;
            if ok {
                "✓".green().to_string()
            } else {
                "✗".red().to_string()
            }
        } else if ok {
            "[OK]".to_string()
        } else {
            "[MISSING]".to_string()
        }
    };

    println!(
        "    Backend:    {} {}",
        mark(report.backend_reachable),
        report.base_url
    );

    if !report.backend_reachable {
        println!();
        println!("  Start the backend with: ollama serve");
        println!();
        return;
    }

    for status in &report.models {
        println!(
            "    {:<11} {} {}",
            format!("{}:", status.role),
            mark(status.available),
            status.model
        );
    }

    let missing: Vec<&ModelStatus> = report.models.iter().filter(|m| !m.available).collect();
    if !missing.is_empty() {
        println!();
        println!("  Missing models. Run:");
        for status in missing {
            println!("    ollama pull {}", status.model);
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_available_matches_exact_name() {
        let installed = vec!["qwen2.5:1.5b".to_string()];
        assert!(model_available(&installed, "qwen2.5:1.5b"));
    }

    #[test]
    fn model_available_matches_base_name_prefix() {
        let installed = vec!["qwen2.5:1.5b-instruct".to_string()];
        assert!(model_available(&installed, "qwen2.5:7b"));
    }

    #[test]
    fn model_available_rejects_absent_model() {
        let installed = vec!["mistral:latest".to_string()];
        assert!(!model_available(&installed, "deep-tutor"));
    }

    #[test]
    fn model_statuses_cover_tiers_and_classifier() {
        let config = TroikaConfig::default();
        let statuses = model_statuses(&config, &["qwen2.5:1.5b".to_string()]);
        assert_eq!(statuses.len(), 4);
        let roles: Vec<&str> = statuses.iter().map(|s| s.role.as_str()).collect();
        assert_eq!(roles, vec!["fast", "normal", "strong", "classifier"]);
    }

    #[test]
    fn status_report_serializes() {
        let report = StatusReport {
            backend_reachable: true,
            base_url: "http://localhost:11434".to_string(),
            models: vec![ModelStatus {
                role: "fast".to_string(),
                model: "qwen2.5:1.5b".to_string(),
                available: true,
            }],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"backend_reachable\":true"));
        assert!(json.contains("\"role\":\"fast\""));
    }
}
