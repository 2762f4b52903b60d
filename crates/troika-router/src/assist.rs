// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model-assisted query classification.
//!
//! Delegates classification to a small auxiliary model on the inference
//! backend, then validates and normalizes its output. Small models are
//! unreliable strict-schema producers: they wrap JSON in prose and invent
//! enum values, so extraction and normalization here are defensive, and any
//! failure downgrades to a safe fallback decision rather than an error.

use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, warn};

use troika_core::types::{GenerateRequest, Tier};
use troika_core::{ProviderAdapter, TroikaError};

use crate::shaper::TemperatureShaper;

/// Sampling temperature for the classification call itself. Kept low so the
/// classifier's own output stays deterministic.
const CLASSIFY_TEMPERATURE: f32 = 0.2;

/// Temperature used when the model omits one, and for fallback decisions.
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// System instruction for the auxiliary classifier model. Specifies the
/// exact output contract: one JSON object, nothing else.
const CLASSIFIER_SYSTEM_PROMPT: &str = r#"You are a query classifier. Analyze the user's question and decide:

1. DIFFICULTY (which model tier to use):
   - "fast": Simple questions, greetings, quick facts, definitions, yes/no questions
   - "normal": General explanations, comparisons, "how does X work", basic coding
   - "strong": Complex reasoning, detailed analysis, debugging, multi-step problems, proofs, advanced topics

2. CREATIVITY (temperature 0.0 to 1.0):
   - 0.2-0.4: Factual questions, math, code, precise answers needed
   - 0.5-0.7: General explanations, balanced response
   - 0.8-1.0: Creative writing, brainstorming, open-ended exploration

Respond with ONLY a JSON object, no other text:
{"difficulty": "fast|normal|strong", "temperature": 0.0-1.0, "reason": "brief explanation"}

Examples:
User: "Hi!"
{"difficulty": "fast", "temperature": 0.7, "reason": "Simple greeting"}

User: "What is photosynthesis?"
{"difficulty": "fast", "temperature": 0.5, "reason": "Simple definition question"}

User: "Explain how photosynthesis works"
{"difficulty": "normal", "temperature": 0.6, "reason": "General explanation needed"}

User: "Explain the biochemical pathway of photosynthesis step by step with equations"
{"difficulty": "strong", "temperature": 0.4, "reason": "Complex scientific explanation with precise details"}

User: "Write a creative story about a robot"
{"difficulty": "normal", "temperature": 0.9, "reason": "Creative writing needs high temperature"}

User: "Debug this Python code: def foo(): return x"
{"difficulty": "strong", "temperature": 0.3, "reason": "Code debugging needs precision"}"#;

/// A validated classification produced by the auxiliary model (or the
/// fallback when the model could not be consulted).
#[derive(Debug, Clone)]
pub struct Classification {
    pub tier: Tier,
    /// Already shaped and clamped to [0, 1].
    pub temperature: f32,
    pub reason: String,
}

impl Classification {
    /// The safe decision used when classification fails for any reason.
    pub fn fallback() -> Self {
        Self {
            tier: Tier::Normal,
            temperature: DEFAULT_TEMPERATURE,
            reason: "fallback".to_string(),
        }
    }
}

/// Classifier that delegates to an auxiliary model on the backend.
pub struct ModelClassifier {
    provider: Arc<dyn ProviderAdapter>,
    model: String,
    shaper: TemperatureShaper,
}

impl ModelClassifier {
    /// Create a classifier using `model` on the given backend.
    pub fn new(provider: Arc<dyn ProviderAdapter>, model: String, shaper: TemperatureShaper) -> Self {
        Self {
            provider,
            model,
            shaper,
        }
    }

    /// Classify a query.
    ///
    /// Never fails: any backend, parsing, or coercion error downgrades to
    /// [`Classification::fallback`] and is logged.
    pub async fn classify(&self, query: &str) -> Classification {
        match self.try_classify(query).await {
            Ok(classification) => classification,
            Err(e) => {
                warn!(error = %e, model = %self.model, "model-assisted classification failed, using fallback");
                Classification::fallback()
            }
        }
    }

    async fn try_classify(&self, query: &str) -> Result<Classification, TroikaError> {
        let raw = self
            .provider
            .generate(GenerateRequest {
                model: self.model.clone(),
                prompt: format!("Classify this query:\n\n{query}"),
                system: Some(CLASSIFIER_SYSTEM_PROMPT.to_string()),
                temperature: CLASSIFY_TEMPERATURE,
            })
            .await?;

        let json = extract_json_object(&raw).ok_or_else(|| TroikaError::Provider {
            message: "classifier output contained no JSON object".into(),
            source: None,
        })?;

        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| TroikaError::Provider {
                message: format!("classifier output was not valid JSON: {e}"),
                source: Some(Box::new(e)),
            })?;

        // Unrecognized or missing difficulty normalizes to the normal tier.
        let tier = value
            .get("difficulty")
            .and_then(|v| v.as_str())
            .and_then(|s| Tier::from_str(&s.to_lowercase()).ok())
            .unwrap_or(Tier::Normal);

        let proposed = value
            .get("temperature")
            .and_then(json_number)
            .unwrap_or(DEFAULT_TEMPERATURE)
            .clamp(0.0, 1.0);
        let temperature = self.shaper.shape(proposed);

        let reason = value
            .get("reason")
            .and_then(|v| v.as_str())
            .unwrap_or("model classification")
            .to_string();

        debug!(tier = %tier, temperature, "model-assisted classification");

        Ok(Classification {
            tier,
            temperature,
            reason,
        })
    }
}

/// Read a JSON value as f32, accepting numbers and numeric strings.
fn json_number(value: &serde_json::Value) -> Option<f32> {
    value
        .as_f64()
        .map(|f| f as f32)
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Extract the first balanced `{...}` substring from free-form text.
///
/// String-literal and escape aware, so braces inside JSON strings do not
/// unbalance the scan. Returns `None` when no opening brace exists or the
/// braces never balance.
pub(crate) fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}
