// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tier routing with per-session overrides.
//!
//! Orchestrates the decision for each query: forced tier (one-shot) >
//! classification (rule-based or model-assisted), with a pinned session
//! temperature dominating whatever the classifier chose. The chosen tier's
//! history receives the user turn before the decision is returned, and the
//! caller pairs that append with a rollback if dispatch fails.

use std::sync::Arc;

use tracing::info;

use troika_config::model::RoutingConfig;
use troika_core::{ProviderAdapter, Tier};

use crate::assist::ModelClassifier;
use crate::classifier::QueryClassifier;
use crate::session::Session;
use crate::shaper::TemperatureShaper;

/// A routing decision for one query. Produced fresh per query, never
/// mutated, and plain data so any front end can consume it.
#[derive(Debug, Clone)]
pub struct RoutingDecision {
    /// The tier the query was routed to.
    pub tier: Tier,
    /// Model identifier configured for that tier.
    pub model: String,
    /// Sampling temperature in [0, 1].
    pub temperature: f32,
    /// Human-readable reason for the decision.
    pub rationale: String,
}

/// Routes queries to model tiers and keeps session state consistent.
pub struct Router {
    classifier: QueryClassifier,
    assist: Option<ModelClassifier>,
    config: RoutingConfig,
}

impl Router {
    /// Create a router with only the rule-based classifier available.
    pub fn new(config: RoutingConfig) -> Self {
        Self {
            classifier: QueryClassifier::new(),
            assist: None,
            config,
        }
    }

    /// Create a router that can also delegate classification to the
    /// configured auxiliary model on `provider`.
    pub fn with_provider(config: RoutingConfig, provider: Arc<dyn ProviderAdapter>) -> Self {
        let shaper = TemperatureShaper::new(config.temp_center, config.temp_spread);
        let assist = ModelClassifier::new(provider, config.classifier_model.clone(), shaper);
        Self {
            classifier: QueryClassifier::new(),
            assist: Some(assist),
            config,
        }
    }

    /// The model identifier configured for a tier.
    pub fn model_for(&self, tier: Tier) -> &str {
        match tier {
            Tier::Fast => &self.config.fast_model,
            Tier::Normal => &self.config.normal_model,
            Tier::Strong => &self.config.strong_model,
        }
    }

    /// Route one query.
    ///
    /// Precedence: a forced tier (one-shot) bypasses classification
    /// entirely; otherwise the rule-based or model-assisted classifier
    /// decides. A pinned session temperature overrides any
    /// classifier-chosen value, forced or automatic. The user turn is
    /// recorded into the chosen tier's history before returning; nothing
    /// else in the session is mutated.
    pub async fn route(
        &self,
        query: &str,
        session: &mut Session,
        use_model_assist: bool,
    ) -> RoutingDecision {
        if let Some(tier) = session.consume_forced_tier() {
            let temperature = session
                .fixed_temperature()
                .unwrap_or(self.config.default_temperature);
            session.record_user_turn(tier, query);
            info!(tier = %tier, "routing forced by user");
            return RoutingDecision {
                tier,
                model: self.model_for(tier).to_string(),
                temperature,
                rationale: "forced".to_string(),
            };
        }

        let (tier, mut temperature, rationale) = match (&self.assist, use_model_assist) {
            (Some(assist), true) => {
                let classification = assist.classify(query).await;
                (
                    classification.tier,
                    classification.temperature,
                    classification.reason,
                )
            }
            _ => {
                let tier = self.classifier.classify(query);
                (
                    tier,
                    self.config.default_temperature,
                    "rule-based".to_string(),
                )
            }
        };

        if let Some(fixed) = session.fixed_temperature() {
            temperature = fixed;
        }

        session.record_user_turn(tier, query);
        info!(tier = %tier, temperature, rationale = %rationale, "query routed");

        RoutingDecision {
            tier,
            model: self.model_for(tier).to_string(),
            temperature,
            rationale,
        }
    }
}
