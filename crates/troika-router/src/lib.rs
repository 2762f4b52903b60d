// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query classification and tier routing for Troika.
//!
//! This crate provides:
//! - [`QueryClassifier`]: rule-based tier classification (zero-cost, zero-latency)
//! - [`ModelClassifier`]: model-assisted classification with safe fallback
//! - [`TemperatureShaper`]: Gaussian shrinkage of proposed temperatures
//! - [`Session`]: per-tier conversation histories and override state
//! - [`Router`]: the facade that turns a query into a [`RoutingDecision`]
//!
//! The router decides, per query, which model tier to use and at what
//! sampling temperature, honoring one-shot forced-tier overrides and a
//! standing fixed-temperature override. The caller dispatches the chat call
//! itself and records the assistant turn (or rolls the user turn back on
//! dispatch failure).

pub mod assist;
pub mod classifier;
pub mod router;
pub mod session;
pub mod shaper;

pub use assist::{Classification, ModelClassifier};
pub use classifier::QueryClassifier;
pub use router::{Router, RoutingDecision};
pub use session::Session;
pub use shaper::TemperatureShaper;
