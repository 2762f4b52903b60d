// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Troika.
//!
//! Provides [`MockProvider`], a deterministic in-memory implementation of
//! the provider adapter trait for fast, CI-runnable tests without a running
//! backend.

pub mod mock_provider;

pub use mock_provider::MockProvider;
