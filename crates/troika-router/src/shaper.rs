// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gaussian temperature shaping.
//!
//! Pulls classifier-proposed temperatures toward a configured center: values
//! near the center pass through almost unchanged, extreme values are
//! shrunk toward it. This respects the classifier's creativity judgment
//! while avoiding degenerate extremes.

/// Shrinks proposed temperatures toward a center using a Gaussian kernel.
#[derive(Debug, Clone, Copy)]
pub struct TemperatureShaper {
    center: f32,
    spread: f32,
}

impl TemperatureShaper {
    /// Create a shaper with a custom center and spread (sigma).
    pub fn new(center: f32, spread: f32) -> Self {
        Self { center, spread }
    }

    /// Shape a proposed temperature.
    ///
    /// Computes `weight = exp(-distance² / (2·spread²))` where `distance`
    /// is the absolute offset from the center, then blends
    /// `proposed·weight + center·(1-weight)`. Weight is 1 at the center
    /// and decays toward 0 with distance, so the output is the proposed
    /// value near the center and approaches the center at the extremes.
    /// The result is clamped to [0, 1].
    pub fn shape(&self, proposed: f32) -> f32 {
        let distance = (proposed - self.center).abs();
        let weight = (-(distance * distance) / (2.0 * self.spread * self.spread)).exp();
        (proposed * weight + self.center * (1.0 - weight)).clamp(0.0, 1.0)
    }
}

impl Default for TemperatureShaper {
    fn default() -> Self {
        Self {
            center: 0.7,
            spread: 0.15,
        }
    }
}
