//! Discrete traversal-delay distribution attached to an edge.

use hs_core::ParticipantRng;

/// Weights over traversal durations: `weights[i]` is the relative chance
/// that crossing the edge takes `i + 1` steps.
///
/// An empty (or unusable) pdf means every traversal takes exactly one step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DelayPdf {
    weights: Vec<f64>,
}

impl DelayPdf {
    pub fn new(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Longest traversal the pdf can produce, in steps.
    pub fn max_steps(&self) -> u64 {
        self.weights.len().max(1) as u64
    }

    /// Expected traversal duration in steps.
    pub fn mean_steps(&self) -> f64 {
        let total: f64 = self.weights.iter().filter(|w| w.is_finite() && **w > 0.0).sum();
        if total <= 0.0 {
            return 1.0;
        }
        self.weights
            .iter()
            .enumerate()
            .filter(|(_, w)| w.is_finite() && **w > 0.0)
            .map(|(i, w)| (i as f64 + 1.0) * w / total)
            .sum()
    }

    /// Draw a traversal duration (≥ 1 step).
    pub fn sample_steps(&self, rng: &mut ParticipantRng) -> u64 {
        rng.weighted_index(&self.weights).map_or(1, |i| i as u64 + 1)
    }
}
