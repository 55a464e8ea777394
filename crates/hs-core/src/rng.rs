//! Deterministic RNG wrappers.
//!
//! Each participant gets its own `SmallRng` seeded by
//!
//!   seed = global_seed XOR (participant_id * MIXING_CONSTANT)
//!
//! so the delay drawn for one participant never depends on how many draws
//! other participants made before it.  Global draws (random placement,
//! default node budgets) go through [`SimRng`].

use rand::distributions::WeightedIndex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::ParticipantId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── ParticipantRng ────────────────────────────────────────────────────────────

/// Per-participant deterministic RNG.
pub struct ParticipantRng(SmallRng);

impl ParticipantRng {
    pub fn new(global_seed: u64, participant: ParticipantId) -> Self {
        let seed = global_seed ^ (participant.0 as u64).wrapping_mul(MIXING_CONSTANT);
        ParticipantRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Draw an index with probability proportional to `weights[i]`.
    ///
    /// Returns `None` when the weights are empty, all zero, negative, or
    /// non-finite.
    pub fn weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        let dist = WeightedIndex::new(weights).ok()?;
        Some(self.0.sample(dist))
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform index in `[0, len)`, or `None` if `len == 0`.
    #[inline]
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.0.gen_range(0..len))
    }
}
