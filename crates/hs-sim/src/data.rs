//! Recorded simulation results.

use rustc_hash::{FxHashMap, FxHashSet};

use hs_core::{CoreResult, NodeId, ParticipantId, SimClock, Step};

/// One completed edge traversal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hop {
    pub participant: ParticipantId,
    pub from:        NodeId,
    pub to:          NodeId,
    /// Clock time at arrival.
    pub timestamp:   f64,
}

/// Hops recorded during a run, grouped by participant name, plus the
/// simulation clock.
///
/// A participant is known once [`register`](Self::register)ed, and reports
/// zero hops until it moves.  Names never registered are unknown:
/// [`hop_count`](Self::hop_count) returns `None` for them.
#[derive(Default)]
pub struct SimulationData {
    hop_data:   FxHashMap<String, Vec<Hop>>,
    visited:    FxHashSet<NodeId>,
    total_hops: usize,
    clock:      SimClock,
}

impl SimulationData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str) {
        if !self.hop_data.contains_key(name) {
            self.hop_data.insert(name.to_owned(), Vec::new());
        }
    }

    pub fn record_hop(&mut self, name: &str, hop: Hop) {
        self.visited.insert(hop.from);
        self.visited.insert(hop.to);
        self.total_hops += 1;
        match self.hop_data.get_mut(name) {
            Some(hops) => hops.push(hop),
            None => {
                self.hop_data.insert(name.to_owned(), vec![hop]);
            }
        }
    }

    pub fn hop_count(&self, name: &str) -> Option<u32> {
        self.hop_data
            .get(name)
            .map(|hops| u32::try_from(hops.len()).unwrap_or(u32::MAX))
    }

    pub fn hops_for(&self, name: &str) -> Option<&[Hop]> {
        self.hop_data.get(name).map(Vec::as_slice)
    }

    /// Total hops across all participants.
    pub fn hops(&self) -> usize {
        self.total_hops
    }

    /// Registered participant names, sorted.
    pub fn participants(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.hop_data.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Fraction of `total_nodes` touched by at least one hop.
    pub fn coverage(&self, total_nodes: usize) -> f32 {
        if total_nodes == 0 {
            return 0.0;
        }
        self.visited.len() as f32 / total_nodes as f32
    }

    // ── Clock ─────────────────────────────────────────────────────────────

    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    pub fn delta_time(&self) -> f64 {
        self.clock.delta_time()
    }

    pub fn current_step(&self) -> Step {
        self.clock.current_step()
    }

    pub fn advance_clock(&mut self, dt: f64) -> CoreResult<()> {
        self.clock.advance(dt)
    }

    pub fn reset_clock(&mut self) {
        self.clock.reset();
    }

    /// Drop all recorded hops and reset the clock.
    pub fn clear(&mut self) {
        self.hop_data.clear();
        self.visited.clear();
        self.total_hops = 0;
        self.clock.reset();
    }
}
