//! Step-loop callbacks.

use hs_core::Step;
use hs_graph::SimulationGraph;

use crate::Hop;

/// Callbacks invoked by
/// [`SimulationWorld::run_simulation`][crate::SimulationWorld::run_simulation].
///
/// All methods default to no-ops.
pub trait SimObserver {
    fn on_step_start(&mut self, _step: Step) {}

    /// Called for every completed hop, after it has been recorded.
    fn on_hop(&mut self, _participant: &str, _hop: &Hop, _graph: &SimulationGraph) {}

    /// `moving` is the number of participants in transit when the step ends.
    fn on_step_end(&mut self, _step: Step, _moving: usize) {}

    fn on_sim_end(&mut self, _final_step: Step) {}
}

pub struct NoopObserver;

impl SimObserver for NoopObserver {}
