//! `hs-sim` — the simulation engine behind the `hopsim` facade.
//!
//! # Step loop
//!
//! ```text
//! for step in 0..parameters.max_steps:
//!   ① Arrivals   — participants whose current hop ends this step move to
//!                  the next node; the hop is recorded in SimulationData.
//!   ② Departures — every stationary participant routes toward its
//!                  destination and starts across the first edge.  The
//!                  entered node's budget is consumed now.  No route ⇒
//!                  Stranded.
//!   ③ Clock      — SimulationData advances by parameters.time_step.
//! ```
//!
//! The loop stops early once nobody is moving or able to move (unless
//! `stop_when_idle` is off).
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`settings`]    | `SimulationSettings` and its JSON file format             |
//! | [`participant`] | `ParticipantState`, `ParticipantStore`                    |
//! | [`data`]        | `SimulationData`, `Hop`                                   |
//! | [`world`]       | `SimulationWorld<R>`, `RunSummary`                        |
//! | [`observer`]    | `SimObserver`, `NoopObserver`                             |
//! | [`output`]      | `HopCsvObserver`, `OutputError`                           |
//! | [`error`]       | `SimError`, `SimResult<T>`                                |

pub mod data;
pub mod error;
pub mod observer;
pub mod output;
pub mod participant;
pub mod settings;
pub mod world;

#[cfg(test)]
mod tests;

pub use data::{Hop, SimulationData};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use output::{HopCsvObserver, OutputError, OutputResult};
pub use participant::{ParticipantState, ParticipantStatus, ParticipantStore};
pub use settings::{
    OutputSettings, ParticipantSettings, ParticipantSpec, SimulationParameters, SimulationSettings,
};
pub use world::{RunSummary, SimulationMap, SimulationWorld};
