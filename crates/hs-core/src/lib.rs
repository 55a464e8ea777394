//! `hs-core` — foundational types for the `hopsim` network simulator.
//!
//! Every other `hs-*` crate depends on this one.  It has no `hs-*`
//! dependencies and only `rand` and `thiserror` as external ones.
//!
//! # What lives here
//!
//! | Module    | Contents                                          |
//! |-----------|---------------------------------------------------|
//! | [`ids`]   | `NodeId`, `EdgeId`, `ParticipantId`               |
//! | [`time`]  | `Step`, `SimClock`                                |
//! | [`rng`]   | `ParticipantRng` (per-participant), `SimRng`      |
//! | [`error`] | `CoreError`, `CoreResult`                         |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{EdgeId, NodeId, ParticipantId};
pub use rng::{ParticipantRng, SimRng};
pub use time::{SimClock, Step};
