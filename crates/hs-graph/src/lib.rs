//! `hs-graph` — simulation graph, map loading, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`network`] | `SimulationGraph` (CSR + key index), `SimulationGraphBuilder`|
//! | [`pdf`]     | `DelayPdf` — discrete per-edge traversal delay               |
//! | [`router`]  | `Router` trait, `Route`, `DijkstraRouter`                    |
//! | [`loader`]  | `load_map`, `load_map_str` — JSON map files                  |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                               |

pub mod error;
pub mod loader;
pub mod network;
pub mod pdf;
pub mod router;


pub use error::{GraphError, GraphResult};
pub use loader::{DEFAULT_BUDGET_RANGE, DEFAULT_EDGE_DISTANCE, load_map, load_map_str};
pub use network::{SimulationGraph, SimulationGraphBuilder};
pub use pdf::DelayPdf;
pub use router::{DijkstraRouter, Route, Router};
