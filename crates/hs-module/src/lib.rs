//! `hs-module` — the simulation facade.
//!
//! [`SimulationModule`] owns exactly one engine instance and forwards three
//! things to it: construction by name, initialization from a settings path
//! (made absolute first), and read-only queries.  It does no simulation work
//! itself.
//!
//! The engine sits behind the [`SimulationEngine`] trait.  [`NativeEngine`]
//! is the in-tree implementation backed by `hs-sim`.
//!
//! ```no_run
//! use hs_module::NativeModule;
//!
//! let mut module = NativeModule::new("net-A")?;
//! module.initialize("./cfg/settings.json")?;
//! let hops = module.hop_count("nodeX")?;
//! # Ok::<(), hs_module::ModuleError>(())
//! ```
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`engine`] | `SimulationEngine` trait, `EngineError`                   |
//! | [`native`] | `NativeEngine` — `hs-sim` behind the engine trait         |
//! | [`module`] | `SimulationModule<E>`, `ModuleState`                      |
//! | [`views`]  | `SimulationSettings<E>`, `SimulationData<'_, E>`          |
//! | [`path`]   | `resolve_settings_path`                                   |
//! | [`error`]  | `ModuleError`, `ModuleResult<T>`                          |

pub mod engine;
pub mod error;
pub mod module;
pub mod native;
pub mod path;
pub mod views;


pub use engine::{EngineError, EngineResult, SimulationEngine};
pub use error::{ModuleError, ModuleResult};
pub use module::{ModuleState, SimulationModule};
pub use native::NativeEngine;
pub use path::resolve_settings_path;
pub use views::{SimulationData, SimulationSettings};

/// The facade over the in-tree engine.
pub type NativeModule = SimulationModule<NativeEngine>;
