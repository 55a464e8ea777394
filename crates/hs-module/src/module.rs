//! The `SimulationModule` facade.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::views::{SimulationData, SimulationSettings};
use crate::{ModuleResult, NativeEngine, SimulationEngine, resolve_settings_path};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ModuleState {
    Uninitialized,
    Initialized,
}

/// Owns one engine instance for its whole lifetime and forwards calls to it.
///
/// The engine itself is never handed out; callers only see
/// [`SimulationSettings`] snapshots and [`SimulationData`] query handles.
/// Accessors work in either [`ModuleState`]; what they return before
/// initialization is up to the engine.
pub struct SimulationModule<E: SimulationEngine = NativeEngine> {
    name:          String,
    engine:        E,
    state:         ModuleState,
    settings_path: Option<PathBuf>,
}

impl<E: SimulationEngine> SimulationModule<E> {
    /// Construct the engine tagged with `name`.
    pub fn new(name: impl Into<String>) -> ModuleResult<Self> {
        let name = name.into();
        let engine = E::construct(&name)?;
        debug!(module = %name, "engine constructed");
        Ok(Self {
            name,
            engine,
            state: ModuleState::Uninitialized,
            settings_path: None,
        })
    }

    /// Resolve `settings_path` to an absolute path and initialize the engine
    /// with it.
    ///
    /// On failure the module is left `Uninitialized`, whatever it was before.
    pub fn initialize(&mut self, settings_path: impl AsRef<Path>) -> ModuleResult<()> {
        self.state = ModuleState::Uninitialized;
        self.settings_path = None;

        let absolute = resolve_settings_path(settings_path.as_ref())?;
        info!(module = %self.name, path = %absolute.display(), "initializing engine");
        self.engine.initialize(&absolute)?;

        self.state = ModuleState::Initialized;
        self.settings_path = Some(absolute);
        Ok(())
    }

    pub fn settings(&self) -> SimulationSettings<E> {
        SimulationSettings::from_engine(&self.engine)
    }

    pub fn data(&self) -> SimulationData<'_, E> {
        SimulationData::from_engine(&self.engine)
    }

    pub fn hop_count(&self, name: &str) -> ModuleResult<u32> {
        self.data().hop_count(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ModuleState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == ModuleState::Initialized
    }

    /// Absolute path of the last successful initialization.
    pub fn settings_path(&self) -> Option<&Path> {
        self.settings_path.as_deref()
    }
}
