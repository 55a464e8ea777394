//! Read-only handles the facade hands out.

use std::fmt;

use crate::{ModuleError, ModuleResult, SimulationEngine};

// ── SimulationSettings ────────────────────────────────────────────────────────

/// A settings snapshot owned by the caller.
///
/// Either fresh ([`new`](Self::new), via the engine's `construct_settings`)
/// or taken from an engine by
/// [`SimulationModule::settings`][crate::SimulationModule::settings].
pub struct SimulationSettings<E: SimulationEngine> {
    inner: E::Settings,
}

impl<E: SimulationEngine> SimulationSettings<E> {
    pub fn new() -> Self {
        Self { inner: E::construct_settings() }
    }

    pub(crate) fn from_engine(engine: &E) -> Self {
        Self { inner: engine.settings() }
    }

    pub fn get(&self) -> &E::Settings {
        &self.inner
    }
}

impl<E: SimulationEngine> Default for SimulationSettings<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: SimulationEngine> Clone for SimulationSettings<E> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<E: SimulationEngine> PartialEq for SimulationSettings<E> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<E: SimulationEngine> fmt::Debug for SimulationSettings<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SimulationSettings").field(&self.inner).finish()
    }
}

// ── SimulationData ────────────────────────────────────────────────────────────

/// Query handle over an engine's results.
///
/// Only [`SimulationModule::data`][crate::SimulationModule::data] produces
/// one.  There is no way to build it from parts:
///
/// ```compile_fail
/// use hs_module::{NativeEngine, SimulationData};
/// let data = SimulationData::<NativeEngine> { engine: todo!() };
/// ```
pub struct SimulationData<'a, E: SimulationEngine> {
    engine: &'a E,
}

impl<'a, E: SimulationEngine> SimulationData<'a, E> {
    /// Always fails with [`ModuleError::UnsupportedConstruction`].
    pub fn new() -> ModuleResult<Self> {
        Err(ModuleError::UnsupportedConstruction("SimulationData"))
    }

    pub(crate) fn from_engine(engine: &'a E) -> Self {
        Self { engine }
    }

    pub fn hop_count(&self, name: &str) -> ModuleResult<u32> {
        Ok(self.engine.hop_count(name)?)
    }
}
