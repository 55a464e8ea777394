//! Facade error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::EngineError;

#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("cannot resolve settings path {path:?}: {source}")]
    PathResolution {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raised when code tries to create a type that only an engine query may
    /// produce.
    #[error("{0} cannot be constructed directly; obtain it from a SimulationModule")]
    UnsupportedConstruction(&'static str),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ModuleError {
    pub fn is_unknown_entity(&self) -> bool {
        matches!(self, ModuleError::Engine(EngineError::UnknownEntity(_)))
    }
}

pub type ModuleResult<T> = Result<T, ModuleError>;
