//! The contract every engine behind the facade must satisfy.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Failures reported by an engine.  The facade passes them through unchanged.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine could not be created: {0}")]
    Init(String),

    #[error("engine configuration failed: {0}")]
    Config(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("unknown entity {0:?}")]
    UnknownEntity(String),

    #[error("engine has not been initialized")]
    NotInitialized,
}

impl EngineError {
    /// Wrap any error raised while applying settings.
    pub fn config<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        EngineError::Config(Box::new(err))
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

/// A simulation engine.
///
/// Calls are synchronous and blocking.  The facade guarantees that
/// `initialize` only ever receives absolute paths.
pub trait SimulationEngine: Sized {
    /// Read-only settings snapshot handed out by [`settings`](Self::settings).
    type Settings: Clone + PartialEq + fmt::Debug;

    /// Create an engine instance tagged with `name`.
    fn construct(name: &str) -> EngineResult<Self>;

    fn initialize(&mut self, settings_path: &Path) -> EngineResult<()>;

    fn settings(&self) -> Self::Settings;

    /// Hops recorded for the entity called `name`.  Unknown names must fail
    /// with [`EngineError::UnknownEntity`], never report zero.
    fn hop_count(&self, name: &str) -> EngineResult<u32>;

    /// A fresh settings value, independent of any engine instance.
    fn construct_settings() -> Self::Settings;
}
