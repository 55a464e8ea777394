//! Graph-subsystem error type.

use std::path::PathBuf;

use thiserror::Error;

use hs_core::{CoreError, NodeId};

/// Errors produced by `hs-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("cannot read map file {path}: {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("map JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed map: {0}")]
    Format(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type GraphResult<T> = Result<T, GraphError>;
