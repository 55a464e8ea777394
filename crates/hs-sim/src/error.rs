use std::path::PathBuf;

use hs_core::CoreError;
use hs_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("cannot read settings file {path}: {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("unknown map {0:?}")]
    UnknownMap(String),

    #[error("no map has been selected")]
    NoCurrentMap,

    #[error("unknown node {key:?} in map {map:?}")]
    UnknownNode { map: String, key: String },

    #[error("unknown participant {0:?}")]
    UnknownParticipant(String),

    #[error("participant {0:?} already exists")]
    DuplicateParticipant(String),
}

pub type SimResult<T> = Result<T, SimError>;
