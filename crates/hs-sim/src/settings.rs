//! Simulation settings and their JSON file format.
//!
//! ```json
//! {
//!   "seed": 42,
//!   "maps": { "grid": "maps/grid.json" },
//!   "current_map": "grid",
//!   "parameters": { "time_step": 1.0, "max_steps": 1000, "stop_when_idle": true },
//!   "participants": {
//!     "explicit": [ { "name": "nodeX", "start": "a", "destination": "d" } ],
//!     "random_count": 3,
//!     "trace": ["nodeX"]
//!   },
//!   "output": { "hops_csv": "out/hops.csv" }
//! }
//! ```
//!
//! Every field is optional except `maps`, which must name at least one map.
//! Relative paths resolve against the settings file's directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{SimError, SimResult};

// ── SimulationSettings ────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSettings {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Map name → map file path.
    pub maps: BTreeMap<String, PathBuf>,

    /// Map to simulate on.  Defaults to the first name in `maps`.
    pub current_map: Option<String>,

    pub parameters: SimulationParameters,

    pub participants: ParticipantSettings,

    pub output: OutputSettings,
}

impl SimulationSettings {
    /// Read, parse, and validate a settings file.
    pub fn load(path: &Path) -> SimResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parse and validate settings from a JSON string.
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let settings: SimulationSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.maps.is_empty() {
            return Err(SimError::Config("settings must name at least one map".into()));
        }
        if let Some(name) = &self.current_map {
            if !self.maps.contains_key(name) {
                return Err(SimError::UnknownMap(name.clone()));
            }
        }
        self.parameters.validate()
    }

    /// The map the world starts on.
    pub fn current_map_name(&self) -> Option<&str> {
        self.current_map
            .as_deref()
            .or_else(|| self.maps.keys().next().map(String::as_str))
    }
}

// ── SimulationParameters ──────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationParameters {
    /// Clock delta added per step.
    pub time_step: f64,

    /// Hard upper bound on steps per run.
    pub max_steps: u64,

    /// End the run early once no participant is moving or can move.
    pub stop_when_idle: bool,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            time_step:      1.0,
            max_steps:      1_000,
            stop_when_idle: true,
        }
    }
}

impl SimulationParameters {
    pub fn validate(&self) -> SimResult<()> {
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(SimError::Config(format!(
                "time_step must be finite and positive, got {}",
                self.time_step
            )));
        }
        Ok(())
    }
}

// ── ParticipantSettings ───────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticipantSettings {
    /// Participants with fixed names and endpoints, placed first.
    pub explicit: Vec<ParticipantSpec>,

    /// Extra participants with random endpoints, named `participant-<id>`.
    pub random_count: usize,

    /// Names whose every hop is logged.
    pub trace: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParticipantSpec {
    pub name:        String,
    /// Node key the participant starts at.
    pub start:       String,
    /// Node key the participant travels to.
    pub destination: String,
}

// ── OutputSettings ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    /// Write every recorded hop to this CSV file.
    pub hops_csv: Option<PathBuf>,
}
