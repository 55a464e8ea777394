//! JSON map loader.
//!
//! # Map format
//!
//! ```json
//! {
//!   "metadata": { "rootDirectory": "." },
//!   "nodes": { "a": { "budget": "350" }, "b": {} },
//!   "edges": { "ab": { "from": "a", "to": "b", "distance": 12.5, "pdf": [0.5, 0.5] } }
//! }
//! ```
//!
//! `nodes` and `edges` are either inline `key → object` maps or a reference
//! `{ "filePath": "nodes.json" }` to a file holding such a map.  Referenced
//! files resolve against `metadata.rootDirectory`, which itself resolves
//! against the map file's directory.
//!
//! Nodes are numbered in key order.  Entries that cannot be used (bad
//! budget, edge to an unknown node) are skipped with a warning rather than
//! failing the whole map.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use hs_core::SimRng;

use crate::{DelayPdf, GraphError, GraphResult, SimulationGraph, SimulationGraphBuilder};

/// Budget drawn for nodes that do not specify one.
pub const DEFAULT_BUDGET_RANGE: RangeInclusive<u32> = 300..=500;

/// Distance used for edges that do not specify one.
pub const DEFAULT_EDGE_DISTANCE: f32 = 50.0;

const FILE_PATH_KEY: &str = "filePath";

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct MapFile {
    #[serde(default)]
    metadata: Metadata,
    #[serde(default)]
    nodes:    Map<String, Value>,
    #[serde(default)]
    edges:    Map<String, Value>,
}

#[derive(Deserialize, Default)]
struct Metadata {
    #[serde(rename = "rootDirectory")]
    root_directory: Option<PathBuf>,
}

#[derive(Deserialize)]
struct NodeRecord {
    #[serde(default)]
    budget: Option<BudgetValue>,
}

/// Budgets appear both as JSON numbers and as numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum BudgetValue {
    Number(u64),
    Text(String),
}

impl BudgetValue {
    fn parse(&self) -> Option<u32> {
        match self {
            BudgetValue::Number(n) => u32::try_from(*n).ok(),
            BudgetValue::Text(s)   => s.trim().parse().ok(),
        }
    }
}

#[derive(Deserialize)]
struct EdgeRecord {
    from:     String,
    to:       String,
    #[serde(default)]
    distance: Option<f32>,
    #[serde(default)]
    pdf:      Vec<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a map file.  `rng` supplies default node budgets.
pub fn load_map(path: &Path, rng: &mut SimRng) -> GraphResult<SimulationGraph> {
    let text = read(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    load_map_str(&text, base_dir, rng)
}

/// Like [`load_map`] but parses `json` directly; `base_dir` stands in for the
/// map file's directory when resolving `filePath` references.
pub fn load_map_str(json: &str, base_dir: &Path, rng: &mut SimRng) -> GraphResult<SimulationGraph> {
    let map: MapFile = serde_json::from_str(json)?;
    let root = match &map.metadata.root_directory {
        Some(dir) => base_dir.join(dir),
        None      => base_dir.to_path_buf(),
    };

    let mut builder = SimulationGraphBuilder::new();

    // ── Nodes ─────────────────────────────────────────────────────────────
    let started = Instant::now();
    let nodes = resolve_section(map.nodes, &root)?;
    for (key, value) in nodes {
        let record: NodeRecord = match serde_json::from_value(value) {
            Ok(r)  => r,
            Err(e) => {
                warn!(node = %key, error = %e, "skipping malformed node");
                continue;
            }
        };
        let budget = match &record.budget {
            None => rng.gen_range(DEFAULT_BUDGET_RANGE),
            Some(b) => match b.parse() {
                Some(v) => v,
                None => {
                    warn!(node = %key, "skipping node with unparsable budget");
                    continue;
                }
            },
        };
        builder.add_node(key, budget)?;
    }
    info!(nodes = builder.node_count(), elapsed = ?started.elapsed(), "parsed nodes");

    // ── Edges ─────────────────────────────────────────────────────────────
    let started = Instant::now();
    let edges = resolve_section(map.edges, &root)?;
    for (key, value) in edges {
        let record: EdgeRecord = match serde_json::from_value(value) {
            Ok(r)  => r,
            Err(e) => {
                warn!(edge = %key, error = %e, "skipping malformed edge");
                continue;
            }
        };
        let (Some(from), Some(to)) = (builder.node(&record.from), builder.node(&record.to)) else {
            warn!(edge = %key, from = %record.from, to = %record.to, "skipping edge with unknown endpoint");
            continue;
        };
        let distance = record.distance.unwrap_or(DEFAULT_EDGE_DISTANCE);
        builder.add_edge(key, from, to, distance, DelayPdf::new(record.pdf))?;
    }
    info!(edges = builder.edge_count(), elapsed = ?started.elapsed(), "parsed edges");

    Ok(builder.build())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn read(path: &Path) -> GraphResult<String> {
    std::fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Return the section's `key → object` map, following a `filePath`
/// reference if present.
fn resolve_section(section: Map<String, Value>, root: &Path) -> GraphResult<Map<String, Value>> {
    let Some(reference) = section.get(FILE_PATH_KEY) else {
        return Ok(section);
    };
    let Some(file) = reference.as_str() else {
        return Err(GraphError::Format(format!("{FILE_PATH_KEY} must be a string")));
    };
    let path = root.join(file);
    info!(path = %path.display(), "reading map section");
    let value: Value = serde_json::from_str(&read(&path)?)?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(GraphError::Format(format!(
            "{} must contain a top-level object",
            path.display()
        ))),
    }
}
