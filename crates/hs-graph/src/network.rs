//! Simulation graph representation and builder.
//!
//! # Data layout
//!
//! Outgoing edges are stored in **Compressed Sparse Row (CSR)** form.  Given
//! a `NodeId n`, its outgoing edges occupy
//!
//! ```text
//! edge_*[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Nodes and edges also carry the string keys they were loaded under; a hash
//! index maps node keys back to `NodeId`s for settings lookups.

use rustc_hash::FxHashMap;

use hs_core::{EdgeId, NodeId, SimRng};

use crate::{DelayPdf, GraphError, GraphResult};

/// Routing costs are integer; distances are scaled by this before rounding.
pub const COST_SCALE: f32 = 1_000.0;

// ── SimulationGraph ───────────────────────────────────────────────────────────

/// Directed graph in CSR format.
///
/// Do not construct directly; use [`SimulationGraphBuilder`].
#[derive(Debug)]
pub struct SimulationGraph {
    // ── Node data (indexed by NodeId) ─────────────────────────────────────
    pub node_keys:   Vec<String>,
    /// Hops a node can absorb before it stops being routable.
    pub node_budget: Vec<u32>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    pub edge_keys:     Vec<String>,
    pub edge_from:     Vec<NodeId>,
    pub edge_to:       Vec<NodeId>,
    pub edge_distance: Vec<f32>,
    /// `edge_distance * COST_SCALE`, rounded.  Dijkstra edge cost.
    pub edge_cost:     Vec<u32>,
    pub edge_pdf:      Vec<DelayPdf>,

    node_index: FxHashMap<String, NodeId>,
}

impl SimulationGraph {
    pub fn empty() -> Self {
        SimulationGraphBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_keys.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_keys.is_empty()
    }

    // ── Key lookups ───────────────────────────────────────────────────────

    pub fn node(&self, key: &str) -> Option<NodeId> {
        self.node_index.get(key).copied()
    }

    pub fn has_node(&self, key: &str) -> bool {
        self.node_index.contains_key(key)
    }

    /// Key of `node`, or `None` if the id is out of range.
    pub fn key(&self, node: NodeId) -> Option<&str> {
        self.node_keys.get(node.index()).map(String::as_str)
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Uniformly chosen node, or `None` if the graph is empty.
    pub fn random_node(&self, rng: &mut SimRng) -> Option<NodeId> {
        rng.index(self.node_count()).map(|i| NodeId(i as u32))
    }
}

// ── SimulationGraphBuilder ────────────────────────────────────────────────────

/// Construct a [`SimulationGraph`] incrementally, then call
/// [`build`](Self::build).
///
/// ```
/// use hs_graph::{DelayPdf, SimulationGraphBuilder};
///
/// let mut b = SimulationGraphBuilder::new();
/// let a = b.add_node("a", 400).unwrap();
/// let c = b.add_node("c", 400).unwrap();
/// b.add_edge("ac", a, c, 12.5, DelayPdf::default()).unwrap();
/// let graph = b.build();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1); // directed
/// ```
#[derive(Default)]
pub struct SimulationGraphBuilder {
    keys:       Vec<String>,
    budgets:    Vec<u32>,
    index:      FxHashMap<String, NodeId>,
    raw_edges:  Vec<RawEdge>,
    edge_index: FxHashMap<String, usize>,
}

struct RawEdge {
    key:      String,
    from:     NodeId,
    to:       NodeId,
    distance: f32,
    pdf:      DelayPdf,
}

impl SimulationGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    ///
    /// Re-adding an existing key returns the original id; its first budget
    /// is kept.
    pub fn add_node(&mut self, key: impl Into<String>, budget: u32) -> GraphResult<NodeId> {
        let key = key.into();
        if let Some(&id) = self.index.get(&key) {
            return Ok(id);
        }
        let id = NodeId::from_index(self.keys.len())?;
        self.index.insert(key.clone(), id);
        self.keys.push(key);
        self.budgets.push(budget);
        Ok(id)
    }

    pub fn node(&self, key: &str) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// Add a **directed** edge `from → to`.
    ///
    /// An edge added under an existing key replaces the earlier one.
    /// Negative or non-finite distances are clamped to zero.
    pub fn add_edge(
        &mut self,
        key:      impl Into<String>,
        from:     NodeId,
        to:       NodeId,
        distance: f32,
        pdf:      DelayPdf,
    ) -> GraphResult<()> {
        for node in [from, to] {
            if node.index() >= self.keys.len() {
                return Err(GraphError::NodeNotFound(node));
            }
        }
        let key = key.into();
        let distance = if distance.is_finite() { distance.max(0.0) } else { 0.0 };
        let edge = RawEdge { key: key.clone(), from, to, distance, pdf };
        match self.edge_index.get(&key) {
            Some(&pos) => self.raw_edges[pos] = edge,
            None => {
                self.edge_index.insert(key, self.raw_edges.len());
                self.raw_edges.push(edge);
            }
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize { self.keys.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`SimulationGraph`].
    ///
    /// Edges are sorted by source node; the sort is stable, so edges leaving
    /// the same node keep insertion order.
    pub fn build(self) -> SimulationGraph {
        let node_count = self.keys.len();
        let edge_count = self.raw_edges.len();

        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:     Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:       Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_distance: Vec<f32>    = raw.iter().map(|e| e.distance).collect();
        let edge_cost:     Vec<u32>    = raw
            .iter()
            .map(|e| (e.distance * COST_SCALE).round() as u32)
            .collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let (edge_keys, edge_pdf): (Vec<String>, Vec<DelayPdf>) =
            raw.into_iter().map(|e| (e.key, e.pdf)).unzip();

        SimulationGraph {
            node_keys: self.keys,
            node_budget: self.budgets,
            node_out_start,
            edge_keys,
            edge_from,
            edge_to,
            edge_distance,
            edge_cost,
            edge_pdf,
            node_index: self.index,
        }
    }
}
