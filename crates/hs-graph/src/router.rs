//! Routing trait and default Dijkstra implementation.
//!
//! The world calls routing through [`Router`], so a different search (A*,
//! hop-count minimisation) can be dropped in without touching the step loop.
//!
//! # Budgets
//!
//! Every query receives the *remaining* relay budget per node.  A node whose
//! remaining budget is zero cannot be entered; the source node is always
//! allowed.  Passing a slice shorter than the node count leaves the missing
//! nodes unconstrained (`&[]` disables the check entirely).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use hs_core::{EdgeId, NodeId};

use crate::network::SimulationGraph;
use crate::{GraphError, GraphResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Edges to traverse in order, from source to destination.
    pub edges:      Vec<EdgeId>,
    /// Sum of `edge_cost` along the route.
    pub total_cost: u32,
}

impl Route {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn first_edge(&self) -> Option<EdgeId> {
        self.edges.first().copied()
    }

    pub fn hop_count(&self) -> usize {
        self.edges.len()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

pub trait Router {
    /// Compute a route from `from` to `to`.
    ///
    /// `from == to` yields an empty route; an unreachable destination yields
    /// [`GraphError::NoRoute`].
    fn route(
        &self,
        graph:            &SimulationGraph,
        from:             NodeId,
        to:               NodeId,
        remaining_budget: &[u32],
    ) -> GraphResult<Route>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra over `edge_cost`, ties broken by lower `NodeId`.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        graph:            &SimulationGraph,
        from:             NodeId,
        to:               NodeId,
        remaining_budget: &[u32],
    ) -> GraphResult<Route> {
        dijkstra(graph, from, to, remaining_budget)
    }
}

#[inline]
fn exhausted(remaining_budget: &[u32], node: NodeId) -> bool {
    remaining_budget.get(node.index()) == Some(&0)
}

fn dijkstra(
    graph:            &SimulationGraph,
    from:             NodeId,
    to:               NodeId,
    remaining_budget: &[u32],
) -> GraphResult<Route> {
    for node in [from, to] {
        if !graph.contains(node) {
            return Err(GraphError::NodeNotFound(node));
        }
    }
    if from == to {
        return Ok(Route { edges: vec![], total_cost: 0 });
    }
    if exhausted(remaining_budget, to) {
        return Err(GraphError::NoRoute { from, to });
    }

    let n = graph.node_count();
    let mut dist      = vec![u32::MAX; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0;

    let mut heap: BinaryHeap<Reverse<(u32, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(graph, &prev_edge, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in graph.out_edges(node) {
            let neighbor = graph.edge_to[edge.index()];
            if exhausted(remaining_budget, neighbor) {
                continue;
            }
            let new_cost = cost.saturating_add(graph.edge_cost[edge.index()]);

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    Err(GraphError::NoRoute { from, to })
}

fn reconstruct(
    graph:     &SimulationGraph,
    prev_edge: &[EdgeId],
    to:        NodeId,
    total:     u32,
) -> Route {
    let mut edges = Vec::new();
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        edges.push(e);
        cur = graph.edge_from[e.index()];
    }
    edges.reverse();
    Route { edges, total_cost: total }
}
