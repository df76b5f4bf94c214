//! A* path search over the transport graph.
//!
//! Finds the cheapest (by money cost) station sequence between two nodes.
//! Each run keeps its own scratch state indexed by node id and only
//! borrows the graph, so any number of searches may run concurrently.
//!
//! The frontier is a binary heap keyed by `f = g + h` with lazy deletion:
//! an improved node is pushed again and stale heap entries are skipped
//! when popped. Among entries with equal `f`, the one pushed first wins.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::time::Instant;

use serde::Deserialize;
use tracing::{debug, trace};

use crate::domain::{RouteEdge, Station};
use crate::graph::{Graph, GraphError, NodeId};

/// Error from path search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// The graph is inconsistent with the request
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Too many nodes expanded
    #[error("search aborted after expanding {0} nodes")]
    ExpansionLimit(usize),

    /// Deadline passed
    #[error("search timed out")]
    Timeout,

    /// Cancelled by the caller
    #[error("search cancelled")]
    Cancelled,
}

/// Estimate of the remaining cost from a station to the goal.
///
/// A* only returns the cheapest path if the estimate never exceeds the
/// true remaining cost.
pub trait Heuristic {
    fn estimate(&self, from: &Station, goal: &Station) -> f64;
}

/// Always estimates zero, which turns A* into Dijkstra's algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _from: &Station, _goal: &Station) -> f64 {
        0.0
    }
}

/// Great-circle distance multiplied by a cost rate.
///
/// Admissible only if no route is cheaper than `cost_per_km` per kilometre
/// of straight-line progress.
#[derive(Debug, Clone, Copy)]
pub struct GreatCircleHeuristic {
    pub cost_per_km: f64,
}

impl Heuristic for GreatCircleHeuristic {
    fn estimate(&self, from: &Station, goal: &Station) -> f64 {
        from.distance_km(goal) * self.cost_per_km
    }
}

impl<F> Heuristic for F
where
    F: Fn(&Station, &Station) -> f64,
{
    fn estimate(&self, from: &Station, goal: &Station) -> f64 {
        self(from, goal)
    }
}

/// Heuristic selection for configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeuristicKind {
    #[default]
    Zero,
    GreatCircle {
        cost_per_km: f64,
    },
}

impl Heuristic for HeuristicKind {
    fn estimate(&self, from: &Station, goal: &Station) -> f64 {
        match self {
            HeuristicKind::Zero => ZeroHeuristic.estimate(from, goal),
            HeuristicKind::GreatCircle { cost_per_km } => GreatCircleHeuristic {
                cost_per_km: *cost_per_km,
            }
            .estimate(from, goal),
        }
    }
}

/// Shared flag for cancelling running searches.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }
}

/// Bounds checked once per loop iteration.
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    pub max_expansions: Option<usize>,
    pub deadline: Option<Instant>,
    pub cancel: Option<CancelToken>,
}

impl SearchLimits {
    /// No limits.
    pub fn unbounded() -> Self {
        Self::default()
    }

    fn check_interrupt(&self) -> Result<(), SearchError> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(SearchError::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(SearchError::Timeout);
        }
        Ok(())
    }

    fn check_expansions(&self, expanded: usize) -> Result<(), SearchError> {
        match self.max_expansions {
            Some(max) if expanded >= max => Err(SearchError::ExpansionLimit(max)),
            _ => Ok(()),
        }
    }
}

/// A found path, start to goal inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    nodes: Vec<NodeId>,
    cost: f64,
    expanded: usize,
}

impl Path {
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Sum of edge costs along the path.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Nodes expanded by the search that produced this path.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    pub fn start(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn goal(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// Number of edges on the path.
    pub fn edge_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns true if start and goal are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() == 1
    }

    /// The edges between consecutive nodes, in travel order.
    pub fn edges(&self, graph: &Graph) -> Result<Vec<RouteEdge>, GraphError> {
        self.nodes
            .windows(2)
            .map(|pair| graph.edge_between(pair[0], pair[1]).cloned())
            .collect()
    }

    /// Station names along the path.
    pub fn station_names(&self, graph: &Graph) -> Vec<String> {
        self.nodes
            .iter()
            .filter_map(|id| graph.station(*id))
            .map(|s| s.name().to_string())
            .collect()
    }
}

/// Result of a search that ran to completion.
#[derive(Debug, Clone, PartialEq)]
pub enum PathOutcome {
    Found(Path),
    /// The goal is not connected to the start.
    Unreachable,
}

impl PathOutcome {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, PathOutcome::Unreachable)
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            PathOutcome::Found(path) => Some(path),
            PathOutcome::Unreachable => None,
        }
    }
}

/// Per-run bookkeeping for one node.
#[derive(Debug, Clone, Copy)]
struct Scratch {
    g: f64,
    h: f64,
    f: f64,
    parent: Option<NodeId>,
}

impl Default for Scratch {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            h: 0.0,
            f: f64::INFINITY,
            parent: None,
        }
    }
}

/// Frontier entry. Ordered so `BinaryHeap` pops the smallest `f`,
/// then the smallest sequence number.
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f: f64,
    seq: u64,
    node: NodeId,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

/// A* search over a borrowed graph.
#[derive(Debug, Clone)]
pub struct PathSearch<'g, H = ZeroHeuristic> {
    graph: &'g Graph,
    heuristic: H,
    limits: SearchLimits,
}

impl<'g> PathSearch<'g, ZeroHeuristic> {
    /// Create a search with the zero heuristic and no limits.
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            heuristic: ZeroHeuristic,
            limits: SearchLimits::unbounded(),
        }
    }
}

impl<'g, H: Heuristic> PathSearch<'g, H> {
    /// Replace the heuristic.
    pub fn with_heuristic<H2: Heuristic>(self, heuristic: H2) -> PathSearch<'g, H2> {
        PathSearch {
            graph: self.graph,
            heuristic,
            limits: self.limits,
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Search between two named stations.
    pub fn search_by_name(&self, start: &str, goal: &str) -> Result<PathOutcome, SearchError> {
        let start = self.graph.require(start)?;
        let goal = self.graph.require(goal)?;
        self.search(start, goal)
    }

    /// Find the cheapest path from `start` to `goal`.
    ///
    /// Returns `PathOutcome::Unreachable` if the frontier empties first.
    pub fn search(&self, start: NodeId, goal: NodeId) -> Result<PathOutcome, SearchError> {
        let graph = self.graph;
        let start_station = self.station(start)?;
        let goal_station = self.station(goal)?;

        let mut scratch = vec![Scratch::default(); graph.len()];
        let mut closed = vec![false; graph.len()];
        let mut open = BinaryHeap::new();
        let mut seq: u64 = 0;
        let mut expanded = 0;

        let h = self.heuristic.estimate(start_station, goal_station);
        scratch[start.0] = Scratch {
            g: 0.0,
            h,
            f: h,
            parent: None,
        };
        open.push(OpenEntry {
            f: h,
            seq,
            node: start,
        });
        seq += 1;

        while let Some(entry) = open.pop() {
            self.limits.check_interrupt()?;

            let current = entry.node;
            // Lazy deletion: skip closed nodes and superseded entries
            if closed[current.0] || entry.f > scratch[current.0].f {
                continue;
            }

            if current == goal {
                let path = Path {
                    nodes: reconstruct(&scratch, goal),
                    cost: scratch[goal.0].g,
                    expanded,
                };
                debug!(
                    start = start_station.name(),
                    goal = goal_station.name(),
                    cost = path.cost,
                    hops = path.edge_count(),
                    expanded,
                    "path found"
                );
                return Ok(PathOutcome::Found(path));
            }

            self.limits.check_expansions(expanded)?;
            closed[current.0] = true;
            expanded += 1;

            let Scratch { g: current_g, h: current_h, .. } = scratch[current.0];
            trace!(node = current.0, g = current_g, h = current_h, f = entry.f, "expanding");

            for (neighbor, edge) in graph.outgoing(current) {
                if closed[neighbor.0] {
                    continue;
                }

                let tentative_g = current_g + edge.total_cost();
                if tentative_g < scratch[neighbor.0].g {
                    let neighbor_station = self.station(*neighbor)?;
                    let h = self.heuristic.estimate(neighbor_station, goal_station);
                    let f = tentative_g + h;
                    scratch[neighbor.0] = Scratch {
                        g: tentative_g,
                        h,
                        f,
                        parent: Some(current),
                    };
                    open.push(OpenEntry {
                        f,
                        seq,
                        node: *neighbor,
                    });
                    seq += 1;
                }
            }
        }

        debug!(
            start = start_station.name(),
            goal = goal_station.name(),
            expanded,
            "goal unreachable"
        );
        Ok(PathOutcome::Unreachable)
    }

    fn station(&self, id: NodeId) -> Result<&'g Station, SearchError> {
        self.graph
            .station(id)
            .ok_or_else(|| GraphError::UnknownNode(format!("#{}", id.0)).into())
    }
}

/// Follow parent pointers back from the goal, then reverse.
fn reconstruct(scratch: &[Scratch], goal: NodeId) -> Vec<NodeId> {
    let mut nodes = vec![goal];
    let mut current = goal;
    while let Some(parent) = scratch[current.0].parent {
        nodes.push(parent);
        current = parent;
    }
    nodes.reverse();
    nodes
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
