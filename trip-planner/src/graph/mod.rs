//! The transport network graph.
//!
//! Stations are the nodes, route edges are directed and weighted. The graph
//! is built once and then read by any number of searches; it holds no
//! per-search state, so it can be shared across threads.

mod builder;
mod error;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Location, RouteEdge, Station};

pub use builder::{NetworkBuilder, reference_network};
pub use error::GraphError;

/// Dense index of a station within one [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// What to do when a station or edge is registered twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Last write wins. A re-added station keeps its id and its edges.
    #[default]
    Overwrite,
    /// Reject the second registration with an error.
    Reject,
}

/// A directed transport graph with at most one edge per ordered pair.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    stations: Vec<Station>,
    index: HashMap<String, NodeId>,
    /// Outgoing edges per node, in insertion order.
    adjacency: Vec<Vec<(NodeId, RouteEdge)>>,
    policy: DuplicatePolicy,
}

impl Graph {
    /// Create an empty graph that overwrites duplicates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with the given duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Register a station.
    ///
    /// Under `Overwrite`, re-adding a name moves the station to the new
    /// location and keeps its id and edges.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        location: Location,
    ) -> Result<NodeId, GraphError> {
        let name = name.into();

        if let Some(&id) = self.index.get(&name) {
            return match self.policy {
                DuplicatePolicy::Reject => Err(GraphError::DuplicateNode(name)),
                DuplicatePolicy::Overwrite => {
                    self.stations[id.0].relocate(location);
                    Ok(id)
                }
            };
        }

        let id = NodeId(self.stations.len());
        self.stations.push(Station::new(name.clone(), location));
        self.adjacency.push(Vec::new());
        self.index.insert(name, id);
        Ok(id)
    }

    /// Register the directed edge `from -> to`.
    ///
    /// Both stations must already exist.
    pub fn add_edge(&mut self, from: &str, to: &str, edge: RouteEdge) -> Result<(), GraphError> {
        let from_id = self.require(from)?;
        let to_id = self.require(to)?;

        let outgoing = &mut self.adjacency[from_id.0];
        match outgoing.iter_mut().find(|(target, _)| *target == to_id) {
            Some(_) if self.policy == DuplicatePolicy::Reject => Err(GraphError::DuplicateEdge {
                from: from.to_string(),
                to: to.to_string(),
            }),
            Some(slot) => {
                slot.1 = edge;
                Ok(())
            }
            None => {
                outgoing.push((to_id, edge));
                Ok(())
            }
        }
    }

    /// Look up a station id by name.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Look up a station id by name, failing with `UnknownNode`.
    pub fn require(&self, name: &str) -> Result<NodeId, GraphError> {
        self.node_id(name)
            .ok_or_else(|| GraphError::UnknownNode(name.to_string()))
    }

    /// Returns the station for an id, if it belongs to this graph.
    pub fn station(&self, id: NodeId) -> Option<&Station> {
        self.stations.get(id.0)
    }

    /// All stations in registration order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Ids of all stations in registration order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.stations.len()).map(NodeId)
    }

    /// Outgoing `(target, edge)` pairs of a node. Empty for unknown ids.
    pub fn outgoing(&self, id: NodeId) -> &[(NodeId, RouteEdge)] {
        self.adjacency.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Destinations reachable by one edge from `id`.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing(id).iter().map(|(target, _)| *target)
    }

    /// Names of stations reachable by one edge from the named station.
    pub fn neighbors_of(&self, name: &str) -> Result<Vec<&str>, GraphError> {
        let id = self.require(name)?;
        Ok(self
            .neighbors(id)
            .map(|n| self.stations[n.0].name())
            .collect())
    }

    /// The edge for the ordered pair `from -> to`.
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Result<&RouteEdge, GraphError> {
        self.outgoing(from)
            .iter()
            .find(|(target, _)| *target == to)
            .map(|(_, edge)| edge)
            .ok_or_else(|| GraphError::NoSuchEdge {
                from: self.display_name(from),
                to: self.display_name(to),
            })
    }

    /// The edge between two named stations.
    pub fn edge_between_names(&self, from: &str, to: &str) -> Result<&RouteEdge, GraphError> {
        let from_id = self.require(from)?;
        let to_id = self.require(to)?;
        self.edge_between(from_id, to_id)
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    fn display_name(&self, id: NodeId) -> String {
        self.station(id)
            .map(|s| s.name().to_string())
            .unwrap_or_else(|| format!("#{}", id.0))
    }
}
