//! Multi-modal transport graph.
//!
//! Holds validated locations and directed multi-edges, plus the graph-wide
//! statistics the heuristic and cost model depend on. The graph is
//! read-only once built and can be shared freely between searches.

mod snapshot;
mod stats;

#[cfg(test)]
pub(crate) mod fixtures;

use std::collections::HashMap;

use crate::domain::{Edge, Location, NodeId};

pub use snapshot::{EdgeRecord, GraphSnapshot, LoadError, NodeRecord, StatsRecord, load_graph};
pub use stats::{Bounds, GraphStats, NORMALIZED_SCALE};

/// Structural errors from graph construction and queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Node id not present in the graph
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// Node id added twice
    #[error("duplicate node: {0}")]
    DuplicateNode(NodeId),
}

/// An edge together with the index of its destination.
#[derive(Debug, Clone)]
struct StoredEdge {
    to: usize,
    edge: Edge,
}

/// Read-only transport graph.
#[derive(Debug, Clone)]
pub struct TransportGraph {
    locations: Vec<Location>,
    index: HashMap<NodeId, usize>,
    /// Outgoing edges per location, in insertion order.
    outgoing: Vec<Vec<StoredEdge>>,
    stats: GraphStats,
}

impl TransportGraph {
    /// Number of locations.
    pub fn node_count(&self) -> usize {
        self.locations.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(Vec::len).sum()
    }

    /// Whether the graph contains a location with this id.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All locations, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// Position and country of a location.
    pub fn node_info(&self, id: &str) -> Result<&Location, GraphError> {
        self.index_of(id).map(|idx| &self.locations[idx])
    }

    /// Outgoing edges of a location, in insertion order.
    pub fn neighbors(&self, id: &str) -> Result<impl Iterator<Item = &Edge>, GraphError> {
        let idx = self.index_of(id)?;
        Ok(self.outgoing[idx].iter().map(|stored| &stored.edge))
    }

    /// Graph-wide statistics.
    pub fn stats(&self) -> &GraphStats {
        &self.stats
    }

    /// Case-insensitive substring search over location ids.
    ///
    /// Exact matches come first, then prefix matches, then the rest; ties
    /// keep insertion order.
    pub fn search_nodes(&self, query: &str, limit: usize) -> Vec<&Location> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(u8, &Location)> = self
            .locations
            .iter()
            .filter_map(|loc| {
                let id = loc.id.as_str().to_lowercase();
                if id == needle {
                    Some((0, loc))
                } else if id.starts_with(&needle) {
                    Some((1, loc))
                } else if id.contains(&needle) {
                    Some((2, loc))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by_key(|(rank, _)| *rank);
        matches.into_iter().take(limit).map(|(_, loc)| loc).collect()
    }

    pub(crate) fn index_of(&self, id: &str) -> Result<usize, GraphError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))
    }

    pub(crate) fn location_at(&self, idx: usize) -> &Location {
        &self.locations[idx]
    }

    /// Outgoing edges of the location at `idx`, with destination indices.
    pub(crate) fn outgoing_at(&self, idx: usize) -> impl Iterator<Item = (usize, &Edge)> {
        self.outgoing[idx].iter().map(|stored| (stored.to, &stored.edge))
    }
}

/// Builder for a [`TransportGraph`].
///
/// Locations must be added before the edges that reference them.
#[derive(Debug)]
pub struct GraphBuilder {
    locations: Vec<Location>,
    index: HashMap<NodeId, usize>,
    outgoing: Vec<Vec<StoredEdge>>,
    stats: GraphStats,
}

impl GraphBuilder {
    /// Create an empty builder with the given statistics.
    pub fn new(stats: GraphStats) -> Self {
        Self {
            locations: Vec::new(),
            index: HashMap::new(),
            outgoing: Vec::new(),
            stats,
        }
    }

    /// Add a location. Fails if its id is already present.
    pub fn add_node(&mut self, location: Location) -> Result<&mut Self, GraphError> {
        if self.index.contains_key(&location.id) {
            return Err(GraphError::DuplicateNode(location.id));
        }
        self.index.insert(location.id.clone(), self.locations.len());
        self.locations.push(location);
        self.outgoing.push(Vec::new());
        Ok(self)
    }

    /// Add a directed edge. Both endpoints must already exist.
    pub fn add_edge(&mut self, edge: Edge) -> Result<&mut Self, GraphError> {
        let from = self.lookup(&edge.from)?;
        let to = self.lookup(&edge.to)?;
        self.outgoing[from].push(StoredEdge { to, edge });
        Ok(self)
    }

    fn lookup(&self, id: &NodeId) -> Result<usize, GraphError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))
    }

    /// Finish building.
    pub fn build(self) -> TransportGraph {
        TransportGraph {
            locations: self.locations,
            index: self.index,
            outgoing: self.outgoing,
            stats: self.stats,
        }
    }
}
