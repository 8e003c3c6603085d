//! JSON graph snapshots.
//!
//! A snapshot is a serialized, pre-built graph: node and edge records with
//! their normalized attributes already computed, plus the statistics used
//! to compute them. Every record is validated while converting into a
//! [`TransportGraph`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Bounds, GraphBuilder, GraphError, GraphStats, TransportGraph};
use crate::domain::{
    CountryCode, DomainError, Edge, Location, NodeId, NormalizedCosts, Position, RawCosts,
    TransportMode,
};

/// Errors from loading a graph snapshot.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Snapshot file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Snapshot is not valid JSON for the expected shape
    #[error("malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A record failed validation
    #[error("invalid {record}: {source}")]
    Invalid {
        record: String,
        source: DomainError,
    },

    /// Records are structurally inconsistent
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// A location record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// May be absent, null or empty.
    #[serde(default)]
    pub country_code: Option<String>,
}

/// A directed edge record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    pub mode: String,
    pub distance: f64,
    pub time: f64,
    pub price: f64,
    pub time_norm: f64,
    pub price_norm: f64,
    pub emissions_norm: f64,
}

/// Graph-wide statistics record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsRecord {
    pub time_min: f64,
    pub time_max: f64,
    pub price_min: f64,
    pub price_max: f64,
    pub emissions_min: f64,
    pub emissions_max: f64,
    #[serde(default)]
    pub max_speed: BTreeMap<String, f64>,
    #[serde(default)]
    pub min_price_per_km: BTreeMap<String, f64>,
}

/// A complete serialized graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
    pub stats: StatsRecord,
}

fn invalid(record: String) -> impl FnOnce(DomainError) -> LoadError {
    move |source| LoadError::Invalid { record, source }
}

fn mode_map(map: &BTreeMap<String, f64>) -> Result<BTreeMap<TransportMode, f64>, DomainError> {
    map.iter()
        .map(|(name, value)| -> Result<_, DomainError> {
            Ok((TransportMode::parse(name)?, *value))
        })
        .collect()
}

impl StatsRecord {
    fn into_stats(self) -> Result<GraphStats, DomainError> {
        GraphStats::new(
            Bounds::new("time", self.time_min, self.time_max)?,
            Bounds::new("price", self.price_min, self.price_max)?,
            Bounds::new("emissions", self.emissions_min, self.emissions_max)?,
            mode_map(&self.max_speed)?,
            mode_map(&self.min_price_per_km)?,
        )
    }
}

impl NodeRecord {
    fn to_location(&self) -> Result<Location, DomainError> {
        Ok(Location::new(
            NodeId::parse(&self.id)?,
            Position::new(self.latitude, self.longitude)?,
            CountryCode::parse_optional(self.country_code.as_deref())?,
        ))
    }
}

impl EdgeRecord {
    fn to_edge(&self) -> Result<Edge, DomainError> {
        Ok(Edge::new(
            NodeId::parse(&self.from)?,
            NodeId::parse(&self.to)?,
            TransportMode::parse(&self.mode)?,
            RawCosts::new(self.distance, self.time, self.price)?,
            NormalizedCosts::new(self.time_norm, self.price_norm, self.emissions_norm)?,
        ))
    }
}

impl GraphSnapshot {
    /// Parse a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate every record and build the graph.
    pub fn into_graph(self) -> Result<TransportGraph, LoadError> {
        let stats = self
            .stats
            .into_stats()
            .map_err(invalid("graph statistics".to_string()))?;

        let mut builder = GraphBuilder::new(stats);

        for (i, record) in self.nodes.iter().enumerate() {
            let location = record
                .to_location()
                .map_err(invalid(format!("node #{i} ({:?})", record.id)))?;
            builder.add_node(location)?;
        }

        for (i, record) in self.edges.iter().enumerate() {
            let edge = record
                .to_edge()
                .map_err(invalid(format!("edge #{i} ({} -> {})", record.from, record.to)))?;
            builder.add_edge(edge)?;
        }

        let graph = builder.build();
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built graph from snapshot"
        );
        Ok(graph)
    }
}

/// Load and validate a graph snapshot from a JSON file.
pub fn load_graph(path: impl AsRef<Path>) -> Result<TransportGraph, LoadError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = GraphSnapshot::from_json(&json)?.into_graph()?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded transport graph"
    );
    Ok(graph)
}
