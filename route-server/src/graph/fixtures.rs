//! Graph fixtures shared by unit tests.

use std::collections::BTreeMap;

use super::{Bounds, GraphBuilder, GraphStats, TransportGraph};
use crate::domain::{CountryCode, Edge, Location, NodeId, NormalizedCosts, Position, RawCosts, TransportMode};

pub fn node(id: &str) -> NodeId {
    NodeId::parse(id).unwrap()
}

pub fn country(code: &str) -> CountryCode {
    CountryCode::parse(code).unwrap()
}

pub fn location(id: &str, lat: f64, lon: f64, country_code: Option<&str>) -> Location {
    Location::new(
        node(id),
        Position::new(lat, lon).unwrap(),
        country_code.map(country),
    )
}

/// Statistics with degenerate bounds: the heuristic is then 0 everywhere.
pub fn uniform_stats() -> GraphStats {
    GraphStats::new(
        Bounds::new("time", 0.0, 0.0).unwrap(),
        Bounds::new("price", 0.0, 0.0).unwrap(),
        Bounds::new("emissions", 0.0, 0.0).unwrap(),
        BTreeMap::new(),
        BTreeMap::new(),
    )
    .unwrap()
}

/// Realistic statistics, in the ranges of a global shipping network.
pub fn shipping_stats() -> GraphStats {
    GraphStats::new(
        Bounds::new("time", 0.0, 740.8).unwrap(),
        Bounds::new("price", 0.0, 49341.6).unwrap(),
        Bounds::new("emissions", 0.0, 9000.0).unwrap(),
        [
            (TransportMode::Land, 80.0),
            (TransportMode::Sea, 35.0),
            (TransportMode::Air, 800.0),
        ]
        .into_iter()
        .collect(),
        [
            (TransportMode::Land, 0.05),
            (TransportMode::Sea, 0.00002),
            (TransportMode::Air, 0.9),
        ]
        .into_iter()
        .collect(),
    )
    .unwrap()
}

/// Edge whose normalized attributes all equal `norm`.
pub fn edge(from: &str, to: &str, mode: TransportMode, norm: f64) -> Edge {
    Edge::new(
        node(from),
        node(to),
        mode,
        RawCosts::new(100.0, 10.0, 50.0).unwrap(),
        NormalizedCosts::new(norm, norm, norm).unwrap(),
    )
}

/// Edge with explicit raw attributes; normalized attributes all equal `norm`.
pub fn raw_edge(
    from: &str,
    to: &str,
    mode: TransportMode,
    distance_km: f64,
    time_hours: f64,
    price: f64,
    norm: f64,
) -> Edge {
    Edge::new(
        node(from),
        node(to),
        mode,
        RawCosts::new(distance_km, time_hours, price).unwrap(),
        NormalizedCosts::new(norm, norm, norm).unwrap(),
    )
}

/// Four locations: A→B land, B→C sea, A→C air, C→D land.
///
/// A is in India, B and C in the UAE, D has no country.
pub fn toy_graph() -> TransportGraph {
    let mut builder = GraphBuilder::new(uniform_stats());
    builder
        .add_node(location("A", 21.0, 75.5, Some("IN")))
        .unwrap()
        .add_node(location("B", 25.2, 55.3, Some("AE")))
        .unwrap()
        .add_node(location("C", 24.5, 54.4, Some("AE")))
        .unwrap()
        .add_node(location("D", 24.0, 54.0, None))
        .unwrap();
    builder
        .add_edge(raw_edge("A", "B", TransportMode::Land, 2100.0, 40.0, 900.0, 10.0))
        .unwrap()
        .add_edge(raw_edge("B", "C", TransportMode::Sea, 120.0, 6.0, 40.0, 2.0))
        .unwrap()
        .add_edge(raw_edge("A", "C", TransportMode::Air, 2150.0, 4.0, 3000.0, 5.0))
        .unwrap()
        .add_edge(raw_edge("C", "D", TransportMode::Land, 60.0, 1.0, 20.0, 1.0))
        .unwrap();
    builder.build()
}
