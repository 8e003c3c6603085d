//! Remaining-cost estimates towards a fixed goal.
//!
//! For every location the estimate is the weighted, normalized cost of
//! covering the great-circle distance to the goal at the best rates any
//! allowed mode offers. This is not a certified lower bound: border
//! penalties are not modelled, and normalizing against the global bounds
//! can overshoot a real leg's normalized cost. Search results are therefore
//! a best-effort ranking.

use std::collections::HashSet;

use crate::domain::{CostWeights, Position, TransportMode};
use crate::graph::{GraphError, TransportGraph};

use super::tables::EmissionFactors;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two positions, in kilometres.
pub fn haversine_km(a: Position, b: Position) -> f64 {
    let phi1 = a.latitude().to_radians();
    let phi2 = b.latitude().to_radians();
    let dphi = (b.latitude() - a.latitude()).to_radians();
    let dlambda = (b.longitude() - a.longitude()).to_radians();
    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Per-location estimates for one goal, weighting and mode set.
#[derive(Debug, Clone)]
pub struct Heuristic {
    estimates: Vec<f64>,
}

impl Heuristic {
    /// Compute estimates for every location in `graph` towards `goal`.
    pub fn for_goal(
        graph: &TransportGraph,
        goal: &str,
        weights: &CostWeights,
        modes: &HashSet<TransportMode>,
        factors: &EmissionFactors,
    ) -> Result<Self, GraphError> {
        let goal = graph.index_of(goal)?;
        Ok(Self::compute(graph, goal, weights, modes, factors))
    }

    pub(crate) fn compute(
        graph: &TransportGraph,
        goal: usize,
        weights: &CostWeights,
        modes: &HashSet<TransportMode>,
        factors: &EmissionFactors,
    ) -> Self {
        let stats = graph.stats();
        let goal_position = graph.location_at(goal).position;

        // A mode without a usable speed contributes no time estimate.
        let speed = stats.fastest_speed(modes).filter(|s| *s > 0.0);
        let price_per_km = stats.cheapest_price_per_km(modes);
        let factor = factors.lowest(modes);

        let estimates = graph
            .nodes()
            .enumerate()
            .map(|(idx, location)| {
                if idx == goal {
                    return 0.0;
                }
                let distance = haversine_km(location.position, goal_position);
                if distance == 0.0 {
                    return 0.0;
                }

                let time = speed.map_or(0.0, |s| stats.time.normalize(distance / s));
                let price = price_per_km.map_or(0.0, |r| stats.price.normalize(distance * r));
                let emissions = factor.map_or(0.0, |f| stats.emissions.normalize(distance * f));

                weights.time * time + weights.price * price + weights.emissions * emissions
            })
            .collect();

        Self { estimates }
    }

    /// Estimate for the location at `idx`.
    pub(crate) fn at(&self, idx: usize) -> f64 {
        self.estimates[idx]
    }

    /// Estimate for a location by id.
    pub fn estimate(&self, graph: &TransportGraph, id: &str) -> Result<f64, GraphError> {
        graph.index_of(id).map(|idx| self.at(idx))
    }
}
