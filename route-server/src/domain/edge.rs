//! Transport edges between graph locations.

use serde::Serialize;

use super::{DomainError, NodeId, TransportMode};

fn check_attribute(name: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DomainError::InvalidAttribute { name, value })
    }
}

/// Raw (unnormalized) attributes of a transport leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RawCosts {
    /// Distance in kilometres.
    pub distance_km: f64,
    /// Travel time in hours.
    pub time_hours: f64,
    /// Price in currency units.
    pub price: f64,
}

impl RawCosts {
    /// Create raw costs; every value must be finite and non-negative.
    pub fn new(distance_km: f64, time_hours: f64, price: f64) -> Result<Self, DomainError> {
        Ok(Self {
            distance_km: check_attribute("distance", distance_km)?,
            time_hours: check_attribute("time", time_hours)?,
            price: check_attribute("price", price)?,
        })
    }
}

/// Attributes rescaled into the graph's common 0–100 band.
///
/// These are computed once when the graph is built and are what the search
/// weighs against each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedCosts {
    pub time: f64,
    pub price: f64,
    pub emissions: f64,
}

impl NormalizedCosts {
    /// Create normalized costs; every value must be finite and non-negative.
    pub fn new(time: f64, price: f64, emissions: f64) -> Result<Self, DomainError> {
        Ok(Self {
            time: check_attribute("time_norm", time)?,
            price: check_attribute("price_norm", price)?,
            emissions: check_attribute("emissions_norm", emissions)?,
        })
    }

    /// Weighted sum of the three normalized attributes.
    pub fn weighted(&self, weights: &super::CostWeights) -> f64 {
        weights.time * self.time + weights.price * self.price + weights.emissions * self.emissions
    }
}

/// A directed transport leg. Several edges may join the same pair of
/// locations under different modes or services.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub mode: TransportMode,
    pub raw: RawCosts,
    pub normalized: NormalizedCosts,
}

impl Edge {
    pub fn new(
        from: NodeId,
        to: NodeId,
        mode: TransportMode,
        raw: RawCosts,
        normalized: NormalizedCosts,
    ) -> Self {
        Self {
            from,
            to,
            mode,
            raw,
            normalized,
        }
    }
}
