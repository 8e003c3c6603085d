//! Objective weights for route scoring.

use serde::Serialize;

use super::DomainError;

/// Relative importance of time, price and emissions.
///
/// Weights must be finite and non-negative. They are not required to sum
/// to one: the planner only compares weighted sums against each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostWeights {
    pub time: f64,
    pub price: f64,
    pub emissions: f64,
}

impl CostWeights {
    pub fn new(time: f64, price: f64, emissions: f64) -> Result<Self, DomainError> {
        for (name, value) in [("time", time), ("price", price), ("emissions", emissions)] {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::InvalidWeight { name, value });
            }
        }
        Ok(Self {
            time,
            price,
            emissions,
        })
    }
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            time: 0.25,
            price: 0.25,
            emissions: 0.5,
        }
    }
}
