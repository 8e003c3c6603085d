//! Graph-wide normalization bounds and per-mode statistics.

use std::collections::{BTreeMap, HashSet};

use crate::domain::{DomainError, TransportMode};

/// Scale of the normalized band.
pub const NORMALIZED_SCALE: f64 = 100.0;

/// A validated `[min, max]` range used for normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    /// Create bounds. `max == min` is allowed; `max < min` is not.
    pub fn new(name: &'static str, min: f64, max: f64) -> Result<Self, DomainError> {
        if !min.is_finite() || !max.is_finite() || max < min {
            return Err(DomainError::InvalidBounds { name, min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Rescale `value` into the 0–100 band.
    ///
    /// Degenerate bounds (`max == min`) normalize everything to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.max > self.min {
            (value - self.min) / (self.max - self.min) * NORMALIZED_SCALE
        } else {
            0.0
        }
    }
}

/// Statistics precomputed when the graph was built.
///
/// Both the heuristic and the cost model read these; they never change
/// during a search.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStats {
    pub time: Bounds,
    pub price: Bounds,
    pub emissions: Bounds,
    max_speed: BTreeMap<TransportMode, f64>,
    min_price_per_km: BTreeMap<TransportMode, f64>,
}

fn check_mode_stats(
    name: &'static str,
    stats: &BTreeMap<TransportMode, f64>,
) -> Result<(), DomainError> {
    for (&mode, &value) in stats {
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::InvalidModeStat { name, mode, value });
        }
    }
    Ok(())
}

impl GraphStats {
    /// Create statistics, validating the per-mode values.
    pub fn new(
        time: Bounds,
        price: Bounds,
        emissions: Bounds,
        max_speed: BTreeMap<TransportMode, f64>,
        min_price_per_km: BTreeMap<TransportMode, f64>,
    ) -> Result<Self, DomainError> {
        check_mode_stats("max speed", &max_speed)?;
        check_mode_stats("min price per km", &min_price_per_km)?;
        Ok(Self {
            time,
            price,
            emissions,
            max_speed,
            min_price_per_km,
        })
    }

    /// Maximum speed (km/h) recorded for a mode.
    pub fn max_speed(&self, mode: TransportMode) -> Option<f64> {
        self.max_speed.get(&mode).copied()
    }

    /// Minimum price per kilometre recorded for a mode.
    pub fn min_price_per_km(&self, mode: TransportMode) -> Option<f64> {
        self.min_price_per_km.get(&mode).copied()
    }

    /// Fastest speed among `modes`, if any of them has a recorded speed.
    pub fn fastest_speed(&self, modes: &HashSet<TransportMode>) -> Option<f64> {
        modes
            .iter()
            .filter_map(|m| self.max_speed(*m))
            .max_by(f64::total_cmp)
    }

    /// Cheapest per-km price among `modes`, if any of them has one.
    pub fn cheapest_price_per_km(&self, modes: &HashSet<TransportMode>) -> Option<f64> {
        modes
            .iter()
            .filter_map(|m| self.min_price_per_km(*m))
            .min_by(f64::total_cmp)
    }
}
