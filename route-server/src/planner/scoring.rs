//! Cost and sustainability scoring for completed routes.
//!
//! Everything here is a pure function of a route's edges and the cargo
//! weight. Two CO2 quantities are derived with different weight divisors:
//! the reported total uses [`CO2_TOTAL_WEIGHT_DIVISOR`], while the
//! sustainability score is fed by [`CO2_SCORE_WEIGHT_DIVISOR`]. They are
//! kept separate on purpose; unifying them would change every score.

use serde::Serialize;

use crate::domain::{Edge, NodeId, TransportMode};

use super::tables::{EmissionFactors, PlannerTables};

/// Weight divisor for the reported total CO2.
pub const CO2_TOTAL_WEIGHT_DIVISOR: f64 = 100_000.0;

/// Weight divisor for the CO2 figure the sustainability score is based on.
pub const CO2_SCORE_WEIGHT_DIVISOR: f64 = 500.0;

/// CO2 at which the sustainability score reaches 0.
pub const SCORE_MAX_CO2: f64 = 5000.0;

/// Total CO2 above this is rated high.
pub const HIGH_CARBON_THRESHOLD: f64 = 1000.0;

/// Total CO2 below this is rated low.
pub const LOW_CARBON_THRESHOLD: f64 = 500.0;

/// Weight-based tariff applied to the summed leg prices.
///
/// Below `threshold` the price scales linearly with `weight / threshold`;
/// at or above it, by `(weight - threshold) * surcharge_rate`. The curve is
/// deliberately simple and drops to 0 exactly at the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct TariffModel {
    /// Leg prices are divided by this before the tariff applies.
    pub price_divisor: f64,
    pub threshold: f64,
    pub surcharge_rate: f64,
}

impl TariffModel {
    /// Multiplier applied to the summed (divided) prices.
    pub fn multiplier(&self, cargo_weight: f64) -> f64 {
        if cargo_weight < self.threshold {
            if self.threshold > 0.0 {
                cargo_weight / self.threshold
            } else {
                0.0
            }
        } else {
            (cargo_weight - self.threshold) * self.surcharge_rate
        }
    }

    /// Total shipment cost for the given leg prices.
    pub fn total_cost<I: IntoIterator<Item = f64>>(&self, prices: I, cargo_weight: f64) -> f64 {
        let divisor = if self.price_divisor > 0.0 {
            self.price_divisor
        } else {
            1.0
        };
        let base: f64 = prices.into_iter().map(|p| p / divisor).sum();
        base * self.multiplier(cargo_weight)
    }
}

impl Default for TariffModel {
    fn default() -> Self {
        Self {
            price_divisor: 100.0,
            threshold: 995.0,
            surcharge_rate: 2.0,
        }
    }
}

/// Coarse classification of a route's total CO2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CarbonRating {
    Low,
    Moderate,
    High,
}

impl CarbonRating {
    pub fn classify(total_co2: f64) -> Self {
        if total_co2 > HIGH_CARBON_THRESHOLD {
            CarbonRating::High
        } else if total_co2 < LOW_CARBON_THRESHOLD {
            CarbonRating::Low
        } else {
            CarbonRating::Moderate
        }
    }
}

/// Per-leg breakdown for display.
#[derive(Debug, Clone, PartialEq)]
pub struct LegBreakdown {
    pub from: NodeId,
    pub to: NodeId,
    pub mode: TransportMode,
    pub time_hours: f64,
    pub price: f64,
    pub distance_km: f64,
    /// Distance times the mode's emission factor.
    pub co2_per_ton: f64,
}

impl LegBreakdown {
    pub fn from_edge(edge: &Edge, factors: &EmissionFactors) -> Self {
        Self {
            from: edge.from.clone(),
            to: edge.to.clone(),
            mode: edge.mode,
            time_hours: edge.raw.time_hours,
            price: edge.raw.price,
            distance_km: edge.raw.distance_km,
            co2_per_ton: edge.raw.distance_km * factors.factor(edge.mode),
        }
    }
}

/// Aggregate metrics derived for a completed route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMetrics {
    pub total_time_hours: f64,
    pub total_cost: f64,
    pub total_distance_km: f64,
    pub total_co2: f64,
    pub waiting_hours: f64,
    /// 0–100, higher is greener.
    pub sustainability_score: f64,
    pub carbon_rating: CarbonRating,
}

/// Sustainability score for a CO2 figure: 100 at zero, falling linearly to
/// 0 at [`SCORE_MAX_CO2`], rounded to two decimals.
pub fn sustainability_score(co2: f64) -> f64 {
    let score = (100.0 - co2 / SCORE_MAX_CO2 * 100.0).clamp(0.0, 100.0);
    (score * 100.0).round() / 100.0
}

/// Sum of distance × emission factor over the edges.
fn co2_per_ton<'e, I: IntoIterator<Item = &'e Edge>>(edges: I, factors: &EmissionFactors) -> f64 {
    edges
        .into_iter()
        .map(|e| e.raw.distance_km * factors.factor(e.mode))
        .sum()
}

/// Score a route from its edges, cargo weight and accumulated waiting time.
pub fn score_route(
    edges: &[&Edge],
    cargo_weight: f64,
    waiting_hours: f64,
    tables: &PlannerTables,
) -> RouteMetrics {
    let per_ton = co2_per_ton(edges.iter().copied(), &tables.emissions);
    let total_co2 = per_ton * (cargo_weight / CO2_TOTAL_WEIGHT_DIVISOR);
    let score_co2 = per_ton * (cargo_weight / CO2_SCORE_WEIGHT_DIVISOR);

    RouteMetrics {
        total_time_hours: edges.iter().map(|e| e.raw.time_hours).sum(),
        total_cost: tables
            .tariff
            .total_cost(edges.iter().map(|e| e.raw.price), cargo_weight),
        total_distance_km: edges.iter().map(|e| e.raw.distance_km).sum(),
        total_co2,
        waiting_hours,
        sustainability_score: sustainability_score(score_co2),
        carbon_rating: CarbonRating::classify(total_co2),
    }
}
