//! Multi-objective route planner.
//!
//! This module implements the core planning algorithm that answers:
//! "Which are the best few ways to ship cargo from here to there, given
//! how much I care about time, price and emissions?"
//!
//! The search is a best-first expansion over the transport graph, guided
//! by a distance-based heuristic. Completed routes are then annotated with
//! cost, CO2 and sustainability metrics.

mod config;
mod heuristic;
mod scoring;
mod search;
mod tables;

#[cfg(test)]
mod search_tests;

pub use config::SearchConfig;
pub use heuristic::{EARTH_RADIUS_KM, Heuristic, haversine_km};
pub use scoring::{
    CO2_SCORE_WEIGHT_DIVISOR, CO2_TOTAL_WEIGHT_DIVISOR, CarbonRating, LegBreakdown, RouteMetrics,
    SCORE_MAX_CO2, TariffModel, score_route, sustainability_score,
};
pub use search::{Planner, RouteQuery, RoutePath, SearchError, SearchResult};
pub use tables::{DEFAULT_WAIT_HOURS, EmissionFactors, PlannerTables, WaitingTimes};
