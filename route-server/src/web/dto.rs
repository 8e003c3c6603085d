//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{CostWeights, CountryCode, DomainError, Location, TransportMode};
use crate::planner::{CarbonRating, LegBreakdown, RouteMetrics, RoutePath, RouteQuery, SearchResult};

fn default_time_weight() -> f64 {
    CostWeights::default().time
}

fn default_price_weight() -> f64 {
    CostWeights::default().price
}

fn default_emissions_weight() -> f64 {
    CostWeights::default().emissions
}

fn default_modes() -> Vec<String> {
    TransportMode::ALL
        .iter()
        .map(|m| m.as_str().to_string())
        .collect()
}

fn default_cargo_weight() -> f64 {
    100.0
}

/// Request to plan routes between two locations.
#[derive(Debug, Deserialize)]
pub struct PlanRoutesRequest {
    /// Start location ID
    pub start: String,

    /// Goal location ID
    pub goal: String,

    /// ISO country codes no route may pass through
    #[serde(default)]
    pub exclude_countries: Vec<String>,

    /// Number of routes wanted (server default if omitted)
    pub top_n: Option<usize>,

    #[serde(default = "default_time_weight")]
    pub time_weight: f64,

    #[serde(default = "default_price_weight")]
    pub price_weight: f64,

    #[serde(default = "default_emissions_weight")]
    pub emissions_weight: f64,

    /// Transport modes to consider: "land", "sea", "air"
    #[serde(default = "default_modes")]
    pub allowed_modes: Vec<String>,

    /// Cargo weight
    #[serde(default = "default_cargo_weight")]
    pub cargo_weight: f64,
}

impl PlanRoutesRequest {
    /// Parse the request into a planner query.
    ///
    /// Blank country codes are ignored. Weight validation is left to the
    /// planner so that every invalid request is reported the same way.
    pub fn to_query(&self, default_top_n: usize) -> Result<RouteQuery, DomainError> {
        let mut query = RouteQuery::new(self.start.trim(), self.goal.trim());

        for code in &self.exclude_countries {
            if let Some(country) = CountryCode::parse_optional(Some(code.as_str()))? {
                query.exclude_countries.insert(country);
            }
        }

        query.allowed_modes = self
            .allowed_modes
            .iter()
            .map(|m| TransportMode::parse(m))
            .collect::<Result<_, _>>()?;

        query.top_n = self.top_n.unwrap_or(default_top_n);
        query.weights = CostWeights {
            time: self.time_weight,
            price: self.price_weight,
            emissions: self.emissions_weight,
        };
        query.cargo_weight = self.cargo_weight;

        Ok(query)
    }
}

/// One leg of a route.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub from: String,
    pub to: String,
    pub mode: TransportMode,
    pub time_hours: f64,
    pub price: f64,
    pub distance_km: f64,
    pub co2_per_ton: f64,
}

impl LegResult {
    pub fn from_leg(leg: &LegBreakdown) -> Self {
        Self {
            from: leg.from.to_string(),
            to: leg.to.to_string(),
            mode: leg.mode,
            time_hours: leg.time_hours,
            price: leg.price,
            distance_km: leg.distance_km,
            co2_per_ton: leg.co2_per_ton,
        }
    }
}

/// Derived metrics of a route.
#[derive(Debug, Serialize)]
pub struct MetricsResult {
    pub total_time_hours: f64,
    pub total_cost: f64,
    pub total_distance_km: f64,
    pub total_co2: f64,
    pub waiting_hours: f64,
    pub sustainability_score: f64,
    pub carbon_rating: CarbonRating,
}

impl MetricsResult {
    pub fn from_metrics(metrics: &RouteMetrics) -> Self {
        Self {
            total_time_hours: metrics.total_time_hours,
            total_cost: metrics.total_cost,
            total_distance_km: metrics.total_distance_km,
            total_co2: metrics.total_co2,
            waiting_hours: metrics.waiting_hours,
            sustainability_score: metrics.sustainability_score,
            carbon_rating: metrics.carbon_rating,
        }
    }
}

/// A route option.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    /// Location IDs from start to goal
    pub path: Vec<String>,

    /// `[latitude, longitude]` per location
    pub coordinates: Vec<(f64, f64)>,

    pub legs: Vec<LegResult>,

    /// Weighted cost the route was ranked by
    pub cost: f64,

    pub metrics: MetricsResult,
}

impl RouteResult {
    pub fn from_route(route: &RoutePath) -> Self {
        Self {
            path: route.path.iter().map(ToString::to_string).collect(),
            coordinates: route.coordinates.clone(),
            legs: route.legs.iter().map(LegResult::from_leg).collect(),
            cost: route.search_cost,
            metrics: MetricsResult::from_metrics(&route.metrics),
        }
    }
}

/// Response for route planning.
#[derive(Debug, Serialize)]
pub struct PlanRoutesResponse {
    pub routes: Vec<RouteResult>,

    /// Partial paths expanded by the search
    pub expansions: usize,

    /// Whether the search stopped early on a limit
    pub truncated: bool,
}

impl PlanRoutesResponse {
    pub fn from_result(result: &SearchResult) -> Self {
        Self {
            routes: result.routes.iter().map(RouteResult::from_route).collect(),
            expansions: result.expansions,
            truncated: result.truncated,
        }
    }
}

/// Query for location search.
#[derive(Debug, Deserialize)]
pub struct NodeSearchRequest {
    /// Search query (matched against location IDs)
    pub q: String,

    /// Maximum results (default 10, capped at 50)
    pub limit: Option<usize>,
}

/// A location in search results.
#[derive(Debug, Serialize)]
pub struct NodeResult {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: Option<String>,
}

impl NodeResult {
    pub fn from_location(location: &Location) -> Self {
        Self {
            id: location.id.to_string(),
            latitude: location.position.latitude(),
            longitude: location.position.longitude(),
            country_code: location.country.map(|c| c.as_str().to_string()),
        }
    }
}

/// Response for location search.
#[derive(Debug, Serialize)]
pub struct NodeSearchResponse {
    pub nodes: Vec<NodeResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
