//! Best-first top-N route search.
//!
//! Expands partial paths in order of estimated total cost (accumulated cost
//! plus heuristic), recording every arrival at the goal as a completed
//! route. Paths never revisit a location, so every result is a simple path.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::fmt;
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::domain::{CostWeights, CountryCode, Edge, NodeId, TransportMode};
use crate::graph::TransportGraph;

use super::config::SearchConfig;
use super::heuristic::Heuristic;
use super::scoring::{LegBreakdown, RouteMetrics, score_route};
use super::tables::PlannerTables;

/// Error from route search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// Start or goal is not in the graph
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// Start or goal lies in an excluded country
    #[error("no valid route: {node} is in excluded country {country}")]
    ExcludedEndpoint { node: NodeId, country: CountryCode },

    /// The search finished without reaching the goal
    #[error(
        "no route found from {start} to {goal} (modes: {}, excluded countries: {})",
        join(.allowed_modes),
        join(.excluded_countries)
    )]
    NoRouteFound {
        start: NodeId,
        goal: NodeId,
        allowed_modes: Vec<TransportMode>,
        excluded_countries: Vec<CountryCode>,
    },

    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),

    /// Expansion cap or deadline hit before any route completed
    #[error("search limit reached after {expansions} expansions")]
    SearchLimitReached { expansions: usize },
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    if items.is_empty() {
        return "none".to_string();
    }
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Request for route search.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    pub start: String,
    pub goal: String,

    /// No location on a returned route may lie in one of these.
    pub exclude_countries: HashSet<CountryCode>,

    /// Maximum number of routes to return.
    pub top_n: usize,

    pub weights: CostWeights,

    /// Edges of other modes are never taken.
    pub allowed_modes: HashSet<TransportMode>,

    /// Cargo weight, used only for the derived metrics.
    pub cargo_weight: f64,
}

impl RouteQuery {
    /// Create a query with default weights, all modes, no exclusions,
    /// three results and a cargo weight of 100.
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            exclude_countries: HashSet::new(),
            top_n: 3,
            weights: CostWeights::default(),
            allowed_modes: TransportMode::ALL.into_iter().collect(),
            cargo_weight: 100.0,
        }
    }

    /// Validate the query.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.top_n == 0 {
            return Err(SearchError::InvalidRequest(
                "top_n must be at least 1".to_string(),
            ));
        }

        if self.allowed_modes.is_empty() {
            return Err(SearchError::InvalidRequest(
                "at least one transport mode must be allowed".to_string(),
            ));
        }

        CostWeights::new(self.weights.time, self.weights.price, self.weights.emissions)
            .map_err(|e| SearchError::InvalidRequest(e.to_string()))?;

        if !self.cargo_weight.is_finite() || self.cargo_weight < 0.0 {
            return Err(SearchError::InvalidRequest(format!(
                "invalid cargo weight: {}",
                self.cargo_weight
            )));
        }

        Ok(())
    }

    fn sorted_modes(&self) -> Vec<TransportMode> {
        let mut modes: Vec<_> = self.allowed_modes.iter().copied().collect();
        modes.sort();
        modes
    }

    fn sorted_exclusions(&self) -> Vec<CountryCode> {
        let mut countries: Vec<_> = self.exclude_countries.iter().copied().collect();
        countries.sort();
        countries
    }
}

/// A completed route with its derived metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePath {
    /// Locations from start to goal.
    pub path: Vec<NodeId>,

    /// `(latitude, longitude)` of each location on the path.
    pub coordinates: Vec<(f64, f64)>,

    pub legs: Vec<LegBreakdown>,

    /// Weighted normalized cost the search ranked this route by.
    pub search_cost: f64,

    pub metrics: RouteMetrics,
}

/// Result of route search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Found routes, cheapest first.
    pub routes: Vec<RoutePath>,

    /// Number of partial paths expanded.
    pub expansions: usize,

    /// Whether the search stopped on its expansion cap or deadline.
    pub truncated: bool,
}

/// A partial path on the frontier.
struct Frontier<'g> {
    f_cost: f64,
    seq: u64,
    g_cost: f64,
    node: usize,
    path: Vec<usize>,
    edges: Vec<&'g Edge>,
    wait_hours: f64,
}

impl PartialEq for Frontier<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier<'_> {}

impl PartialOrd for Frontier<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier<'_> {
    // Reversed so the max-heap pops the lowest f-cost, then the earliest push.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_cost
            .total_cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A path that reached the goal.
struct Completed<'g> {
    g_cost: f64,
    path: Vec<usize>,
    edges: Vec<&'g Edge>,
    wait_hours: f64,
}

fn border_penalty(from: Option<CountryCode>, to: Option<CountryCode>, penalty: f64) -> f64 {
    match (from, to) {
        (Some(a), Some(b)) if a != b => penalty,
        _ => 0.0,
    }
}

/// Route planner over a shared transport graph.
pub struct Planner<'a> {
    graph: &'a TransportGraph,
    tables: &'a PlannerTables,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(
        graph: &'a TransportGraph,
        tables: &'a PlannerTables,
        config: &'a SearchConfig,
    ) -> Self {
        Self {
            graph,
            tables,
            config,
        }
    }

    /// Find up to `query.top_n` routes from start to goal, cheapest first.
    pub fn find_routes(&self, query: &RouteQuery) -> Result<SearchResult, SearchError> {
        query.validate()?;

        let start = self
            .graph
            .index_of(&query.start)
            .map_err(|_| SearchError::NodeNotFound(query.start.clone()))?;
        let goal = self
            .graph
            .index_of(&query.goal)
            .map_err(|_| SearchError::NodeNotFound(query.goal.clone()))?;

        for idx in [start, goal] {
            let location = self.graph.location_at(idx);
            if let Some(country) = location
                .country
                .filter(|c| query.exclude_countries.contains(c))
            {
                return Err(SearchError::ExcludedEndpoint {
                    node: location.id.clone(),
                    country,
                });
            }
        }

        if start == goal {
            return Ok(SearchResult {
                routes: vec![self.build_route(&[start], &[], 0.0, 0.0, query.cargo_weight)],
                expansions: 0,
                truncated: false,
            });
        }

        debug!(
            start = %query.start,
            goal = %query.goal,
            top_n = query.top_n,
            modes = ?query.sorted_modes(),
            excluded = ?query.sorted_exclusions(),
            "starting route search"
        );

        let heuristic = Heuristic::compute(
            self.graph,
            goal,
            &query.weights,
            &query.allowed_modes,
            &self.tables.emissions,
        );

        let (completed, expansions, truncated) = self.search(query, start, goal, &heuristic);

        debug!(
            completed = completed.len(),
            expansions, truncated, "route search finished"
        );

        if completed.is_empty() {
            if truncated {
                return Err(SearchError::SearchLimitReached { expansions });
            }
            return Err(SearchError::NoRouteFound {
                start: self.graph.location_at(start).id.clone(),
                goal: self.graph.location_at(goal).id.clone(),
                allowed_modes: query.sorted_modes(),
                excluded_countries: query.sorted_exclusions(),
            });
        }

        let routes = completed
            .iter()
            .take(query.top_n)
            .map(|c| {
                self.build_route(&c.path, &c.edges, c.g_cost, c.wait_hours, query.cargo_weight)
            })
            .collect();

        Ok(SearchResult {
            routes,
            expansions,
            truncated,
        })
    }

    /// Run the best-first loop. Returns completed paths sorted by cost, the
    /// number of expansions, and whether a search bound was hit.
    fn search(
        &self,
        query: &RouteQuery,
        start: usize,
        goal: usize,
        heuristic: &Heuristic,
    ) -> (Vec<Completed<'a>>, usize, bool) {
        let started = Instant::now();
        let deadline = self.config.deadline();

        let mut queue = BinaryHeap::new();
        let mut seq: u64 = 0;
        queue.push(Frontier {
            f_cost: heuristic.at(start),
            seq,
            g_cost: 0.0,
            node: start,
            path: vec![start],
            edges: Vec::new(),
            wait_hours: 0.0,
        });

        let mut completed: Vec<Completed<'a>> = Vec::new();
        let mut expansions = 0;
        let mut truncated = false;

        while let Some(next) = queue.peek() {
            // Once top_n routes are known, stop when nothing left can beat the worst of them
            if completed.len() >= query.top_n && next.f_cost > completed[query.top_n - 1].g_cost {
                trace!(f_cost = next.f_cost, "frontier exceeds top-n bound");
                break;
            }

            if deadline.is_some_and(|d| started.elapsed() >= d) {
                warn!(expansions, "route search hit deadline");
                truncated = true;
                break;
            }

            let Some(state) = queue.pop() else { break };

            if state.node == goal {
                trace!(g_cost = state.g_cost, hops = state.edges.len(), "route completed");
                // Stable sort keeps discovery order among equal costs
                completed.push(Completed {
                    g_cost: state.g_cost,
                    path: state.path,
                    edges: state.edges,
                    wait_hours: state.wait_hours,
                });
                completed.sort_by(|a, b| a.g_cost.total_cmp(&b.g_cost));
                continue;
            }

            if expansions >= self.config.max_expansions {
                warn!(expansions, "route search hit expansion cap");
                truncated = true;
                break;
            }

            expansions += 1;
            let here = self.graph.location_at(state.node);

            for (to, edge) in self.graph.outgoing_at(state.node) {
                if !query.allowed_modes.contains(&edge.mode) || state.path.contains(&to) {
                    continue;
                }

                let there = self.graph.location_at(to);
                if there.is_in_any(&query.exclude_countries) {
                    continue;
                }

                let penalty = border_penalty(here.country, there.country, self.config.border_penalty);
                let g_cost = state.g_cost + edge.normalized.weighted(&query.weights) + penalty;
                let wait_hours = state.wait_hours + self.tables.waiting.leg_wait(edge.mode, there.country);

                let mut path = state.path.clone();
                path.push(to);
                let mut edges = state.edges.clone();
                edges.push(edge);

                seq += 1;
                queue.push(Frontier {
                    f_cost: g_cost + heuristic.at(to),
                    seq,
                    g_cost,
                    node: to,
                    path,
                    edges,
                    wait_hours,
                });
            }
        }

        (completed, expansions, truncated)
    }

    fn build_route(
        &self,
        path: &[usize],
        edges: &[&Edge],
        search_cost: f64,
        wait_hours: f64,
        cargo_weight: f64,
    ) -> RoutePath {
        let locations: Vec<_> = path.iter().map(|&idx| self.graph.location_at(idx)).collect();

        RoutePath {
            path: locations.iter().map(|l| l.id.clone()).collect(),
            coordinates: locations.iter().map(|l| l.position.as_tuple()).collect(),
            legs: edges
                .iter()
                .map(|e| LegBreakdown::from_edge(e, &self.tables.emissions))
                .collect(),
            search_cost,
            metrics: score_route(edges, cargo_weight, wait_hours, self.tables),
        }
    }
}
