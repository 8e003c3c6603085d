//! Unit tests for the best-first route search.

use std::collections::HashSet;

use super::*;
use crate::domain::{CostWeights, TransportMode};
use crate::graph::fixtures::{country, edge, location, shipping_stats, toy_graph, uniform_stats};
use crate::graph::{GraphBuilder, TransportGraph};

fn ids(route: &RoutePath) -> Vec<&str> {
    route.path.iter().map(|n| n.as_str()).collect()
}

fn modes(list: &[TransportMode]) -> HashSet<TransportMode> {
    list.iter().copied().collect()
}

fn run(graph: &TransportGraph, query: &RouteQuery) -> Result<SearchResult, SearchError> {
    let tables = PlannerTables::default();
    let config = SearchConfig::default();
    Planner::new(graph, &tables, &config).find_routes(query)
}

#[test]
fn ranks_routes_by_cost() {
    // A→C by air: 5 + border 1 = 6; A→B→C: 10 + border 1 + 2 = 13
    let graph = toy_graph();
    let result = run(&graph, &RouteQuery::new("A", "C")).unwrap();

    assert_eq!(result.routes.len(), 2);
    assert_eq!(ids(&result.routes[0]), vec!["A", "C"]);
    assert_eq!(ids(&result.routes[1]), vec!["A", "B", "C"]);
    assert!((result.routes[0].search_cost - 6.0).abs() < 1e-9);
    assert!((result.routes[1].search_cost - 13.0).abs() < 1e-9);
    assert!(!result.truncated);
}

#[test]
fn disallowed_mode_never_used() {
    let graph = toy_graph();
    let mut query = RouteQuery::new("A", "C");
    query.allowed_modes = modes(&[TransportMode::Land, TransportMode::Sea]);

    let result = run(&graph, &query).unwrap();

    assert_eq!(result.routes.len(), 1);
    assert_eq!(ids(&result.routes[0]), vec!["A", "B", "C"]);
    for route in &result.routes {
        assert!(route.legs.iter().all(|l| l.mode != TransportMode::Air));
    }
}

#[test]
fn start_equals_goal_is_trivial() {
    let graph = toy_graph();
    let result = run(&graph, &RouteQuery::new("B", "B")).unwrap();

    assert_eq!(result.routes.len(), 1);
    let route = &result.routes[0];
    assert_eq!(ids(route), vec!["B"]);
    assert_eq!(route.coordinates, vec![(25.2, 55.3)]);
    assert!(route.legs.is_empty());
    assert_eq!(route.search_cost, 0.0);
    assert_eq!(route.metrics.total_cost, 0.0);
    assert_eq!(route.metrics.sustainability_score, 100.0);
    assert_eq!(result.expansions, 0);
}

#[test]
fn unknown_endpoints() {
    let graph = toy_graph();

    let err = run(&graph, &RouteQuery::new("Z", "C")).unwrap_err();
    assert_eq!(err, SearchError::NodeNotFound("Z".to_string()));

    let err = run(&graph, &RouteQuery::new("A", "Y")).unwrap_err();
    assert_eq!(err, SearchError::NodeNotFound("Y".to_string()));
}

#[test]
fn excluded_endpoint_rejected_before_search() {
    let graph = toy_graph();

    let mut query = RouteQuery::new("A", "C");
    query.exclude_countries.insert(country("IN"));
    let err = run(&graph, &query).unwrap_err();
    assert_eq!(
        err.to_string(),
        "no valid route: A is in excluded country IN"
    );

    let mut query = RouteQuery::new("A", "C");
    query.exclude_countries.insert(country("AE"));
    assert!(matches!(
        run(&graph, &query),
        Err(SearchError::ExcludedEndpoint { .. })
    ));
}

#[test]
fn excluded_intermediate_is_avoided() {
    // A→D goes through C (AE) either way; excluding AE leaves nothing
    let graph = toy_graph();
    let result = run(&graph, &RouteQuery::new("A", "D")).unwrap();
    assert_eq!(ids(&result.routes[0]), vec!["A", "C", "D"]);

    let mut query = RouteQuery::new("A", "D");
    query.exclude_countries.insert(country("AE"));
    let err = run(&graph, &query).unwrap_err();
    assert!(matches!(err, SearchError::NoRouteFound { .. }));
}

#[test]
fn excluding_only_exit_yields_no_route() {
    let mut builder = GraphBuilder::new(uniform_stats());
    builder
        .add_node(location("Jalgaon", 21.0, 75.5, Some("IN")))
        .unwrap()
        .add_node(location("Shanghai", 31.2, 121.5, Some("CN")))
        .unwrap()
        .add_node(location("San Francisco", 37.77, -122.42, Some("US")))
        .unwrap();
    builder
        .add_edge(edge("Jalgaon", "Shanghai", TransportMode::Land, 3.0))
        .unwrap()
        .add_edge(edge("Shanghai", "San Francisco", TransportMode::Sea, 4.0))
        .unwrap();
    let graph = builder.build();

    let mut query = RouteQuery::new("Jalgaon", "San Francisco");
    query.exclude_countries.insert(country("CN"));
    query.allowed_modes = modes(&[TransportMode::Sea, TransportMode::Land]);

    let err = run(&graph, &query).unwrap_err();
    assert_eq!(
        err,
        SearchError::NoRouteFound {
            start: crate::graph::fixtures::node("Jalgaon"),
            goal: crate::graph::fixtures::node("San Francisco"),
            allowed_modes: vec![TransportMode::Land, TransportMode::Sea],
            excluded_countries: vec![country("CN")],
        }
    );
    assert_eq!(
        err.to_string(),
        "no route found from Jalgaon to San Francisco (modes: land, sea, excluded countries: CN)"
    );
}

#[test]
fn respects_top_n() {
    let graph = toy_graph();
    let mut query = RouteQuery::new("A", "C");
    query.top_n = 1;

    let result = run(&graph, &query).unwrap();
    assert_eq!(result.routes.len(), 1);
    assert_eq!(ids(&result.routes[0]), vec!["A", "C"]);
    // A is expanded, C completes, then B's f-cost (11) exceeds the best (6)
    assert_eq!(result.expansions, 1);
}

#[test]
fn waiting_time_accumulates_per_mode() {
    let graph = toy_graph();
    let result = run(&graph, &RouteQuery::new("A", "C")).unwrap();

    // Air leg: flat 2 hours
    assert_eq!(result.routes[0].metrics.waiting_hours, 2.0);
    // Land (0) then sea into AE: 79.2 / 2
    assert!((result.routes[1].metrics.waiting_hours - 39.6).abs() < 1e-9);
}

#[test]
fn border_penalty_needs_both_countries() {
    // C (AE) → D (no country): no penalty. A→C = 6, C→D = 1
    let graph = toy_graph();
    let mut query = RouteQuery::new("A", "D");
    query.top_n = 1;
    let result = run(&graph, &query).unwrap();
    assert!((result.routes[0].search_cost - 7.0).abs() < 1e-9);
}

#[test]
fn weights_change_the_ranking() {
    let mut builder = GraphBuilder::new(uniform_stats());
    builder
        .add_node(location("S", 0.0, 0.0, None))
        .unwrap()
        .add_node(location("G", 0.0, 10.0, None))
        .unwrap();
    let fast_dirty = crate::domain::Edge::new(
        crate::graph::fixtures::node("S"),
        crate::graph::fixtures::node("G"),
        TransportMode::Air,
        crate::domain::RawCosts::new(1100.0, 2.0, 900.0).unwrap(),
        crate::domain::NormalizedCosts::new(1.0, 50.0, 90.0).unwrap(),
    );
    let slow_clean = crate::domain::Edge::new(
        crate::graph::fixtures::node("S"),
        crate::graph::fixtures::node("G"),
        TransportMode::Sea,
        crate::domain::RawCosts::new(1200.0, 60.0, 100.0).unwrap(),
        crate::domain::NormalizedCosts::new(40.0, 5.0, 2.0).unwrap(),
    );
    builder
        .add_edge(fast_dirty)
        .unwrap()
        .add_edge(slow_clean)
        .unwrap();
    let graph = builder.build();

    let mut query = RouteQuery::new("S", "G");
    query.top_n = 1;

    query.weights = CostWeights::new(1.0, 0.0, 0.0).unwrap();
    let result = run(&graph, &query).unwrap();
    assert_eq!(result.routes[0].legs[0].mode, TransportMode::Air);

    query.weights = CostWeights::new(0.0, 0.0, 1.0).unwrap();
    let result = run(&graph, &query).unwrap();
    assert_eq!(result.routes[0].legs[0].mode, TransportMode::Sea);
}

#[test]
fn ties_resolve_in_insertion_order() {
    let mut builder = GraphBuilder::new(uniform_stats());
    for (id, lon) in [("S", 0.0), ("M1", 1.0), ("M2", 2.0), ("G", 3.0)] {
        builder.add_node(location(id, 0.0, lon, None)).unwrap();
    }
    builder
        .add_edge(edge("S", "M1", TransportMode::Land, 1.0))
        .unwrap()
        .add_edge(edge("S", "M2", TransportMode::Land, 1.0))
        .unwrap()
        .add_edge(edge("M1", "G", TransportMode::Land, 1.0))
        .unwrap()
        .add_edge(edge("M2", "G", TransportMode::Land, 1.0))
        .unwrap();
    let graph = builder.build();

    let result = run(&graph, &RouteQuery::new("S", "G")).unwrap();
    assert_eq!(result.routes.len(), 2);
    assert_eq!(ids(&result.routes[0]), vec!["S", "M1", "G"]);
    assert_eq!(ids(&result.routes[1]), vec!["S", "M2", "G"]);
}

#[test]
fn cycles_are_not_followed() {
    let mut builder = GraphBuilder::new(uniform_stats());
    for (id, lon) in [("A", 0.0), ("B", 1.0), ("C", 2.0)] {
        builder.add_node(location(id, 0.0, lon, None)).unwrap();
    }
    builder
        .add_edge(edge("A", "B", TransportMode::Land, 1.0))
        .unwrap()
        .add_edge(edge("B", "A", TransportMode::Land, 1.0))
        .unwrap()
        .add_edge(edge("B", "B", TransportMode::Sea, 0.0))
        .unwrap()
        .add_edge(edge("B", "C", TransportMode::Land, 1.0))
        .unwrap();
    let graph = builder.build();

    let mut query = RouteQuery::new("A", "C");
    query.top_n = 10;
    let result = run(&graph, &query).unwrap();

    assert_eq!(result.routes.len(), 1);
    assert_eq!(ids(&result.routes[0]), vec!["A", "B", "C"]);
}

#[test]
fn metrics_are_attached() {
    let graph = toy_graph();
    let mut query = RouteQuery::new("A", "C");
    query.allowed_modes = modes(&[TransportMode::Land, TransportMode::Sea]);
    query.cargo_weight = 500.0;

    let result = run(&graph, &query).unwrap();
    let route = &result.routes[0];

    assert_eq!(route.legs.len(), 2);
    assert_eq!(route.coordinates.len(), 3);
    assert!((route.metrics.total_distance_km - 2220.0).abs() < 1e-9);
    assert!((route.metrics.total_time_hours - 46.0).abs() < 1e-9);
    // per-ton CO2 = 2100*0.1 + 120*0.01 = 211.2
    assert!((route.legs[0].co2_per_ton - 210.0).abs() < 1e-9);
    assert!((route.metrics.total_co2 - 211.2 * 500.0 / 100_000.0).abs() < 1e-9);
    // score input = 211.2 * 500 / 500 = 211.2 -> 100 - 4.224
    assert_eq!(route.metrics.sustainability_score, 95.78);
    assert_eq!(route.metrics.carbon_rating, CarbonRating::Low);
}

#[test]
fn invalid_requests() {
    let graph = toy_graph();

    let mut query = RouteQuery::new("A", "C");
    query.top_n = 0;
    assert!(matches!(run(&graph, &query), Err(SearchError::InvalidRequest(_))));

    let mut query = RouteQuery::new("A", "C");
    query.allowed_modes.clear();
    assert!(matches!(run(&graph, &query), Err(SearchError::InvalidRequest(_))));

    let mut query = RouteQuery::new("A", "C");
    query.cargo_weight = -1.0;
    assert!(matches!(run(&graph, &query), Err(SearchError::InvalidRequest(_))));

    let mut query = RouteQuery::new("A", "C");
    query.weights.price = f64::NAN;
    assert!(matches!(run(&graph, &query), Err(SearchError::InvalidRequest(_))));
}

#[test]
fn expansion_cap_truncates() {
    let graph = toy_graph();
    let tables = PlannerTables::default();
    let config = SearchConfig {
        max_expansions: 1,
        ..SearchConfig::default()
    };
    let planner = Planner::new(&graph, &tables, &config);

    // A is expanded, C completes, then B would be a second expansion
    let result = planner.find_routes(&RouteQuery::new("A", "C")).unwrap();
    assert_eq!(result.routes.len(), 1);
    assert!(result.truncated);

    // Reaching D needs at least two expansions
    let err = planner.find_routes(&RouteQuery::new("A", "D")).unwrap_err();
    assert_eq!(err, SearchError::SearchLimitReached { expansions: 1 });
}

#[test]
fn zero_deadline_stops_immediately() {
    let graph = toy_graph();
    let tables = PlannerTables::default();
    let config = SearchConfig {
        deadline_ms: Some(0),
        ..SearchConfig::default()
    };
    let planner = Planner::new(&graph, &tables, &config);

    let err = planner.find_routes(&RouteQuery::new("A", "D")).unwrap_err();
    assert_eq!(err, SearchError::SearchLimitReached { expansions: 0 });
}

#[test]
fn heuristic_guided_search_reaches_goal() {
    let mut builder = GraphBuilder::new(shipping_stats());
    builder
        .add_node(location("Jalgaon", 21.0, 75.5, Some("IN")))
        .unwrap()
        .add_node(location("Mumbai", 19.07, 72.88, Some("IN")))
        .unwrap()
        .add_node(location("Delhi", 28.6, 77.2, Some("IN")))
        .unwrap()
        .add_node(location("Singapore", 1.29, 103.85, Some("SG")))
        .unwrap()
        .add_node(location("San Francisco", 37.77, -122.42, Some("US")))
        .unwrap();
    builder
        .add_edge(edge("Jalgaon", "Mumbai", TransportMode::Land, 0.8))
        .unwrap()
        .add_edge(edge("Jalgaon", "Delhi", TransportMode::Land, 1.0))
        .unwrap()
        .add_edge(edge("Mumbai", "Singapore", TransportMode::Sea, 3.0))
        .unwrap()
        .add_edge(edge("Singapore", "San Francisco", TransportMode::Sea, 9.0))
        .unwrap()
        .add_edge(edge("Delhi", "San Francisco", TransportMode::Air, 30.0))
        .unwrap();
    let graph = builder.build();

    let result = run(&graph, &RouteQuery::new("Jalgaon", "San Francisco")).unwrap();
    assert_eq!(result.routes.len(), 2);
    assert_eq!(
        ids(&result.routes[0]),
        vec!["Jalgaon", "Mumbai", "Singapore", "San Francisco"]
    );
    assert!(result.routes[0].search_cost <= result.routes[1].search_cost);
}

#[test]
fn identical_queries_give_identical_results() {
    let graph = toy_graph();
    let query = RouteQuery::new("A", "D");
    assert_eq!(run(&graph, &query).unwrap(), run(&graph, &query).unwrap());
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    const COUNTRIES: [Option<&str>; 4] = [None, Some("IN"), Some("CN"), Some("US")];

    #[derive(Debug, Clone)]
    struct Case {
        countries: Vec<Option<&'static str>>,
        edges: Vec<(usize, usize, TransportMode, f64)>,
        excluded: Vec<&'static str>,
        allowed: Vec<TransportMode>,
        top_n: usize,
    }

    fn mode_strategy() -> impl Strategy<Value = TransportMode> {
        proptest::sample::select(TransportMode::ALL.to_vec())
    }

    fn case_strategy() -> impl Strategy<Value = Case> {
        (2usize..8).prop_flat_map(|n| {
            (
                proptest::collection::vec(proptest::sample::select(COUNTRIES.to_vec()), n),
                proptest::collection::vec((0..n, 0..n, mode_strategy(), 0.0f64..20.0), 0..20),
                proptest::sample::subsequence(vec!["IN", "CN", "US"], 0..=2),
                proptest::sample::subsequence(TransportMode::ALL.to_vec(), 1..=3),
                1usize..5,
            )
                .prop_map(|(countries, edges, excluded, allowed, top_n)| Case {
                    countries,
                    edges,
                    excluded,
                    allowed,
                    top_n,
                })
        })
    }

    fn build(case: &Case) -> TransportGraph {
        let mut builder = GraphBuilder::new(shipping_stats());
        for (i, c) in case.countries.iter().enumerate() {
            let lat = (i as f64 * 7.0) - 20.0;
            let lon = (i as f64 * 23.0) - 80.0;
            builder.add_node(location(&format!("N{i}"), lat, lon, *c)).unwrap();
        }
        for &(from, to, mode, norm) in &case.edges {
            builder
                .add_edge(edge(&format!("N{from}"), &format!("N{to}"), mode, norm))
                .unwrap();
        }
        builder.build()
    }

    fn query(case: &Case) -> RouteQuery {
        let mut q = RouteQuery::new("N0", format!("N{}", case.countries.len() - 1));
        q.exclude_countries = case.excluded.iter().map(|c| country(c)).collect();
        q.allowed_modes = case.allowed.iter().copied().collect();
        q.top_n = case.top_n;
        q
    }

    proptest! {
        /// Every route is a simple start→goal path over allowed modes,
        /// avoiding excluded countries, at most top_n, sorted by cost
        #[test]
        fn routes_satisfy_constraints(case in case_strategy()) {
            let graph = build(&case);
            let q = query(&case);

            match run(&graph, &q) {
                Ok(result) => {
                    prop_assert!(!result.routes.is_empty());
                    prop_assert!(result.routes.len() <= q.top_n);

                    for route in &result.routes {
                        prop_assert_eq!(route.path.first().map(|n| n.as_str()), Some(q.start.as_str()));
                        prop_assert_eq!(route.path.last().map(|n| n.as_str()), Some(q.goal.as_str()));

                        let unique: HashSet<_> = route.path.iter().collect();
                        prop_assert_eq!(unique.len(), route.path.len());

                        prop_assert_eq!(route.legs.len() + 1, route.path.len());
                        for leg in &route.legs {
                            prop_assert!(q.allowed_modes.contains(&leg.mode));
                        }

                        for id in &route.path {
                            let loc = graph.node_info(id.as_str()).unwrap();
                            prop_assert!(!loc.is_in_any(&q.exclude_countries));
                        }

                        let score = route.metrics.sustainability_score;
                        prop_assert!((0.0..=100.0).contains(&score));
                    }

                    for pair in result.routes.windows(2) {
                        prop_assert!(pair[0].search_cost <= pair[1].search_cost);
                    }
                }
                Err(SearchError::NoRouteFound { .. }) | Err(SearchError::ExcludedEndpoint { .. }) => {}
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }

        /// Same query on the same graph, same answer
        #[test]
        fn search_is_deterministic(case in case_strategy()) {
            let graph = build(&case);
            let q = query(&case);
            prop_assert_eq!(run(&graph, &q), run(&graph, &q));
        }
    }
}
