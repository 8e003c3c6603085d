//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, RouteCache};
use crate::graph::TransportGraph;
use crate::planner::{PlannerTables, SearchConfig};

/// Shared application state.
///
/// The graph and tables are read-only after startup, so searches share them
/// without locking.
#[derive(Clone)]
pub struct AppState {
    /// Transport network
    pub graph: Arc<TransportGraph>,

    /// Emission factors, waiting times and tariff
    pub tables: Arc<PlannerTables>,

    /// Route planner configuration
    pub config: Arc<SearchConfig>,

    /// Recent search results
    pub cache: Arc<RouteCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        graph: TransportGraph,
        tables: PlannerTables,
        config: SearchConfig,
        cache_config: &CacheConfig,
    ) -> Self {
        Self {
            graph: Arc::new(graph),
            tables: Arc::new(tables),
            config: Arc::new(config),
            cache: Arc::new(RouteCache::new(cache_config)),
        }
    }
}
