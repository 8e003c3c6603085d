//! Caching layer for route search results.
//!
//! The graph is immutable for the lifetime of the server, so a search
//! result depends only on the query. Queries are normalized into a key
//! (sorted sets, floats by bit pattern) so equivalent requests share an
//! entry regardless of the order their sets were given in.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{CountryCode, TransportMode};
use crate::planner::{RouteQuery, SearchResult};

/// Cache key: a route query with its sets sorted and floats as bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    start: String,
    goal: String,
    exclude_countries: Vec<CountryCode>,
    allowed_modes: Vec<TransportMode>,
    top_n: usize,
    weights: [u64; 3],
    cargo_weight: u64,
}

impl RouteKey {
    pub fn from_query(query: &RouteQuery) -> Self {
        let mut exclude_countries: Vec<_> = query.exclude_countries.iter().copied().collect();
        exclude_countries.sort();
        let mut allowed_modes: Vec<_> = query.allowed_modes.iter().copied().collect();
        allowed_modes.sort();

        Self {
            start: query.start.clone(),
            goal: query.goal.clone(),
            exclude_countries,
            allowed_modes,
            top_n: query.top_n,
            weights: [
                query.weights.time.to_bits(),
                query.weights.price.to_bits(),
                query.weights.emissions.to_bits(),
            ],
            cargo_weight: query.cargo_weight.to_bits(),
        }
    }
}

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Cache of successful search results.
pub struct RouteCache {
    results: MokaCache<RouteKey, Arc<SearchResult>>,
}

impl RouteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let results = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { results }
    }

    /// Get a cached result for a query.
    pub async fn get(&self, query: &RouteQuery) -> Option<Arc<SearchResult>> {
        self.results.get(&RouteKey::from_query(query)).await
    }

    /// Insert a result for a query.
    pub async fn insert(&self, query: &RouteQuery, result: Arc<SearchResult>) {
        self.results
            .insert(RouteKey::from_query(query), result)
            .await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.results.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.results.invalidate_all();
    }
}
