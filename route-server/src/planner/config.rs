//! Search configuration for the route planner.

use std::time::Duration;

/// Configuration parameters for route search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Maximum number of routes returned when a query does not say.
    pub default_top_n: usize,

    /// Maximum number of partial paths expanded per search.
    /// The frontier can grow quickly on dense graphs because the heuristic
    /// is not admissible; this bounds the work.
    pub max_expansions: usize,

    /// Optional wall-clock budget per search (milliseconds).
    pub deadline_ms: Option<u64>,

    /// Cost added when a leg crosses between two different countries.
    pub border_penalty: f64,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        default_top_n: usize,
        max_expansions: usize,
        deadline_ms: Option<u64>,
        border_penalty: f64,
    ) -> Self {
        Self {
            default_top_n,
            max_expansions,
            deadline_ms,
            border_penalty,
        }
    }

    /// Returns the search deadline as a Duration, if one is set.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_top_n: 3,
            max_expansions: 200_000,
            deadline_ms: None,
            border_penalty: 1.0,
        }
    }
}
