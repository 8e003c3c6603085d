//! Domain error types.
//!
//! These errors represent validation failures when constructing graph
//! records. They are distinct from search and IO errors.

use super::{InvalidCountryCode, InvalidNodeId, InvalidTransportMode};

/// Domain-level errors for record validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    NodeId(#[from] InvalidNodeId),

    #[error(transparent)]
    Country(#[from] InvalidCountryCode),

    #[error(transparent)]
    Mode(#[from] InvalidTransportMode),

    /// Latitude or longitude outside its valid range
    #[error("invalid {axis}: {value}")]
    InvalidCoordinate { axis: &'static str, value: f64 },

    /// Edge attribute that is negative or not finite
    #[error("invalid edge attribute {name}: {value}")]
    InvalidAttribute { name: &'static str, value: f64 },

    /// Objective weight that is negative or not finite
    #[error("invalid {name} weight: {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    /// Normalization bounds with max below min, or not finite
    #[error("invalid {name} bounds: min {min}, max {max}")]
    InvalidBounds { name: &'static str, min: f64, max: f64 },

    /// Per-mode statistic that is negative or not finite
    #[error("invalid {name} for {mode}: {value}")]
    InvalidModeStat {
        name: &'static str,
        mode: super::TransportMode,
        value: f64,
    },
}
