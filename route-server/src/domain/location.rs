//! Graph locations: geographic position plus country.

use serde::Serialize;

use super::{CountryCode, DomainError, NodeId};

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    latitude: f64,
    longitude: f64,
}

impl Position {
    /// Create a position, rejecting non-finite or out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidCoordinate {
                axis: "latitude",
                value: latitude,
            });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinate {
                axis: "longitude",
                value: longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns `(latitude, longitude)`.
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// A location in the transport graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: NodeId,
    pub position: Position,
    /// Absent for locations with no country attribution (e.g. open-sea waypoints).
    pub country: Option<CountryCode>,
}

impl Location {
    pub fn new(id: NodeId, position: Position, country: Option<CountryCode>) -> Self {
        Self {
            id,
            position,
            country,
        }
    }

    /// Whether this location lies in one of the given countries.
    pub fn is_in_any(&self, countries: &std::collections::HashSet<CountryCode>) -> bool {
        self.country.is_some_and(|c| countries.contains(&c))
    }
}
