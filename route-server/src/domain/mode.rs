//! Transport modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown transport mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport mode: {0:?} (expected land, sea or air)")]
pub struct InvalidTransportMode(String);

/// The mode of a transport leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Land,
    Sea,
    Air,
}

impl TransportMode {
    /// All modes, in a fixed order.
    pub const ALL: [TransportMode; 3] = [TransportMode::Land, TransportMode::Sea, TransportMode::Air];

    /// Parse a mode name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidTransportMode> {
        match s.trim().to_ascii_lowercase().as_str() {
            "land" => Ok(TransportMode::Land),
            "sea" => Ok(TransportMode::Sea),
            "air" => Ok(TransportMode::Air),
            _ => Err(InvalidTransportMode(s.to_string())),
        }
    }

    /// Lowercase name as used in snapshots and the HTTP API.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Land => "land",
            TransportMode::Sea => "sea",
            TransportMode::Air => "air",
        }
    }
}

impl FromStr for TransportMode {
    type Err = InvalidTransportMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
