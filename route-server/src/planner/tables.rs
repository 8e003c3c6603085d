//! Static reference tables consumed by the planner.
//!
//! These are injected into the planner rather than read from globals, so
//! tests and deployments can substitute their own values.

use std::collections::{HashMap, HashSet};

use crate::domain::{CountryCode, TransportMode};

use super::scoring::TariffModel;

/// CO2 emission factor per transport mode (per ton-kilometre).
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionFactors {
    pub land: f64,
    pub sea: f64,
    pub air: f64,
}

impl EmissionFactors {
    pub fn factor(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Land => self.land,
            TransportMode::Sea => self.sea,
            TransportMode::Air => self.air,
        }
    }

    /// Lowest factor among `modes`.
    pub fn lowest(&self, modes: &HashSet<TransportMode>) -> Option<f64> {
        modes.iter().map(|m| self.factor(*m)).min_by(f64::total_cmp)
    }
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            land: 0.1,
            sea: 0.01,
            air: 0.7,
        }
    }
}

/// Average port and customs waiting times (hours) per country.
#[derive(Debug, Clone, PartialEq)]
pub struct WaitingTimes {
    by_country: HashMap<CountryCode, f64>,

    /// Used for countries not in the table, and for locations with no country.
    pub default_hours: f64,

    /// Sea legs wait the destination country's average divided by this.
    pub sea_divisor: f64,

    /// Flat wait added to every air leg.
    pub air_hours: f64,
}

/// Country averages (hours) shipped as the default table.
const DEFAULT_COUNTRY_WAITS: [(&str, f64); 30] = [
    ("CN", 117.7),
    ("AU", 187.1),
    ("US", 118.2),
    ("BR", 366.3),
    ("RU", 106.8),
    ("CA", 126.5),
    ("AR", 55.7),
    ("ZA", 237.5),
    ("JP", 68.4),
    ("IN", 90.0),
    ("UA", 58.8),
    ("AE", 79.2),
    ("ID", 63.4),
    ("KR", 74.7),
    ("NZ", 64.8),
    ("CL", 280.3),
    ("TR", 130.1),
    ("VN", 48.6),
    ("CO", 83.4),
    ("MY", 126.5),
    ("MX", 109.2),
    ("TW", 71.3),
    ("PE", 196.5),
    ("OM", 85.4),
    ("NO", 45.2),
    ("FR", 58.4),
    ("SA", 89.5),
    ("MA", 227.4),
    ("RO", 83.5),
    ("MZ", 265.3),
];

/// Default wait for countries missing from the table.
pub const DEFAULT_WAIT_HOURS: f64 = 89.5;

impl WaitingTimes {
    /// An empty table with the standard default, sea divisor and air wait.
    pub fn empty() -> Self {
        Self {
            by_country: HashMap::new(),
            default_hours: DEFAULT_WAIT_HOURS,
            sea_divisor: 2.0,
            air_hours: 2.0,
        }
    }

    /// Set the average wait for a country.
    pub fn insert(&mut self, country: CountryCode, hours: f64) {
        self.by_country.insert(country, hours);
    }

    /// Average wait for a country, falling back to the default.
    pub fn hours_for(&self, country: Option<CountryCode>) -> f64 {
        country
            .and_then(|c| self.by_country.get(&c).copied())
            .unwrap_or(self.default_hours)
    }

    /// Waiting time incurred by a leg of `mode` arriving in `destination`.
    pub fn leg_wait(&self, mode: TransportMode, destination: Option<CountryCode>) -> f64 {
        match mode {
            TransportMode::Land => 0.0,
            TransportMode::Sea if self.sea_divisor > 0.0 => {
                self.hours_for(destination) / self.sea_divisor
            }
            TransportMode::Sea => self.hours_for(destination),
            TransportMode::Air => self.air_hours,
        }
    }

    pub fn len(&self) -> usize {
        self.by_country.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_country.is_empty()
    }
}

impl Default for WaitingTimes {
    fn default() -> Self {
        let mut table = Self::empty();
        for (code, hours) in DEFAULT_COUNTRY_WAITS {
            if let Ok(country) = CountryCode::parse(code) {
                table.insert(country, hours);
            }
        }
        table
    }
}

/// All reference tables the planner needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannerTables {
    pub emissions: EmissionFactors,
    pub waiting: WaitingTimes,
    pub tariff: TariffModel,
}
