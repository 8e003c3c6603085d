//! Domain types for the route planner.
//!
//! This module contains the validated records the transport graph is built
//! from. All types enforce their invariants at construction time, so code
//! that receives these types can trust their validity.

mod country;
mod edge;
mod error;
mod location;
mod mode;
mod node_id;
mod weights;

pub use country::{CountryCode, InvalidCountryCode};
pub use edge::{Edge, NormalizedCosts, RawCosts};
pub use error::DomainError;
pub use location::{Location, Position};
pub use mode::{InvalidTransportMode, TransportMode};
pub use node_id::{InvalidNodeId, NodeId};
pub use weights::CostWeights;
