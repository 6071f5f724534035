//! Domain primitives: coordinates, antenna types, buildings and loads.
//!
//! - [`Point`]: integer coordinate with squared-distance helpers
//! - [`AntennaType`]: the four fixed antenna specifications
//! - [`Building`], [`Demand`], [`Load`]: per-period demand bookkeeping

mod antenna_type;
mod building;
mod geometry;

pub use antenna_type::{AntennaSpec, AntennaType};
pub use building::{Building, Demand, Load};
pub use geometry::{centroid, square, Point};
