//! Cost-minimising antenna placement.
//!
//! Given buildings with per-period demand (peak hours, off-peak hours,
//! night), choose antennas (type and integer position) and assign every
//! building to exactly one of them so that each antenna reaches its
//! buildings and carries their summed demand in every period, at minimum
//! total installation cost. Antennas standing exactly on a building get a
//! discounted price.
//!
//! - **Construction** ([`construct`]): greedy weighted set cover that
//!   repeatedly commits the placement covering the most buildings per unit
//!   cost.
//! - **Local search** ([`local`]): type downgrades, pairwise merges and
//!   antenna removals, each kept only if feasible and strictly cheaper.
//! - **Scoring** ([`score`]): authoritative validity and cost of a solution
//!   record.
//! - **Methods** ([`methods`]): named strategies behind a static registry,
//!   plus multi-seed [`experiment`]s.
//!
//! # Example
//!
//! ```
//! use u_antenna::dataset::Dataset;
//! use u_antenna::{methods, score, Instance};
//!
//! let dataset = Dataset::from_json(r#"{"buildings":[
//!     {"id":1,"x":0,"y":0,"populationPeakHours":120,"populationOffPeakHours":60,"populationNight":20},
//!     {"id":2,"x":40,"y":10,"populationPeakHours":50,"populationOffPeakHours":90,"populationNight":15}
//! ]}"#)
//! .unwrap();
//! let instance = Instance::new(&dataset).unwrap();
//!
//! let method = methods::find("greedy_local_search").unwrap();
//! let solution = method.solve(&instance, 7, &serde_json::Value::Null).unwrap();
//!
//! let verdict = score::evaluate(&solution, &instance);
//! assert!(verdict.valid, "{}", verdict.message);
//! ```
//!
//! Randomness is always injected through a seeded generator
//! ([`random::create_rng`]), so every method is reproducible for a given
//! seed. The library logs through `tracing` and installs no subscriber.

pub mod construct;
pub mod dataset;
pub mod error;
pub mod experiment;
pub mod instance;
pub mod local;
pub mod methods;
pub mod model;
pub mod random;
pub mod score;
pub mod spatial;
pub mod state;
pub mod stats;

#[cfg(test)]
mod testing;

pub use dataset::{Dataset, SolutionRecord};
pub use error::AntennaError;
pub use instance::Instance;
pub use score::Score;
pub use state::{AntennaId, SolutionState};
