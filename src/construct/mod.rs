//! Greedy constructive generator.
//!
//! Builds a first feasible solution as a weighted set cover: each round
//! samples candidate placements (on uncovered buildings and on the centroid
//! of the uncovered set), packs each candidate greedily up to capacity, and
//! commits the one covering the most buildings per unit cost.
//!
//! # Key Types
//!
//! - [`GreedyConfig`]: sampling parameters
//! - [`GreedyConstructor`]: runs the rounds over an [`Instance`](crate::instance::Instance)
//! - [`Construction`]: the resulting state plus round statistics

mod config;
mod packing;
mod runner;

pub use config::GreedyConfig;
pub use packing::{pack, Packing};
pub use runner::{Construction, GreedyConstructor};
