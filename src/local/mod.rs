//! Local search improvement.
//!
//! Starting from a feasible solution, each step tries three operators in a
//! fixed order and keeps a result only when it is feasible and strictly
//! cheaper than the best state seen so far in that step:
//!
//! 1. [`OptimizeType`]: downgrade antennas to the cheapest type that still
//!    carries their load and reaches their buildings
//! 2. [`Merge`]: replace two nearby antennas with one at their buildings'
//!    centroid
//! 3. [`Remove`]: delete an antenna after redistributing its buildings to
//!    neighbours with spare capacity
//!
//! Rejected results are rolled back to a snapshot of the arena, so a step
//! never returns a worse or infeasible solution.
//!
//! # Key Types
//!
//! - [`LocalSearchConfig`]: operator limits and driver budget
//! - [`LocalSearch`]: single-step engine
//! - [`LocalSearchRunner`]: iteration driver with history and scorer checks

mod config;
mod engine;
mod operators;
mod runner;

pub use config::LocalSearchConfig;
pub use engine::{try_move, LocalSearch, StepOutcome};
pub use operators::{Merge, Operator, OptimizeType, Remove};
pub use runner::{LocalSearchResult, LocalSearchRunner};
