//! Error types.

use crate::state::Infeasibility;
use thiserror::Error;

/// Errors returned by fallible public operations.
///
/// Infeasible intermediate solutions during local search are *not* errors;
/// operators report them through `bool` results and the engine rolls back.
#[derive(Debug, Error)]
pub enum AntennaError {
    /// Two buildings in the dataset share an id.
    #[error("duplicate building id {0}")]
    DuplicateBuilding(u32),

    /// A building's demand exceeds the capacity of every antenna type.
    #[error("building {id} has demand {demand}, above the largest antenna capacity {capacity}")]
    DemandExceedsCapacity { id: u32, demand: u64, capacity: u64 },

    /// A solution record references a building the dataset does not contain.
    #[error("unknown building id {0}")]
    UnknownBuilding(u32),

    /// No method is registered under the given name.
    #[error("unknown method '{0}'")]
    UnknownMethod(String),

    /// Method parameters could not be interpreted.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// A configuration failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Local search was handed a solution that is already infeasible.
    #[error("initial solution is infeasible: {0}")]
    InfeasibleStart(#[from] Infeasibility),

    /// The authoritative scorer rejected a state the internal check accepted.
    #[error("scorer rejected a solution that passed the internal feasibility check: {0}")]
    ValidatorDisagreement(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
