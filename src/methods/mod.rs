//! Named solving methods.
//!
//! Every method turns an [`Instance`] into a solution record given a seed
//! and a JSON params object. Methods are registered statically; [`find`]
//! resolves them by name.
//!
//! | Name | Approach |
//! |------|----------|
//! | `baseline_place_on_buildings` | deterministic on-site greedy |
//! | `randomized_greedy` | on-site greedy, randomized order and packing |
//! | `greedy_local_search` | set-cover greedy plus local search |
//!
//! Params are optional: `null` or `{}` selects every default, and unknown
//! keys are rejected with [`AntennaError::InvalidParams`].

mod baseline;
mod greedy_ls;
mod placement;
mod randomized;

pub use baseline::BaselinePlaceOnBuildings;
pub use greedy_ls::GreedyLocalSearch;
pub use randomized::{Ordering, RandomizedGreedy};

use crate::dataset::{Dataset, SolutionRecord};
use crate::error::AntennaError;
use crate::instance::Instance;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A solving strategy.
pub trait Method: Sync {
    /// Registry key.
    fn name(&self) -> &'static str;

    /// One-line summary for listings.
    fn description(&self) -> &'static str;

    /// Produces a solution. The same seed and params always give the same
    /// record.
    fn solve(&self, instance: &Instance, seed: u64, params: &Value) -> Result<SolutionRecord, AntennaError>;
}

static METHODS: [&dyn Method; 3] = [&BaselinePlaceOnBuildings, &RandomizedGreedy, &GreedyLocalSearch];

/// All registered methods.
pub fn all() -> &'static [&'static dyn Method] {
    &METHODS
}

/// Looks a method up by name.
pub fn find(name: &str) -> Result<&'static dyn Method, AntennaError> {
    METHODS
        .iter()
        .copied()
        .find(|m| m.name() == name)
        .ok_or_else(|| AntennaError::UnknownMethod(name.to_string()))
}

/// Validates `dataset` and solves it with the named method.
///
/// # Examples
///
/// ```
/// use u_antenna::dataset::Dataset;
/// use u_antenna::methods;
///
/// let dataset = Dataset::from_json(
///     r#"{"buildings":[{"id":1,"x":0,"y":0,"populationPeakHours":80,"populationOffPeakHours":40,"populationNight":10}]}"#,
/// )
/// .unwrap();
/// let solution = methods::solve("greedy_local_search", &dataset, 42, &serde_json::Value::Null).unwrap();
/// assert_eq!(solution.antennas.len(), 1);
/// ```
pub fn solve(name: &str, dataset: &Dataset, seed: u64, params: &Value) -> Result<SolutionRecord, AntennaError> {
    let method = find(name)?;
    let instance = Instance::new(dataset)?;
    method.solve(&instance, seed, params)
}

/// Deserializes a params object, treating `null` as all defaults.
pub(crate) fn parse_params<P>(params: &Value) -> Result<P, AntennaError>
where
    P: DeserializeOwned + Default,
{
    if params.is_null() {
        return Ok(P::default());
    }
    serde_json::from_value(params.clone()).map_err(|e| AntennaError::InvalidParams(e.to_string()))
}
