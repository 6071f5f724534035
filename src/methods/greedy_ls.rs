//! Greedy set cover followed by local search.

use super::{parse_params, Method};
use crate::construct::{GreedyConfig, GreedyConstructor};
use crate::dataset::SolutionRecord;
use crate::error::AntennaError;
use crate::instance::Instance;
use crate::local::{LocalSearchConfig, LocalSearchRunner};
use crate::random::create_rng;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct GreedyLsParams {
    iterations: usize,
    sample_size: usize,
    merge_distance: i64,
    remove_attempts: usize,
}

impl Default for GreedyLsParams {
    fn default() -> Self {
        let greedy = GreedyConfig::default();
        let local = LocalSearchConfig::default();
        Self {
            iterations: local.max_iterations,
            sample_size: greedy.sample_size,
            merge_distance: local.merge_distance,
            remove_attempts: local.remove_attempts,
        }
    }
}

/// Cost-effectiveness greedy construction, then the three-operator local
/// search.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyLocalSearch;

impl Method for GreedyLocalSearch {
    fn name(&self) -> &'static str {
        "greedy_local_search"
    }

    fn description(&self) -> &'static str {
        "greedy weighted set cover improved by type, merge and remove moves"
    }

    fn solve(&self, instance: &Instance, seed: u64, params: &Value) -> Result<SolutionRecord, AntennaError> {
        let params: GreedyLsParams = parse_params(params)?;
        let greedy = GreedyConfig::default().with_sample_size(params.sample_size);
        let local = LocalSearchConfig::default()
            .with_max_iterations(params.iterations)
            .with_merge_distance(params.merge_distance)
            .with_remove_attempts(params.remove_attempts);
        local.validate().map_err(AntennaError::InvalidParams)?;

        let mut rng = create_rng(seed);
        let construction = GreedyConstructor::new(instance, greedy)
            .map_err(|e| AntennaError::InvalidParams(e.to_string()))?
            .construct(&mut rng);
        let initial_cost = construction.state.total_cost(instance);
        info!(
            antennas = construction.state.len(),
            cost = initial_cost,
            rounds = construction.rounds,
            "greedy construction done"
        );

        let result = LocalSearchRunner::run(instance, construction.state, &local, &mut rng)?;
        Ok(result.best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::BaselinePlaceOnBuildings;
    use crate::model::{Building, Demand};
    use crate::score;
    use crate::testing::random_instance;
    use serde_json::json;

    #[test]
    fn test_valid_and_reproducible() {
        let inst = random_instance(200, 1_500, 31);
        let params = json!({ "iterations": 20 });
        let a = GreedyLocalSearch.solve(&inst, 8, &params).unwrap();
        let b = GreedyLocalSearch.solve(&inst, 8, &params).unwrap();
        assert_eq!(a, b);
        let verdict = score::evaluate(&a, &inst);
        assert!(verdict.valid, "{}", verdict.message);
    }

    #[test]
    fn test_partial_params_keep_defaults() {
        let params: GreedyLsParams = parse_params(&json!({ "merge_distance": 120 })).unwrap();
        assert_eq!(params.merge_distance, 120);
        assert_eq!(params.iterations, 50);
        assert_eq!(params.sample_size, 20);
        assert_eq!(params.remove_attempts, 10);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let inst = random_instance(5, 100, 1);
        for params in [json!({ "sample_size": 0 }), json!({ "remove_attempts": 0 }), json!({ "merge_distance": -5 })] {
            assert!(matches!(
                GreedyLocalSearch.solve(&inst, 0, &params),
                Err(AntennaError::InvalidParams(_))
            ));
        }
    }

    #[test]
    fn test_single_building() {
        let inst = Instance::from_buildings(vec![Building::new(4, 7, 9, Demand::new(150, 90, 20))]).unwrap();
        let record = GreedyLocalSearch.solve(&inst, 0, &Value::Null).unwrap();
        assert_eq!(record.antennas.len(), 1);
        assert_eq!(score::evaluate(&record, &inst).cost, 5_000);
        let baseline = BaselinePlaceOnBuildings.solve(&inst, 0, &Value::Null).unwrap();
        assert_eq!(score::evaluate(&baseline, &inst).cost, 5_000);
    }
}
