//! Randomized on-site greedy with optional local search polish.

use super::placement::{pack_uncovered, place_on_buildings};
use super::{parse_params, Method};
use crate::construct::Packing;
use crate::dataset::SolutionRecord;
use crate::error::AntennaError;
use crate::instance::Instance;
use crate::local::{LocalSearchConfig, LocalSearchRunner};
use crate::model::AntennaType;
use crate::random::{self, create_rng};
use rand::Rng;
use serde::Deserialize;
use serde_json::Value;
use std::cmp::Reverse;

/// Order in which buildings receive antennas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ordering {
    /// Largest demand over all periods first.
    #[default]
    Max,
    /// Largest peak-hours demand first.
    Peak,
    /// Uniformly shuffled.
    Random,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RandomizedParams {
    ordering: Ordering,
    /// Scales every type's range when collecting buildings to pack.
    radius_factor: f64,
    /// Local search steps after construction; 0 skips the polish.
    improve_iterations: usize,
}

impl Default for RandomizedParams {
    fn default() -> Self {
        Self {
            ordering: Ordering::Max,
            radius_factor: 1.0,
            improve_iterations: 0,
        }
    }
}

/// Packing priority noise added to each building's demand.
const JITTER: f64 = 10.0;

/// On-site greedy with a configurable visiting order and jittered packing
/// priorities. Every type whose packing includes the building is compared
/// and the one covering the most buildings is kept; a fitting Nano ends the
/// scan early.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomizedGreedy;

impl Method for RandomizedGreedy {
    fn name(&self) -> &'static str {
        "randomized_greedy"
    }

    fn description(&self) -> &'static str {
        "on-site greedy with randomized ordering and jittered packing"
    }

    fn solve(&self, instance: &Instance, seed: u64, params: &Value) -> Result<SolutionRecord, AntennaError> {
        let params: RandomizedParams = parse_params(params)?;
        if !(params.radius_factor > 0.0 && params.radius_factor <= 1.0) {
            return Err(AntennaError::InvalidParams(format!(
                "radius_factor must be in (0, 1], got {}",
                params.radius_factor
            )));
        }
        let mut rng = create_rng(seed);

        let mut order: Vec<usize> = (0..instance.len()).collect();
        match params.ordering {
            Ordering::Max => order.sort_by_key(|&b| (Reverse(instance.building(b).max_demand()), b)),
            Ordering::Peak => order.sort_by_key(|&b| (Reverse(instance.building(b).demand.peak), b)),
            Ordering::Random => random::shuffle(&mut order, &mut rng),
        }

        let state = place_on_buildings(instance, order, |b, covered| {
            let position = instance.building(b).position;
            let mut best: Option<(AntennaType, Packing)> = None;
            for kind in AntennaType::BY_CAPACITY {
                let range = (kind.range() as f64 * params.radius_factor) as i64;
                let packing = pack_uncovered(instance, position, range, kind, covered, |i| {
                    instance.building(i).max_demand() as f64 + rng.random_range(0.0..JITTER)
                });
                if !packing.contains(b) {
                    continue;
                }
                if best.as_ref().map_or(true, |(_, p)| packing.len() > p.len()) {
                    best = Some((kind, packing));
                    if kind == AntennaType::Nano {
                        break;
                    }
                }
            }
            best
        });

        if params.improve_iterations == 0 {
            return Ok(state.to_record(instance));
        }
        let config = LocalSearchConfig::default().with_max_iterations(params.improve_iterations);
        let result = LocalSearchRunner::run(instance, state, &config, &mut rng)?;
        Ok(result.best)
    }
}
