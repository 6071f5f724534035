//! Deterministic on-site baseline.

use super::placement::{pack_uncovered, place_on_buildings};
use super::{parse_params, Method};
use crate::dataset::SolutionRecord;
use crate::error::AntennaError;
use crate::instance::Instance;
use crate::model::AntennaType;
use serde::Deserialize;
use serde_json::Value;
use std::cmp::Reverse;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct BaselineParams {}

/// Largest buildings first, each uncovered one gets an antenna on its own
/// coordinates. Types are tried smallest capacity first and the first whose
/// packing includes the building is kept. The seed is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselinePlaceOnBuildings;

impl Method for BaselinePlaceOnBuildings {
    fn name(&self) -> &'static str {
        "baseline_place_on_buildings"
    }

    fn description(&self) -> &'static str {
        "one antenna per uncovered building, smallest sufficient type, on site"
    }

    fn solve(&self, instance: &Instance, _seed: u64, params: &Value) -> Result<SolutionRecord, AntennaError> {
        let BaselineParams {} = parse_params(params)?;

        let mut order: Vec<usize> = (0..instance.len()).collect();
        order.sort_by_key(|&b| (Reverse(instance.building(b).max_demand()), b));

        let state = place_on_buildings(instance, order, |b, covered| {
            let position = instance.building(b).position;
            AntennaType::BY_CAPACITY.into_iter().find_map(|kind| {
                let packing = pack_uncovered(instance, position, kind.range(), kind, covered, |i| {
                    instance.building(i).max_demand() as f64
                });
                packing.contains(b).then_some((kind, packing))
            })
        });
        Ok(state.to_record(instance))
    }
}
