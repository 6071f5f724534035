//! Greedy construction rounds.
//!
//! # Algorithm
//!
//! 1. Mark every building uncovered
//! 2. Each round:
//!    a. Sample up to `sample_size` uncovered buildings and try every
//!    antenna type on each of them
//!    b. With at least `centroid_min_uncovered` buildings left, also try
//!    the centroid of the uncovered set with each centroid type
//!    c. Pack each candidate: uncovered buildings in range, largest
//!    demand first, kept while every period stays under capacity
//!    d. Commit the candidate with the most buildings per unit cost
//! 3. Stop when nothing is left uncovered

use super::config::GreedyConfig;
use super::packing::{pack, Packing};
use crate::error::AntennaError;
use crate::instance::Instance;
use crate::model::{centroid, AntennaType, Point};
use crate::random;
use crate::state::{Antenna, SolutionState};
use rand::Rng;
use std::cmp::Reverse;
use tracing::{debug, warn};

/// Result of a construction run.
#[derive(Debug, Clone)]
pub struct Construction {
    /// The feasible initial solution.
    pub state: SolutionState,
    /// Number of greedy rounds executed.
    pub rounds: usize,
    /// Antennas placed by the one-per-building fallback.
    pub fallback_placements: usize,
}

#[derive(Debug)]
struct Candidate {
    kind: AntennaType,
    position: Point,
    packing: Packing,
    score: f64,
}

/// Greedy weighted set-cover constructor.
pub struct GreedyConstructor<'a> {
    instance: &'a Instance,
    config: GreedyConfig,
}

impl<'a> GreedyConstructor<'a> {
    pub fn new(instance: &'a Instance, config: GreedyConfig) -> Result<Self, AntennaError> {
        config.validate().map_err(AntennaError::InvalidConfig)?;
        Ok(Self { instance, config })
    }

    /// Builds a solution covering every building of the instance.
    pub fn construct<R: Rng>(&self, rng: &mut R) -> Construction {
        let instance = self.instance;
        let mut is_uncovered = vec![true; instance.len()];
        let mut uncovered: Vec<usize> = (0..instance.len()).collect();
        let mut state = SolutionState::new();
        let mut rounds = 0;
        let mut fallback_placements = 0;

        while !uncovered.is_empty() {
            rounds += 1;
            let Some(best) = self.best_candidate(&uncovered, &is_uncovered, rng) else {
                warn!(
                    remaining = uncovered.len(),
                    "no candidate covers an uncovered building, placing one antenna per building"
                );
                for &b in &uncovered {
                    let building = instance.building(b);
                    let kind = AntennaType::cheapest_for_demand(building.max_demand())
                        .unwrap_or(AntennaType::MaxRange);
                    state.insert(Antenna::with_buildings(kind, building.position, vec![b], instance));
                    fallback_placements += 1;
                }
                break;
            };

            debug!(
                round = rounds,
                kind = %best.kind,
                x = best.position.x,
                y = best.position.y,
                covered = best.packing.len(),
                "placing antenna"
            );
            for &b in &best.packing.buildings {
                is_uncovered[b] = false;
            }
            uncovered.retain(|&b| is_uncovered[b]);
            state.insert(Antenna::with_buildings(
                best.kind,
                best.position,
                best.packing.buildings,
                instance,
            ));
        }

        Construction {
            state,
            rounds,
            fallback_placements,
        }
    }

    fn best_candidate<R: Rng>(
        &self,
        uncovered: &[usize],
        is_uncovered: &[bool],
        rng: &mut R,
    ) -> Option<Candidate> {
        let mut best = None;

        for b in random::sample(uncovered, self.config.sample_size, rng) {
            let position = self.instance.building(b).position;
            for kind in AntennaType::ALL {
                self.offer(&mut best, kind, position, is_uncovered);
            }
        }

        if uncovered.len() >= self.config.centroid_min_uncovered {
            let center = centroid(uncovered.iter().map(|&b| self.instance.building(b).position));
            if let Some(position) = center {
                for &kind in &self.config.centroid_types {
                    self.offer(&mut best, kind, position, is_uncovered);
                }
            }
        }

        best
    }

    /// Replaces `best` with the candidate at `(kind, position)` if it scores
    /// strictly higher. Earlier candidates win ties.
    fn offer(
        &self,
        best: &mut Option<Candidate>,
        kind: AntennaType,
        position: Point,
        is_uncovered: &[bool],
    ) {
        let packing = self.coverable(kind, position, is_uncovered);
        if packing.is_empty() {
            return;
        }
        let score = packing.len() as f64 / self.instance.cost_at(kind, position) as f64;
        if best.as_ref().map_or(true, |b| score > b.score) {
            *best = Some(Candidate {
                kind,
                position,
                packing,
                score,
            });
        }
    }

    /// Uncovered buildings an antenna at `position` would take on, packed
    /// largest demand first.
    fn coverable(&self, kind: AntennaType, position: Point, is_uncovered: &[bool]) -> Packing {
        let mut reachable: Vec<usize> = self
            .instance
            .within_range(position, kind.range())
            .into_iter()
            .filter(|&b| is_uncovered[b])
            .collect();
        reachable.sort_by_key(|&b| (Reverse(self.instance.building(b).max_demand()), b));
        pack(reachable, self.instance, kind.capacity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Building, Demand};
    use crate::random::create_rng;
    use crate::score;
    use crate::testing::random_instance;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn construct(instance: &Instance, seed: u64) -> Construction {
        let ctor = GreedyConstructor::new(instance, GreedyConfig::default()).unwrap();
        ctor.construct(&mut create_rng(seed))
    }

    #[test]
    fn test_single_building_gets_nano_on_site() {
        let inst = Instance::from_buildings(vec![Building::new(0, 120, 80, Demand::new(10, 10, 10))]).unwrap();
        let result = construct(&inst, 42);
        let record = result.state.to_record(&inst);
        assert_eq!(record.antennas.len(), 1);
        let a = &record.antennas[0];
        assert_eq!(a.kind, AntennaType::Nano);
        assert_eq!((a.x, a.y), (120, 80));
        assert_eq!(a.buildings, vec![0]);
        assert_eq!(result.state.total_cost(&inst), 5_000);
        assert_eq!(result.rounds, 1);
    }

    #[test]
    fn test_far_apart_buildings_get_separate_antennas() {
        let inst = Instance::from_buildings(vec![
            Building::new(0, 0, 0, Demand::new(100, 100, 100)),
            Building::new(1, 500, 0, Demand::new(100, 100, 100)),
        ])
        .unwrap();
        let result = construct(&inst, 7);
        let record = result.state.to_record(&inst);
        assert_eq!(record.antennas.len(), 2);
        assert!(record.antennas.iter().all(|a| a.kind == AntennaType::Nano));
        assert_eq!(result.state.total_cost(&inst), 10_000);
    }

    #[test]
    fn test_close_buildings_share_one_nano() {
        let inst = Instance::from_buildings(vec![
            Building::new(0, 0, 0, Demand::new(50, 50, 50)),
            Building::new(1, 30, 0, Demand::new(60, 60, 60)),
        ])
        .unwrap();
        let result = construct(&inst, 3);
        let record = result.state.to_record(&inst);
        assert_eq!(record.antennas.len(), 1);
        assert_eq!(record.antennas[0].kind, AntennaType::Nano);
        assert_eq!(record.antennas[0].buildings, vec![0, 1]);
        let cost = result.state.total_cost(&inst);
        assert!(cost == 5_000 || cost == 6_000);
    }

    #[test]
    fn test_high_demand_building_gets_density() {
        let inst = Instance::from_buildings(vec![Building::new(0, 0, 0, Demand::new(4_000, 10, 10))]).unwrap();
        let result = construct(&inst, 1);
        let record = result.state.to_record(&inst);
        assert_eq!(record.antennas[0].kind, AntennaType::Density);
    }

    #[test]
    fn test_buildings_at_coordinate_extremes() {
        let inst = Instance::from_buildings(vec![
            Building::new(0, i64::MAX, i64::MAX, Demand::new(10, 10, 10)),
            Building::new(1, i64::MIN, i64::MIN, Demand::new(10, 10, 10)),
            Building::new(2, i64::MIN, i64::MAX, Demand::new(10, 10, 10)),
            Building::new(3, i64::MAX, i64::MIN, Demand::new(10, 10, 10)),
            Building::new(4, 0, 0, Demand::new(10, 10, 10)),
        ])
        .unwrap();
        let result = construct(&inst, 5);
        assert!(result.state.is_feasible(&inst));
        assert_eq!(result.state.len(), 5);
        assert_eq!(result.state.total_cost(&inst), 25_000);
    }

    #[test]
    fn test_empty_instance() {
        let inst = Instance::from_buildings(Vec::new()).unwrap();
        let result = construct(&inst, 1);
        assert!(result.state.is_empty());
        assert_eq!(result.rounds, 0);
    }

    #[test]
    fn test_construction_is_deterministic() {
        let inst = random_instance(150, 1_000, 11);
        let a = construct(&inst, 99).state.to_record(&inst);
        let b = construct(&inst, 99).state.to_record(&inst);
        assert_eq!(a, b);
    }

    #[test]
    fn test_bad_config_rejected() {
        let inst = random_instance(5, 100, 1);
        let result = GreedyConstructor::new(&inst, GreedyConfig::default().with_sample_size(0));
        assert!(matches!(result, Err(AntennaError::InvalidConfig(_))));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_construction_is_feasible(n in 1usize..80, extent in 50i64..2_000, seed in 0u64..1_000) {
            let inst = random_instance(n, extent, seed);
            let result = construct(&inst, seed);

            prop_assert!(result.state.check_feasibility(&inst).is_ok());
            prop_assert_eq!(result.fallback_placements, 0);

            let record = result.state.to_record(&inst);
            let mut seen = HashSet::new();
            for a in &record.antennas {
                for &id in &a.buildings {
                    prop_assert!(seen.insert(id));
                }
            }
            prop_assert_eq!(seen.len(), n);

            let scored = score::evaluate(&record, &inst);
            prop_assert!(scored.valid, "{}", scored.message);
            prop_assert_eq!(scored.cost, result.state.total_cost(&inst));
        }
    }
}
