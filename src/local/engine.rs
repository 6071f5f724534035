//! Single improvement step with snapshot rollback.

use super::config::LocalSearchConfig;
use super::operators::{Merge, Operator, OptimizeType, Remove};
use crate::instance::Instance;
use crate::state::SolutionState;
use rand::Rng;
use tracing::debug;

/// What one call to [`LocalSearch::step`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub cost_before: u64,
    pub cost_after: u64,
    /// Names of the operators whose result was kept, in application order.
    pub accepted: Vec<&'static str>,
}

impl StepOutcome {
    pub fn improved(&self) -> bool {
        self.cost_after < self.cost_before
    }
}

/// Applies `op` and keeps its result only if the state stays feasible and
/// its cost drops strictly below `best_cost`, which is then lowered.
/// Otherwise the state is restored to what it was before the call.
pub fn try_move<O: Operator, R: Rng>(
    op: &O,
    state: &mut SolutionState,
    instance: &Instance,
    rng: &mut R,
    best_cost: &mut u64,
) -> bool {
    let snapshot = state.clone();
    if !op.apply(state, instance, rng) {
        *state = snapshot;
        return false;
    }
    if let Err(reason) = state.check_feasibility(instance) {
        debug!(operator = op.name(), %reason, "rolling back infeasible move");
        *state = snapshot;
        return false;
    }
    let cost = state.total_cost(instance);
    if cost < *best_cost {
        debug!(operator = op.name(), from = *best_cost, to = cost, "accepted move");
        *best_cost = cost;
        true
    } else {
        *state = snapshot;
        false
    }
}

/// Improvement step: type optimisation, then merge, then removal.
#[derive(Debug, Clone)]
pub struct LocalSearch {
    optimize_type: OptimizeType,
    merge: Merge,
    remove: Remove,
}

impl LocalSearch {
    pub fn new(config: &LocalSearchConfig) -> Self {
        Self {
            optimize_type: OptimizeType,
            merge: Merge::new(config.merge_distance),
            remove: Remove::new(config.remove_attempts),
        }
    }

    /// Runs the three operators once each. The returned state is feasible
    /// whenever the input was, and never costs more.
    pub fn step<R: Rng>(&self, state: &mut SolutionState, instance: &Instance, rng: &mut R) -> StepOutcome {
        let cost_before = state.total_cost(instance);
        let mut best_cost = cost_before;
        let mut accepted = Vec::new();

        if try_move(&self.optimize_type, state, instance, rng, &mut best_cost) {
            accepted.push(self.optimize_type.name());
        }
        if try_move(&self.merge, state, instance, rng, &mut best_cost) {
            accepted.push(self.merge.name());
        }
        if try_move(&self.remove, state, instance, rng, &mut best_cost) {
            accepted.push(self.remove.name());
        }

        StepOutcome {
            cost_before,
            cost_after: best_cost,
            accepted,
        }
    }
}

impl Default for LocalSearch {
    fn default() -> Self {
        Self::new(&LocalSearchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::{GreedyConfig, GreedyConstructor};
    use crate::model::{AntennaType, Building, Demand, Point};
    use crate::random::create_rng;
    use crate::state::Antenna;
    use crate::testing::random_instance;
    use proptest::prelude::*;

    /// Moves the first building of the first antenna onto the last one,
    /// wherever that is.
    struct Steal;

    impl Operator for Steal {
        fn name(&self) -> &'static str {
            "steal"
        }

        fn apply<R: Rng>(&self, state: &mut SolutionState, instance: &Instance, _rng: &mut R) -> bool {
            let ids = state.ids();
            let (Some(&first), Some(&last)) = (ids.first(), ids.last()) else {
                return false;
            };
            let Some(b) = state.get(first).and_then(|a| a.buildings().first().copied()) else {
                return false;
            };
            let Some(donor) = state.remove(first) else {
                return false;
            };
            let rest: Vec<usize> = donor.buildings().iter().copied().filter(|&x| x != b).collect();
            state.insert(Antenna::with_buildings(donor.kind(), donor.position(), rest, instance));
            if let Some(target) = state.get_mut(last) {
                target.assign(b, instance.building(b));
            }
            true
        }
    }

    fn two_far_antennas() -> (Instance, SolutionState) {
        let inst = Instance::from_buildings(vec![
            Building::new(1, 0, 0, Demand::new(10, 10, 10)),
            Building::new(2, 1_000, 0, Demand::new(10, 10, 10)),
        ])
        .unwrap();
        let mut state = SolutionState::new();
        state.insert(Antenna::with_buildings(AntennaType::Nano, Point::new(0, 0), vec![0], &inst));
        state.insert(Antenna::with_buildings(AntennaType::Nano, Point::new(1_000, 0), vec![1], &inst));
        (inst, state)
    }

    #[test]
    fn test_infeasible_move_rolled_back() {
        let (inst, mut state) = two_far_antennas();
        let before = state.clone();
        let mut best = state.total_cost(&inst);

        assert!(!try_move(&Steal, &mut state, &inst, &mut create_rng(0), &mut best));
        assert_eq!(state, before);
        assert_eq!(best, 10_000);
    }

    #[test]
    fn test_step_improves_oversized_antennas() {
        let inst = Instance::from_buildings(vec![
            Building::new(1, 0, 0, Demand::new(10, 10, 10)),
            Building::new(2, 40, 0, Demand::new(10, 10, 10)),
        ])
        .unwrap();
        let mut state = SolutionState::new();
        state.insert(Antenna::with_buildings(AntennaType::MaxRange, Point::new(0, 0), vec![0], &inst));
        state.insert(Antenna::with_buildings(AntennaType::MaxRange, Point::new(40, 0), vec![1], &inst));

        let outcome = LocalSearch::default().step(&mut state, &inst, &mut create_rng(5));
        assert_eq!(outcome.cost_before, 80_000);
        assert!(outcome.improved());
        assert_eq!(outcome.accepted.first(), Some(&"optimize_type"));
        assert_eq!(outcome.cost_after, state.total_cost(&inst));
        assert!(state.is_feasible(&inst));
        // Two Nanos on site, then merged or one removed: a single Nano remains.
        assert_eq!(state.len(), 1);
        assert!(outcome.cost_after <= 6_000);
    }

    #[test]
    fn test_step_on_optimal_state_is_noop() {
        let (inst, mut state) = two_far_antennas();
        let before = state.clone();
        let outcome = LocalSearch::default().step(&mut state, &inst, &mut create_rng(9));
        assert!(!outcome.improved());
        assert!(outcome.accepted.is_empty());
        assert_eq!(state, before);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_step_keeps_feasibility_and_never_regresses(
            n in 1usize..60,
            extent in 50i64..1_500,
            seed in 0u64..500,
        ) {
            let inst = random_instance(n, extent, seed);
            let ctor = GreedyConstructor::new(&inst, GreedyConfig::default()).unwrap();
            let mut rng = create_rng(seed);
            let mut state = ctor.construct(&mut rng).state;
            let engine = LocalSearch::default();

            for _ in 0..3 {
                let before = state.total_cost(&inst);
                let outcome = engine.step(&mut state, &inst, &mut rng);
                prop_assert!(state.is_feasible(&inst));
                prop_assert_eq!(outcome.cost_before, before);
                prop_assert!(outcome.cost_after <= before);
                prop_assert_eq!(outcome.cost_after, state.total_cost(&inst));
            }
        }
    }
}
