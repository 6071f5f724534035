//! Improvement operators.
//!
//! Operators edit the state in place and report whether they changed it.
//! They keep loads and assignments consistent but never judge the result:
//! feasibility and cost acceptance belong to [`try_move`](super::try_move).

use crate::instance::Instance;
use crate::model::{centroid, square, AntennaType};
use crate::random;
use crate::state::{Antenna, AntennaId, SolutionState};
use rand::Rng;
use std::cmp::Reverse;
use tracing::trace;

/// A move applied to a solution state.
pub trait Operator {
    /// Short name used in logs and acceptance counts.
    fn name(&self) -> &'static str;

    /// Applies the move. Returns `false` when nothing changed.
    fn apply<R: Rng>(&self, state: &mut SolutionState, instance: &Instance, rng: &mut R) -> bool;
}

/// Downgrades every antenna to the cheapest type that still carries its
/// load and reaches all of its buildings from the same position.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimizeType;

impl Operator for OptimizeType {
    fn name(&self) -> &'static str {
        "optimize_type"
    }

    fn apply<R: Rng>(&self, state: &mut SolutionState, instance: &Instance, _rng: &mut R) -> bool {
        let mut changed = false;
        for id in state.ids() {
            let Some(antenna) = state.get(id) else {
                continue;
            };
            let current = antenna.cost(instance);
            let cheaper = AntennaType::ALL.into_iter().find(|&kind| {
                instance.cost_at(kind, antenna.position()) < current
                    && antenna.load().fits(kind.capacity())
                    && antenna.reaches_all(kind, instance)
            });
            if let (Some(kind), Some(antenna)) = (cheaper, state.get_mut(id)) {
                trace!(from = %antenna.kind(), to = %kind, "downgrading antenna");
                antenna.set_kind(kind);
                changed = true;
            }
        }
        changed
    }
}

/// Replaces the first pair of nearby antennas that can be served more
/// cheaply by one antenna at the centroid of their buildings.
#[derive(Debug, Clone, Copy)]
pub struct Merge {
    /// Pairs further apart than this are skipped.
    pub max_distance: i64,
}

impl Merge {
    pub fn new(max_distance: i64) -> Self {
        Self { max_distance }
    }

    /// The cheapest type carrying the combined load, placed at the centroid
    /// of both antennas' buildings. Only that type is considered: if it
    /// cannot reach every building from the centroid there is no merge.
    fn combine(a: &Antenna, b: &Antenna, instance: &Instance) -> Option<Antenna> {
        let load = a.load().combined(&b.load());
        let kind = AntennaType::ALL.into_iter().find(|kind| load.fits(kind.capacity()))?;
        let buildings: Vec<usize> = a.buildings().iter().chain(b.buildings()).copied().collect();
        let center = centroid(buildings.iter().map(|&i| instance.building(i).position))?;
        if !buildings
            .iter()
            .all(|&i| center.in_range(instance.building(i).position, kind.range()))
        {
            return None;
        }
        if instance.cost_at(kind, center) >= a.cost(instance) + b.cost(instance) {
            return None;
        }
        Some(Antenna::with_buildings(kind, center, buildings, instance))
    }
}

impl Operator for Merge {
    fn name(&self) -> &'static str {
        "merge"
    }

    fn apply<R: Rng>(&self, state: &mut SolutionState, instance: &Instance, _rng: &mut R) -> bool {
        if state.len() < 2 {
            return false;
        }
        let limit_sq = square(self.max_distance);
        let ids = state.ids();
        for (i, &a_id) in ids.iter().enumerate() {
            for &b_id in &ids[i + 1..] {
                let (Some(a), Some(b)) = (state.get(a_id), state.get(b_id)) else {
                    continue;
                };
                if a.position().distance_sq(b.position()) > limit_sq {
                    continue;
                }
                if let Some(merged) = Self::combine(a, b, instance) {
                    trace!(
                        kind = %merged.kind(),
                        x = merged.position().x,
                        y = merged.position().y,
                        "merging antennas"
                    );
                    state.remove(a_id);
                    state.remove(b_id);
                    state.insert(merged);
                    return true;
                }
            }
        }
        false
    }
}

/// Deletes one antenna after moving each of its buildings to the reachable
/// neighbour with the most spare capacity.
#[derive(Debug, Clone, Copy)]
pub struct Remove {
    /// Randomly chosen antennas tried before giving up.
    pub max_attempts: usize,
}

impl Remove {
    pub fn new(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    /// Target antenna for each building of `victim`, or `None` if some
    /// building has nowhere to go. Buildings are placed largest demand
    /// first against running loads, so later ones see earlier placements.
    fn redistribute(
        state: &SolutionState,
        victim: AntennaId,
        instance: &Instance,
    ) -> Option<Vec<(AntennaId, usize)>> {
        let removed = state.get(victim)?;
        let others: Vec<(AntennaId, &Antenna)> = state.iter().filter(|(id, _)| *id != victim).collect();
        let mut loads: Vec<_> = others.iter().map(|(_, a)| a.load()).collect();

        let mut order = removed.buildings().to_vec();
        order.sort_by_key(|&b| (Reverse(instance.building(b).max_demand()), b));

        let mut plan = Vec::with_capacity(order.len());
        for b in order {
            let building = instance.building(b);
            let mut best: Option<(usize, u64)> = None;
            for (slot, (_, other)) in others.iter().enumerate() {
                if !other.can_reach(building) {
                    continue;
                }
                let next = loads[slot].with(&building.demand);
                if !next.fits(other.capacity()) {
                    continue;
                }
                let margin = other.capacity() - next.max();
                if best.map_or(true, |(_, m)| margin > m) {
                    best = Some((slot, margin));
                }
            }
            let (slot, _) = best?;
            loads[slot] = loads[slot].with(&building.demand);
            plan.push((others[slot].0, b));
        }
        Some(plan)
    }
}

impl Operator for Remove {
    fn name(&self) -> &'static str {
        "remove"
    }

    fn apply<R: Rng>(&self, state: &mut SolutionState, instance: &Instance, rng: &mut R) -> bool {
        if state.len() < 2 {
            return false;
        }
        let mut ids = state.ids();
        random::shuffle(&mut ids, rng);

        for &victim in ids.iter().take(self.max_attempts) {
            let Some(plan) = Self::redistribute(state, victim, instance) else {
                continue;
            };
            trace!(antenna = victim.index(), moved = plan.len(), "removing antenna");
            state.remove(victim);
            for (target, b) in plan {
                if let Some(antenna) = state.get_mut(target) {
                    antenna.assign(b, instance.building(b));
                }
            }
            return true;
        }
        false
    }
}
