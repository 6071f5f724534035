//! On-site placement: one antenna per uncovered building, at its position.

use crate::construct::{pack, Packing};
use crate::instance::Instance;
use crate::model::{AntennaType, Point};
use crate::state::{Antenna, SolutionState};
use tracing::warn;

/// Visits buildings in `order` and gives every still-uncovered one an
/// antenna on its own coordinates. `choose` picks the type and packing for
/// that building; `None` falls back to the cheapest type carrying it alone.
pub(crate) fn place_on_buildings<I, F>(instance: &Instance, order: I, mut choose: F) -> SolutionState
where
    I: IntoIterator<Item = usize>,
    F: FnMut(usize, &[bool]) -> Option<(AntennaType, Packing)>,
{
    let mut covered = vec![false; instance.len()];
    let mut state = SolutionState::new();

    for b in order {
        if covered[b] {
            continue;
        }
        let building = instance.building(b);
        let (kind, assigned) = match choose(b, &covered) {
            Some((kind, packing)) => (kind, packing.buildings),
            None => {
                let kind = AntennaType::cheapest_for_demand(building.max_demand())
                    .unwrap_or(AntennaType::MaxRange);
                warn!(building = building.id, %kind, "no packing covers building, placing it alone");
                (kind, vec![b])
            }
        };
        for &i in &assigned {
            covered[i] = true;
        }
        state.insert(Antenna::with_buildings(kind, building.position, assigned, instance));
    }
    state
}

/// Uncovered buildings within `range` of `position`, ordered by `priority`
/// (highest first, ties by index) and packed under `kind`'s capacity.
pub(crate) fn pack_uncovered<F>(
    instance: &Instance,
    position: Point,
    range: i64,
    kind: AntennaType,
    covered: &[bool],
    mut priority: F,
) -> Packing
where
    F: FnMut(usize) -> f64,
{
    let mut candidates: Vec<(usize, f64)> = instance
        .within_range(position, range)
        .into_iter()
        .filter(|&i| !covered[i])
        .map(|i| (i, priority(i)))
        .collect();
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    pack(candidates.into_iter().map(|(i, _)| i), instance, kind.capacity())
}
