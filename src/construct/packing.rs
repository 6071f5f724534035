//! Greedy capacity packing.

use crate::instance::Instance;
use crate::model::Load;

/// Buildings accepted by a packing pass and their combined load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Packing {
    pub buildings: Vec<usize>,
    pub load: Load,
}

impl Packing {
    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.buildings.contains(&index)
    }
}

/// Walks `candidates` in the given order and keeps each building whose
/// demand still fits under `capacity` in every period.
///
/// A building that does not fit is skipped, not a stopping point: smaller
/// buildings later in the order may still fill the remaining slack.
pub fn pack<I>(candidates: I, instance: &Instance, capacity: u64) -> Packing
where
    I: IntoIterator<Item = usize>,
{
    let mut packing = Packing::default();
    for index in candidates {
        let next = packing.load.with(&instance.building(index).demand);
        if next.fits(capacity) {
            packing.buildings.push(index);
            packing.load = next;
        }
    }
    packing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Building, Demand};

    #[test]
    fn test_pack_skips_and_continues() {
        let inst = Instance::from_buildings(vec![
            Building::new(1, 0, 0, Demand::new(150, 0, 0)),
            Building::new(2, 0, 0, Demand::new(100, 0, 0)),
            Building::new(3, 0, 0, Demand::new(50, 0, 0)),
        ])
        .unwrap();
        let p = pack([0, 1, 2], &inst, 200);
        assert_eq!(p.buildings, vec![0, 2]);
        assert_eq!(p.load.peak, 200);
        assert!(!p.contains(1));
    }

    #[test]
    fn test_pack_checks_periods_independently() {
        let inst = Instance::from_buildings(vec![
            Building::new(1, 0, 0, Demand::new(200, 0, 0)),
            Building::new(2, 0, 0, Demand::new(0, 200, 0)),
            Building::new(3, 0, 0, Demand::new(0, 0, 201)),
        ])
        .unwrap();
        let p = pack([0, 1, 2], &inst, 200);
        assert_eq!(p.len(), 2);
    }
}
