//! Descriptive statistics of a solution.

use crate::dataset::SolutionRecord;
use crate::instance::Instance;
use crate::model::{AntennaType, Point};
use serde::Serialize;
use std::collections::BTreeMap;

/// Shape of a solution, independent of its validity.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SolutionStats {
    pub antenna_count: usize,
    pub type_counts: BTreeMap<AntennaType, usize>,
    /// Share of antennas standing on a building, in percent, one decimal.
    pub percent_on_building: f64,
    /// Assigned buildings per antenna, one decimal.
    pub avg_buildings_per_antenna: f64,
}

impl SolutionStats {
    pub fn compute(solution: &SolutionRecord, instance: &Instance) -> Self {
        let antennas = &solution.antennas;
        if antennas.is_empty() {
            return Self::default();
        }
        let count = antennas.len() as f64;

        let mut type_counts = BTreeMap::new();
        for a in antennas {
            *type_counts.entry(a.kind).or_insert(0) += 1;
        }
        let on_building = antennas
            .iter()
            .filter(|a| instance.is_on_building(Point::new(a.x, a.y)))
            .count();
        let assigned: usize = antennas.iter().map(|a| a.buildings.len()).sum();

        Self {
            antenna_count: antennas.len(),
            type_counts,
            percent_on_building: round1(on_building as f64 / count * 100.0),
            avg_buildings_per_antenna: round1(assigned as f64 / count),
        }
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
