//! Validated, indexed problem instance.
//!
//! An [`Instance`] is built once per dataset and shared read-only by every
//! component of a solve. Buildings are addressed internally by their dense
//! index (position in the dataset); external ids only appear at the
//! record boundary.

use crate::dataset::Dataset;
use crate::error::AntennaError;
use crate::model::{AntennaType, Building, Demand, Point};
use crate::spatial::{SpatialGrid, DEFAULT_CELL_SIZE};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct Instance {
    buildings: Vec<Building>,
    index: HashMap<u32, usize>,
    occupied: HashSet<Point>,
    grid: SpatialGrid,
}

impl Instance {
    /// Builds an instance from a dataset record.
    ///
    /// Rejects duplicate building ids and buildings whose demand no antenna
    /// type can carry on its own.
    pub fn new(dataset: &Dataset) -> Result<Self, AntennaError> {
        let buildings = dataset
            .buildings
            .iter()
            .map(|b| {
                Building::new(
                    b.id,
                    b.x,
                    b.y,
                    Demand::new(
                        b.population_peak_hours,
                        b.population_off_peak_hours,
                        b.population_night,
                    ),
                )
            })
            .collect();
        Self::from_buildings(buildings)
    }

    pub fn from_buildings(buildings: Vec<Building>) -> Result<Self, AntennaError> {
        let max_capacity = AntennaType::max_capacity();
        let mut index = HashMap::with_capacity(buildings.len());
        for (i, b) in buildings.iter().enumerate() {
            if index.insert(b.id, i).is_some() {
                return Err(AntennaError::DuplicateBuilding(b.id));
            }
            if b.max_demand() > max_capacity {
                return Err(AntennaError::DemandExceedsCapacity {
                    id: b.id,
                    demand: b.max_demand(),
                    capacity: max_capacity,
                });
            }
        }
        let occupied = buildings.iter().map(|b| b.position).collect();
        let grid = SpatialGrid::build(
            DEFAULT_CELL_SIZE,
            buildings.iter().enumerate().map(|(i, b)| (i, b.position)),
        );
        Ok(Self {
            buildings,
            index,
            occupied,
            grid,
        })
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn building(&self, index: usize) -> &Building {
        &self.buildings[index]
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// Dense index of the building with the given external id.
    pub fn index_of(&self, id: u32) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Whether some building stands exactly at `p`.
    pub fn is_on_building(&self, p: Point) -> bool {
        self.occupied.contains(&p)
    }

    /// Installation cost of an antenna of type `kind` at `p`.
    pub fn cost_at(&self, kind: AntennaType, p: Point) -> u64 {
        kind.cost(self.is_on_building(p))
    }

    /// Indices of all buildings within `range` of `center`, ascending.
    pub fn within_range(&self, center: Point, range: i64) -> Vec<usize> {
        self.grid
            .query(center, range)
            .into_iter()
            .filter(|&i| center.in_range(self.buildings[i].position, range))
            .collect()
    }
}
