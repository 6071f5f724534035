//! Mutable solution state.
//!
//! Antennas live in an arena of slots addressed by [`AntennaId`] handles.
//! Removing an antenna empties its slot without shifting the others, so
//! handles held by an operator stay valid while it edits the state.
//! Rolling back a rejected move is a plain `clone` of the whole arena.

use crate::dataset::{AntennaRecord, SolutionRecord};
use crate::error::AntennaError;
use crate::instance::Instance;
use crate::model::{AntennaType, Building, Load, Point};
use thiserror::Error;

/// Stable handle to an antenna slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AntennaId(usize);

impl AntennaId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A placed antenna and the buildings it serves.
///
/// `load` always equals the period-wise sum of the assigned buildings'
/// demands; every mutator keeps the two in step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Antenna {
    kind: AntennaType,
    position: Point,
    buildings: Vec<usize>,
    load: Load,
}

impl Antenna {
    /// Creates an antenna serving the given building indices.
    pub fn with_buildings(
        kind: AntennaType,
        position: Point,
        buildings: Vec<usize>,
        instance: &Instance,
    ) -> Self {
        let mut load = Load::default();
        for &b in &buildings {
            load.add(&instance.building(b).demand);
        }
        Self {
            kind,
            position,
            buildings,
            load,
        }
    }

    pub fn kind(&self) -> AntennaType {
        self.kind
    }

    pub fn set_kind(&mut self, kind: AntennaType) {
        self.kind = kind;
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Dense indices of the served buildings.
    pub fn buildings(&self) -> &[usize] {
        &self.buildings
    }

    pub fn load(&self) -> Load {
        self.load
    }

    pub fn max_load(&self) -> u64 {
        self.load.max()
    }

    pub fn capacity(&self) -> u64 {
        self.kind.capacity()
    }

    pub fn can_reach(&self, building: &Building) -> bool {
        self.position.in_range(building.position, self.kind.range())
    }

    /// Whether every served building is within range of `kind` from here.
    pub fn reaches_all(&self, kind: AntennaType, instance: &Instance) -> bool {
        self.buildings
            .iter()
            .all(|&b| self.position.in_range(instance.building(b).position, kind.range()))
    }

    pub fn cost(&self, instance: &Instance) -> u64 {
        instance.cost_at(self.kind, self.position)
    }

    /// Adds a building and its demand.
    pub fn assign(&mut self, index: usize, building: &Building) {
        self.buildings.push(index);
        self.load.add(&building.demand);
    }

    pub fn to_record(&self, instance: &Instance) -> AntennaRecord {
        let mut ids: Vec<u32> = self
            .buildings
            .iter()
            .map(|&b| instance.building(b).id)
            .collect();
        ids.sort_unstable();
        AntennaRecord {
            kind: self.kind,
            x: self.position.x,
            y: self.position.y,
            buildings: ids,
        }
    }
}

/// Why a state violates the feasibility invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Infeasibility {
    #[error("building {0} is not served by any antenna")]
    Unassigned(u32),
    #[error("building {0} is served by more than one antenna")]
    DuplicateAssignment(u32),
    #[error("{kind} antenna at ({x}, {y}) carries {load}, above capacity {capacity}")]
    OverCapacity {
        kind: AntennaType,
        x: i64,
        y: i64,
        load: u64,
        capacity: u64,
    },
    #[error("building {building} is out of range of the {kind} antenna at ({x}, {y})")]
    OutOfRange {
        building: u32,
        kind: AntennaType,
        x: i64,
        y: i64,
    },
    #[error("cached load of the antenna at ({x}, {y}) does not match its buildings")]
    LoadMismatch { x: i64, y: i64 },
}

/// Arena of antennas forming a (possibly partial) solution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionState {
    slots: Vec<Option<Antenna>>,
    live: usize,
}

impl SolutionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live antennas.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn insert(&mut self, antenna: Antenna) -> AntennaId {
        self.slots.push(Some(antenna));
        self.live += 1;
        AntennaId(self.slots.len() - 1)
    }

    pub fn remove(&mut self, id: AntennaId) -> Option<Antenna> {
        let taken = self.slots.get_mut(id.0).and_then(Option::take);
        if taken.is_some() {
            self.live -= 1;
        }
        taken
    }

    pub fn get(&self, id: AntennaId) -> Option<&Antenna> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: AntennaId) -> Option<&mut Antenna> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Handles of all live antennas, in arena order.
    pub fn ids(&self) -> Vec<AntennaId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Live antennas with their handles, in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (AntennaId, &Antenna)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|a| (AntennaId(i), a)))
    }

    pub fn antennas(&self) -> impl Iterator<Item = &Antenna> + '_ {
        self.slots.iter().flatten()
    }

    pub fn total_cost(&self, instance: &Instance) -> u64 {
        self.antennas().map(|a| a.cost(instance)).sum()
    }

    /// Checks the partition, capacity and range invariants, plus the
    /// cached-load invariant.
    pub fn check_feasibility(&self, instance: &Instance) -> Result<(), Infeasibility> {
        let mut seen = vec![false; instance.len()];
        for antenna in self.antennas() {
            let mut load = Load::default();
            for &b in antenna.buildings() {
                let building = instance.building(b);
                if std::mem::replace(&mut seen[b], true) {
                    return Err(Infeasibility::DuplicateAssignment(building.id));
                }
                if !antenna.can_reach(building) {
                    return Err(Infeasibility::OutOfRange {
                        building: building.id,
                        kind: antenna.kind(),
                        x: antenna.position().x,
                        y: antenna.position().y,
                    });
                }
                load.add(&building.demand);
            }
            if load != antenna.load() {
                return Err(Infeasibility::LoadMismatch {
                    x: antenna.position().x,
                    y: antenna.position().y,
                });
            }
            if !load.fits(antenna.capacity()) {
                return Err(Infeasibility::OverCapacity {
                    kind: antenna.kind(),
                    x: antenna.position().x,
                    y: antenna.position().y,
                    load: load.max(),
                    capacity: antenna.capacity(),
                });
            }
        }
        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(Infeasibility::Unassigned(instance.building(missing).id));
        }
        Ok(())
    }

    pub fn is_feasible(&self, instance: &Instance) -> bool {
        self.check_feasibility(instance).is_ok()
    }

    /// Exports the state in exchange format. Antennas keep arena order;
    /// building ids are sorted.
    pub fn to_record(&self, instance: &Instance) -> SolutionRecord {
        SolutionRecord {
            antennas: self.antennas().map(|a| a.to_record(instance)).collect(),
        }
    }

    /// Loads a state from an exchange record, recomputing all loads.
    ///
    /// Only unknown building ids are rejected here; feasibility is left to
    /// [`SolutionState::check_feasibility`].
    pub fn from_record(record: &SolutionRecord, instance: &Instance) -> Result<Self, AntennaError> {
        let mut state = Self::new();
        for a in &record.antennas {
            let buildings = a
                .buildings
                .iter()
                .map(|&id| instance.index_of(id).ok_or(AntennaError::UnknownBuilding(id)))
                .collect::<Result<Vec<_>, _>>()?;
            state.insert(Antenna::with_buildings(
                a.kind,
                Point::new(a.x, a.y),
                buildings,
                instance,
            ));
        }
        Ok(state)
    }
}
