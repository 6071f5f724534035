//! The fixed antenna catalogue.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Static specification of one antenna type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AntennaSpec {
    /// Service radius (inclusive).
    pub range: i64,
    /// Per-period capacity. Each of the three demand periods is checked
    /// against this independently.
    pub capacity: u64,
    /// Installation cost when the antenna sits exactly on a building.
    pub cost_on_building: u64,
    /// Installation cost anywhere else.
    pub cost_off_building: u64,
}

/// One of the four antenna types.
///
/// Range/cost order and capacity order disagree: `MaxRange` reaches
/// furthest but holds less than `Density`. Use [`AntennaType::ALL`] when
/// walking types by cost and [`AntennaType::BY_CAPACITY`] when walking
/// them by capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AntennaType {
    Nano,
    Spot,
    Density,
    MaxRange,
}

const NANO: AntennaSpec = AntennaSpec {
    range: 50,
    capacity: 200,
    cost_on_building: 5_000,
    cost_off_building: 6_000,
};

const SPOT: AntennaSpec = AntennaSpec {
    range: 100,
    capacity: 800,
    cost_on_building: 15_000,
    cost_off_building: 20_000,
};

const DENSITY: AntennaSpec = AntennaSpec {
    range: 150,
    capacity: 5_000,
    cost_on_building: 30_000,
    cost_off_building: 50_000,
};

const MAX_RANGE: AntennaSpec = AntennaSpec {
    range: 400,
    capacity: 3_500,
    cost_on_building: 40_000,
    cost_off_building: 50_000,
};

impl AntennaType {
    /// All types, cheapest first (also ascending range).
    pub const ALL: [AntennaType; 4] = [
        AntennaType::Nano,
        AntennaType::Spot,
        AntennaType::Density,
        AntennaType::MaxRange,
    ];

    /// All types, smallest capacity first.
    pub const BY_CAPACITY: [AntennaType; 4] = [
        AntennaType::Nano,
        AntennaType::Spot,
        AntennaType::MaxRange,
        AntennaType::Density,
    ];

    pub const fn spec(self) -> &'static AntennaSpec {
        match self {
            AntennaType::Nano => &NANO,
            AntennaType::Spot => &SPOT,
            AntennaType::Density => &DENSITY,
            AntennaType::MaxRange => &MAX_RANGE,
        }
    }

    pub const fn range(self) -> i64 {
        self.spec().range
    }

    pub const fn capacity(self) -> u64 {
        self.spec().capacity
    }

    /// Installation cost for the given placement tier.
    pub const fn cost(self, on_building: bool) -> u64 {
        if on_building {
            self.spec().cost_on_building
        } else {
            self.spec().cost_off_building
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AntennaType::Nano => "Nano",
            AntennaType::Spot => "Spot",
            AntennaType::Density => "Density",
            AntennaType::MaxRange => "MaxRange",
        }
    }

    /// Cheapest type whose capacity holds `demand`, if any.
    pub fn cheapest_for_demand(demand: u64) -> Option<AntennaType> {
        Self::ALL.into_iter().find(|t| t.capacity() >= demand)
    }

    /// Largest capacity of any type.
    pub fn max_capacity() -> u64 {
        Self::ALL.iter().map(|t| t.capacity()).max().unwrap_or(0)
    }
}

impl fmt::Display for AntennaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
