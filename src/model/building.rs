//! Buildings and per-period demand accounting.

use super::geometry::Point;

/// Demand of one building in each of the three periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Demand {
    pub peak: u32,
    pub off_peak: u32,
    pub night: u32,
}

impl Demand {
    pub const fn new(peak: u32, off_peak: u32, night: u32) -> Self {
        Self {
            peak,
            off_peak,
            night,
        }
    }

    /// Largest of the three period demands.
    pub fn max(&self) -> u64 {
        self.peak.max(self.off_peak).max(self.night) as u64
    }
}

/// Aggregated load of an antenna in each period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Load {
    pub peak: u64,
    pub off_peak: u64,
    pub night: u64,
}

impl Load {
    pub fn max(&self) -> u64 {
        self.peak.max(self.off_peak).max(self.night)
    }

    pub fn add(&mut self, demand: &Demand) {
        self.peak += demand.peak as u64;
        self.off_peak += demand.off_peak as u64;
        self.night += demand.night as u64;
    }

    /// The load after adding `demand`, leaving `self` untouched.
    pub fn with(&self, demand: &Demand) -> Load {
        let mut next = *self;
        next.add(demand);
        next
    }

    /// Period-wise sum of two loads.
    pub fn combined(&self, other: &Load) -> Load {
        Load {
            peak: self.peak + other.peak,
            off_peak: self.off_peak + other.off_peak,
            night: self.night + other.night,
        }
    }

    pub fn fits(&self, capacity: u64) -> bool {
        self.max() <= capacity
    }
}

/// An immutable building record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Building {
    pub id: u32,
    pub position: Point,
    pub demand: Demand,
}

impl Building {
    pub fn new(id: u32, x: i64, y: i64, demand: Demand) -> Self {
        Self {
            id,
            position: Point::new(x, y),
            demand,
        }
    }

    pub fn max_demand(&self) -> u64 {
        self.demand.max()
    }
}
