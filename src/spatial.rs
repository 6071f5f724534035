//! Uniform-grid spatial index over building positions.
//!
//! Buildings are bucketed by the grid cell containing their coordinates.
//! A radius query walks every cell within a Chebyshev cell distance of
//! `ceil(radius / cell_size) + 1` around the query cell, so the returned
//! candidate set is a superset of the buildings actually within the radius.
//! Callers apply the exact squared-distance filter themselves.

use crate::model::Point;
use std::collections::HashMap;

/// Default cell edge length.
pub const DEFAULT_CELL_SIZE: i64 = 100;

/// Static grid of building indices.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: i64,
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl SpatialGrid {
    /// Creates an empty grid.
    ///
    /// # Panics
    /// Panics if `cell_size` is not positive.
    pub fn new(cell_size: i64) -> Self {
        assert!(cell_size > 0, "cell_size must be positive");
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    /// Builds a grid from `(index, position)` pairs.
    pub fn build<I>(cell_size: i64, points: I) -> Self
    where
        I: IntoIterator<Item = (usize, Point)>,
    {
        let mut grid = Self::new(cell_size);
        for (index, p) in points {
            grid.insert(index, p);
        }
        grid
    }

    fn cell_of(&self, p: Point) -> (i64, i64) {
        (p.x.div_euclid(self.cell_size), p.y.div_euclid(self.cell_size))
    }

    pub fn insert(&mut self, index: usize, p: Point) {
        let cell = self.cell_of(p);
        self.cells.entry(cell).or_default().push(index);
    }

    /// Indices of all buildings that may lie within `radius` of `center`,
    /// in ascending order.
    pub fn query(&self, center: Point, radius: i64) -> Vec<usize> {
        let (cx, cy) = self.cell_of(center);
        let radius = radius.max(0);
        let reach = (radius + self.cell_size - 1) / self.cell_size + 1;

        let mut found = Vec::new();
        for dx in -reach..=reach {
            for dy in -reach..=reach {
                if let Some(bucket) = self.cells.get(&(cx + dx, cy + dy)) {
                    found.extend_from_slice(bucket);
                }
            }
        }
        found.sort_unstable();
        found
    }
}
