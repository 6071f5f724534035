//! Integer plane geometry.

use serde::{Deserialize, Serialize};

/// A point on the integer grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance, exact for any pair of `i64` points.
    ///
    /// Saturates at `u128::MAX`, which is only reachable when both axes
    /// differ by close to the full `i64` span.
    pub fn distance_sq(self, other: Point) -> u128 {
        let dx = (self.x as i128 - other.x as i128).unsigned_abs();
        let dy = (self.y as i128 - other.y as i128).unsigned_abs();
        (dx * dx).saturating_add(dy * dy)
    }

    /// Whether `other` lies within `range` (inclusive) of this point.
    /// A negative range reaches nothing.
    pub fn in_range(self, other: Point, range: i64) -> bool {
        range >= 0 && self.distance_sq(other) <= square(range)
    }
}

/// `n * n` widened so it never overflows.
pub fn square(n: i64) -> u128 {
    let n = n.unsigned_abs() as u128;
    n * n
}

/// Integer centroid of a set of points, rounded toward negative infinity.
///
/// Returns `None` for an empty set.
pub fn centroid<I>(points: I) -> Option<Point>
where
    I: IntoIterator<Item = Point>,
{
    let (mut sx, mut sy, mut n) = (0i128, 0i128, 0i128);
    for p in points {
        sx += p.x as i128;
        sy += p.y as i128;
        n += 1;
    }
    if n == 0 {
        return None;
    }
    // The floor of a mean of i64 values is itself an i64.
    let x = i64::try_from(sx.div_euclid(n)).ok()?;
    let y = i64::try_from(sy.div_euclid(n)).ok()?;
    Some(Point::new(x, y))
}
