//! Shared fixtures for unit tests.

use crate::instance::Instance;
use crate::model::{Building, Demand};
use crate::random::create_rng;
use rand::Rng;

/// `n` buildings scattered over `[0, extent)^2` with per-period demands in
/// `[0, 300]`.
pub(crate) fn random_instance(n: usize, extent: i64, seed: u64) -> Instance {
    let mut rng = create_rng(seed);
    let buildings = (0..n)
        .map(|i| {
            Building::new(
                i as u32,
                rng.random_range(0..extent),
                rng.random_range(0..extent),
                Demand::new(
                    rng.random_range(0..=300),
                    rng.random_range(0..=300),
                    rng.random_range(0..=300),
                ),
            )
        })
        .collect();
    Instance::from_buildings(buildings).expect("generated buildings are valid")
}
