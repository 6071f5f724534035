//! Seeded random sources.
//!
//! The solver never touches a global RNG: every stochastic decision draws
//! from a generator created here from a caller-supplied seed.

use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Shuffles a slice in place.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Picks up to `amount` distinct elements of `items` without replacement.
///
/// The returned elements keep the order in which they were drawn.
pub fn sample<T: Copy, R: Rng>(items: &[T], amount: usize, rng: &mut R) -> Vec<T> {
    let amount = amount.min(items.len());
    index::sample(rng, items.len(), amount)
        .into_iter()
        .map(|i| items[i])
        .collect()
}
