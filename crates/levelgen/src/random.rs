//! Small helpers over the generation RNG stream.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform value in `[0, 1)` built from the top 53 bits of one draw.
pub fn unit_f64(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
}

/// Uniform index in `0..upper`. Panics if `upper` is zero.
pub fn index_below(rng: &mut ChaCha8Rng, upper: usize) -> usize {
    assert!(upper > 0, "index_below needs a non-empty range");
    (rng.next_u64() % upper as u64) as usize
}

/// Fisher-Yates shuffle.
pub fn shuffle<T>(rng: &mut ChaCha8Rng, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = index_below(rng, i + 1);
        items.swap(i, j);
    }
}
