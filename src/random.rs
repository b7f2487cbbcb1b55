use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, random};

const MULTIPLIER_A: i64 = 1103515245;
const INCREMENT_C: i64 = 12345;
const DEFAULT_SEED: i64 = 3819201;

/// Source of randomness for expansion and rollouts.
///
/// The search never touches global randomness; every random choice goes through the
/// generator handed to it, so a seeded generator makes a whole search reproducible.
pub trait RandomGenerator {
    fn next(&mut self) -> i32;

    /// Returns a value in `from..to`. `to` must be greater than `from`.
    fn next_range(&mut self, from: i32, to: i32) -> i32;

    /// Picks one element uniformly, or `None` for an empty slice.
    fn choose<'a, K>(&mut self, items: &'a [K]) -> Option<&'a K> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_range(0, items.len() as i32) as usize)
    }
}

/// Thread-local generator from `rand`. Nondeterministic across runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRandomGenerator;

impl RandomGenerator for StandardRandomGenerator {
    fn next(&mut self) -> i32 {
        random()
    }

    fn next_range(&mut self, from: i32, to: i32) -> i32 {
        rand::rng().random_range(from..to)
    }
}

/// Linear congruential generator with a fixed seed, for reproducible searches.
#[derive(Debug, Clone)]
pub struct CustomNumberGenerator {
    seed: i64,
}

impl Default for CustomNumberGenerator {
    fn default() -> Self {
        CustomNumberGenerator::new(DEFAULT_SEED)
    }
}

impl RandomGenerator for CustomNumberGenerator {
    fn next(&mut self) -> i32 {
        self.seed = (self.seed * MULTIPLIER_A + INCREMENT_C) % (i32::MAX as i64);
        self.seed as i32
    }

    fn next_range(&mut self, from: i32, to: i32) -> i32 {
        (self.next() % (to - from)).abs() + from
    }
}

impl CustomNumberGenerator {
    pub const fn new(seed: i64) -> Self {
        Self { seed }
    }
}

/// `StdRng` seeded from a `u64`.
#[derive(Debug, Clone)]
pub struct SeededRandomGenerator {
    rng: StdRng,
}

impl SeededRandomGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomGenerator for SeededRandomGenerator {
    fn next(&mut self) -> i32 {
        self.rng.random()
    }

    fn next_range(&mut self, from: i32, to: i32) -> i32 {
        self.rng.random_range(from..to)
    }
}
