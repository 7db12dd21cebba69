//! Injectable randomness for voice and music selection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of selection randomness.
///
/// Injected into the selectors so tests can pin choices; production runs
/// instantiate one per pipeline invocation.
pub trait RandomSource: Send {
    /// Uniform index in `[0, len)`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Process-entropy source; fresh state per call.
#[derive(Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Seeded source for reproducible selection.
#[derive(Debug)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}
