//! Per-set random number source.
//!
//! The treap draws node priorities and the skip list flips promotion coins.
//! Both own their generator so that a set seeded explicitly is fully
//! deterministic, independent of any other set in the process.  Unseeded
//! sets draw their initial state from the operating system.

use rand::{rngs::SmallRng, Rng, SeedableRng};

/// A small, fast generator owned by one set instance.
#[derive(Debug, Clone)]
pub(crate) struct RandomSource {
    rng: SmallRng,
}

impl RandomSource {
    /// Create a generator with nondeterministic initial state.
    pub(crate) fn new() -> Self {
        RandomSource {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Create a generator with a deterministic initial state.  Two sources
    /// built from the same seed produce identical streams.
    pub(crate) fn with_seed(seed: u32) -> Self {
        RandomSource {
            rng: SmallRng::seed_from_u64(u64::from(seed)),
        }
    }

    /// A uniform priority in `[1, u32::MAX]`.
    pub(crate) fn priority(&mut self) -> u32 {
        self.rng.gen_range(1..=u32::MAX)
    }

    /// One promotion coin flip with probability one half.
    pub(crate) fn flip(&mut self) -> bool {
        self.rng.gen::<bool>()
    }
}
