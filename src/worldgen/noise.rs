//! Seeded white noise.
//!
//! Every integer coordinate hashes, together with the seed, to an
//! independent value in `[-1, 1)`. No smoothing, no octaves: neighbouring
//! columns are uncorrelated, which is what scattering filler blocks wants.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhiteNoise {
    seed: u64,
}

impl WhiteNoise {
    pub fn new(seed: u64) -> Self {
        WhiteNoise { seed }
    }

    /// Noise value for the column `(x, y)`.
    pub fn noise(&self, x: i32, y: i32) -> f64 {
        let mut hasher = FxHasher::default();
        (self.seed, x, y).hash(&mut hasher);
        let mut rng = fastrand::Rng::with_seed(hasher.finish());
        rng.f64() * 2.0 - 1.0
    }
}
