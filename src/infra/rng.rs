use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::engine::RandomSource;

/// Детерминированный RNG для симуляций, тестов и реплея.
///
/// Каждый стол/раздача получает свой экземпляр с явным seed:
/// общего (глобального) генератора нет, поэтому параллельные столы
/// не влияют друг на друга.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    /// Seed из числа (удобно для тестов и CLI).
    pub fn from_u64(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed из 32 байт (см. [`crate::infra::RngSeed`]).
    pub fn from_seed(bytes: [u8; 32]) -> Self {
        Self {
            inner: StdRng::from_seed(bytes),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    fn below(&mut self, upper: u64) -> u64 {
        if upper == 0 {
            return 0;
        }
        self.inner.gen_range(0..upper)
    }
}
