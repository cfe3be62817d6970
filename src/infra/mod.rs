//! Инфраструктура вокруг движка: реализации RNG и seed'ы.

pub mod rng;
pub mod rng_seed;

pub use rng::DeterministicRng;
pub use rng_seed::RngSeed;
