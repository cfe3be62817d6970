//! RngSeed – 32-байтовый seed с детерминированным выводом дочерних seed'ов.
//!
//! ```text
//! child = SHA-256(domain || parent || table_id || stream || index)
//! ```
//!
//! Так один базовый seed симуляции даёт независимые потоки для каждого стола
//! (колода, решения ботов), и результат не зависит от порядка выполнения столов.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::infra::rng::DeterministicRng;

const DOMAIN: &[u8] = b"HOLDEM_ENGINE_RNG_V1";

/// 32-байтовый seed для RNG.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Seed из u64 (первые 8 байт, little-endian).
    pub fn from_u64(x: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes }
    }

    /// Дочерний seed для (стол, поток, индекс).
    pub fn derive(&self, table_id: u64, stream: u64, index: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(DOMAIN);
        hasher.update(self.bytes);
        hasher.update(table_id.to_le_bytes());
        hasher.update(stream.to_le_bytes());
        hasher.update(index.to_le_bytes());

        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());
        Self { bytes }
    }

    pub fn to_rng(&self) -> DeterministicRng {
        DeterministicRng::from_seed(self.bytes)
    }
}
