use rand_core::{RngCore, SeedableRng};
use std::sync::RwLock;

use crate::utilities::error::*;

/// Randomness read straight from the operating system.
#[derive(Default, Debug, Copy, Clone)]
pub struct OsRand;

impl crate::crypto::provider::Rand for OsRand {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        getrandom::getrandom(buf)?;
        Ok(())
    }
}

/// ChaCha20 stream seeded once, from the operating system or an explicit seed.
#[derive(Debug)]
pub struct RandChacha {
    rng: RwLock<rand_chacha::ChaCha20Rng>,
}

impl Default for RandChacha {
    fn default() -> Self {
        Self {
            rng: RwLock::new(rand_chacha::ChaCha20Rng::from_entropy()),
        }
    }
}

impl RandChacha {
    /// Reproducible stream, for tests and known-answer vectors only.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            rng: RwLock::new(rand_chacha::ChaCha20Rng::from_seed(seed)),
        }
    }
}

impl crate::crypto::provider::Rand for RandChacha {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        let mut rng = self
            .rng
            .write()
            .map_err(|err| Error::RandomnessUnavailable(err.to_string()))?;
        rng.try_fill_bytes(buf)?;
        Ok(())
    }
}
