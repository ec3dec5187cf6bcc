//! Operating-system entropy adapter.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::ports::{RandomSource, RandomSourceError};

/// Reads random bytes from the operating system's secure generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandomSource;

impl RandomSource for OsRandomSource {
    fn fill(&self, dest: &mut [u8]) -> Result<(), RandomSourceError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| RandomSourceError::new(e.to_string()))
    }
}
