use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::blockmode::error::*;

/// Generates a random IV of `len` bytes from the OS RNG. Returns Error if OsRng fails.
pub fn random_iv(len: usize) -> Result<Vec<u8>> {
    let mut iv = vec![0u8; len];
    OsRng.try_fill_bytes(&mut iv)?;
    Ok(iv)
}
