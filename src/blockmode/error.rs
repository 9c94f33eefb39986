use rand::rand_core;
use thiserror::Error;

/// Mode engine Result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Mode engine Error type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Attempted to build a cipher with a key that is not 128, 192, or 256 bits.
    #[error("invalid key length: {len} bytes (expected 16, 24, or 32)")]
    InvalidKeyLength { len: usize },

    /// IV was missing, or not exactly one block long. A missing IV is reported with `len: 0`.
    #[error("invalid IV length: {len} bytes (expected {expected})")]
    InvalidIvLength { len: usize, expected: usize },

    /// ECB or CBC input that is not a whole number of blocks.
    #[error("invalid input length: {len} bytes is not a multiple of the {block_size}-byte block size ({context})")]
    InvalidInputLength {
        len: usize,
        block_size: usize,
        context: &'static str,
    },

    /// Destination buffer shorter than the source.
    #[error("output buffer too small: {len} bytes (need {needed})")]
    OutputTooSmall { len: usize, needed: usize },

    /// Framed input that does not match the `IV || ciphertext` layout.
    #[error("invalid ciphertext length: {len} bytes ({context})")]
    InvalidCiphertext { len: usize, context: &'static str },

    /// OS RNG failed during key or IV generation.
    #[error("OS RNG failed in random key or IV generation")]
    Rng(#[from] rand_core::OsError),
}
