//! Defines the [`Key`] struct, which holds a valid AES key of 128, 192, or 256 bits.
//! Keys can be randomly generated or constructed from an existing byte slice.

use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::blockmode::error::{Error, Result};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum KeyBytes {
    K128([u8; 16]),
    K192([u8; 24]),
    K256([u8; 32]),
}

/// Supported key sizes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum KeySize {
    Bits128,
    Bits192,
    Bits256,
}

impl KeySize {
    /// Length of a key of this size in bytes.
    pub fn byte_len(self) -> usize {
        match self {
            KeySize::Bits128 => 16,
            KeySize::Bits192 => 24,
            KeySize::Bits256 => 32,
        }
    }
}

/// Contains a valid AES key. Can be instantiated with a random key, or built from a slice
/// of bytes that is 16, 24, or 32 bytes long.
/// A `Key` is required to instantiate an [Aes](crate::Aes) block cipher.
///
/// ## Examples
/// ```
/// # fn main() -> blockmode::Result<()> {
/// use blockmode::{Key, KeySize};
///
/// // Instantiate random keys:
/// let rk_128 = Key::rand_key_128()?;
/// let rk_256 = Key::random(KeySize::Bits256)?;
/// assert_eq!(rk_128.size(), KeySize::Bits128);
/// assert_eq!(rk_256.as_bytes().len(), 32);
///
/// // Instantiate keys from slice:
/// let key_bytes = b"0123456789abcdef0123456789abcdef";
/// let my_key_128 = Key::try_from_slice(&key_bytes[..16])?;
/// let my_key_192 = Key::try_from_slice(&key_bytes[..24])?;
/// assert_eq!(my_key_128.as_bytes(), &key_bytes[..16]);
/// assert_eq!(my_key_192.as_bytes(), &key_bytes[..24]);
///
/// // Attempting to instantiate with an invalid key size returns an InvalidKeyLength error:
/// assert!(Key::try_from_slice(&key_bytes[..20]).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Key {
    bytes: KeyBytes,
}

impl Key {
    /// Generate a random 128-bit key. Returns Error if OsRng fails.
    pub fn rand_key_128() -> Result<Self> {
        let mut k = [0u8; 16];
        OsRng.try_fill_bytes(&mut k)?;
        Ok(Self {
            bytes: KeyBytes::K128(k),
        })
    }

    /// Generate a random 192-bit key. Returns Error if OsRng fails.
    pub fn rand_key_192() -> Result<Self> {
        let mut k = [0u8; 24];
        OsRng.try_fill_bytes(&mut k)?;
        Ok(Self {
            bytes: KeyBytes::K192(k),
        })
    }

    /// Generate a random 256-bit key. Returns Error if OsRng fails.
    pub fn rand_key_256() -> Result<Self> {
        let mut k = [0u8; 32];
        OsRng.try_fill_bytes(&mut k)?;
        Ok(Self {
            bytes: KeyBytes::K256(k),
        })
    }

    /// Generate a random key of the given size.
    pub fn random(size: KeySize) -> Result<Self> {
        match size {
            KeySize::Bits128 => Self::rand_key_128(),
            KeySize::Bits192 => Self::rand_key_192(),
            KeySize::Bits256 => Self::rand_key_256(),
        }
    }

    /// Attempts to build a key from a slice of bytes. Will return an InvalidKeyLength error
    /// if the input slice is anything other than 16, 24, or 32 bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let invalid = || Error::InvalidKeyLength { len: bytes.len() };
        Ok(match bytes.len() {
            16 => Self {
                bytes: KeyBytes::K128(bytes.try_into().map_err(|_| invalid())?),
            },
            24 => Self {
                bytes: KeyBytes::K192(bytes.try_into().map_err(|_| invalid())?),
            },
            32 => Self {
                bytes: KeyBytes::K256(bytes.try_into().map_err(|_| invalid())?),
            },
            _ => return Err(invalid()),
        })
    }

    /// Returns a reference to the internal key as an array of bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.bytes {
            KeyBytes::K128(k) => k,
            KeyBytes::K192(k) => k,
            KeyBytes::K256(k) => k,
        }
    }

    pub fn size(&self) -> KeySize {
        match self.bytes {
            KeyBytes::K128(_) => KeySize::Bits128,
            KeyBytes::K192(_) => KeySize::Bits192,
            KeyBytes::K256(_) => KeySize::Bits256,
        }
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::try_from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unsupported_lengths() {
        for len in [0usize, 1, 15, 17, 20, 31, 33, 64] {
            let bytes = vec![0u8; len];
            match Key::try_from_slice(&bytes) {
                Err(Error::InvalidKeyLength { len: got }) => assert_eq!(got, len),
                other => panic!("expected InvalidKeyLength for {len} bytes, got {other:?}"),
            }
        }
    }

    #[test]
    fn random_keys_have_requested_size() -> Result<()> {
        for size in [KeySize::Bits128, KeySize::Bits192, KeySize::Bits256] {
            let key = Key::random(size)?;
            assert_eq!(key.size(), size);
            assert_eq!(key.as_bytes().len(), size.byte_len());
        }
        Ok(())
    }

    #[test]
    fn two_random_keys_differ() -> Result<()> {
        assert_ne!(Key::rand_key_256()?, Key::rand_key_256()?);
        Ok(())
    }
}
