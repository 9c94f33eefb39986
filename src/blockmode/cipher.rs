use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256, Block};

use crate::blockmode::block::BlockCipher;
use crate::blockmode::error::Result;
use crate::blockmode::key::{Key, KeySize};

#[derive(Clone)]
enum Schedule {
    A128(Aes128),
    A192(Aes192),
    A256(Aes256),
}

/// AES-128, AES-192 or AES-256 as a [BlockCipher], picked by the size of the [Key].
/// The key schedule is computed once on construction and stored in the instance.
#[derive(Clone)]
pub struct Aes {
    schedule: Schedule,
}

impl Aes {
    /// AES block size in bytes.
    pub const BLOCK_SIZE: usize = 16;

    /// Expands the provided key and stores the schedule in the returned instance.
    pub fn new(key: &Key) -> Self {
        let bytes = key.as_bytes();
        // Key guarantees bytes.len() matches its size
        let schedule = match key.size() {
            KeySize::Bits128 => Schedule::A128(Aes128::new(GenericArray::from_slice(bytes))),
            KeySize::Bits192 => Schedule::A192(Aes192::new(GenericArray::from_slice(bytes))),
            KeySize::Bits256 => Schedule::A256(Aes256::new(GenericArray::from_slice(bytes))),
        };
        Self { schedule }
    }

    /// Builds a cipher straight from key bytes. Fails with
    /// [InvalidKeyLength](crate::Error::InvalidKeyLength) unless the slice is 16, 24 or 32 bytes.
    pub fn from_slice(key: &[u8]) -> Result<Self> {
        Ok(Self::new(&Key::try_from_slice(key)?))
    }

    pub fn key_size(&self) -> KeySize {
        match self.schedule {
            Schedule::A128(_) => KeySize::Bits128,
            Schedule::A192(_) => KeySize::Bits192,
            Schedule::A256(_) => KeySize::Bits256,
        }
    }
}

impl std::fmt::Debug for Aes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aes")
            .field("key_size", &self.key_size())
            .finish_non_exhaustive()
    }
}

impl BlockCipher for Aes {
    fn block_size(&self) -> usize {
        Self::BLOCK_SIZE
    }

    fn encrypt_block(&self, dst: &mut [u8], src: &[u8]) {
        let (src, dst) = (Block::from_slice(src), Block::from_mut_slice(dst));
        match &self.schedule {
            Schedule::A128(c) => c.encrypt_block_b2b(src, dst),
            Schedule::A192(c) => c.encrypt_block_b2b(src, dst),
            Schedule::A256(c) => c.encrypt_block_b2b(src, dst),
        }
    }

    fn decrypt_block(&self, dst: &mut [u8], src: &[u8]) {
        let (src, dst) = (Block::from_slice(src), Block::from_mut_slice(dst));
        match &self.schedule {
            Schedule::A128(c) => c.decrypt_block_b2b(src, dst),
            Schedule::A192(c) => c.decrypt_block_b2b(src, dst),
            Schedule::A256(c) => c.decrypt_block_b2b(src, dst),
        }
    }

    fn encrypt_block_inplace(&self, block: &mut [u8]) {
        let block = Block::from_mut_slice(block);
        match &self.schedule {
            Schedule::A128(c) => c.encrypt_block(block),
            Schedule::A192(c) => c.encrypt_block(block),
            Schedule::A256(c) => c.encrypt_block(block),
        }
    }

    fn decrypt_block_inplace(&self, block: &mut [u8]) {
        let block = Block::from_mut_slice(block);
        match &self.schedule {
            Schedule::A128(c) => c.decrypt_block(block),
            Schedule::A192(c) => c.decrypt_block(block),
            Schedule::A256(c) => c.decrypt_block(block),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockmode::error::Error;
    use crate::blockmode::modes::util::test_util::{KEY_128, KEY_192, KEY_256, PLAINTEXT};
    use hex_literal::hex;

    // first-block vectors from NIST SP 800-38A F.1
    fn check_block(key: &[u8], expected: [u8; 16]) -> Result<()> {
        let cipher = Aes::from_slice(key)?;
        let mut actual = [0u8; 16];
        cipher.encrypt_block(&mut actual, &PLAINTEXT[..16]);
        assert_eq!(actual, expected, "incorrect encryption of block");

        let mut decrypted = [0u8; 16];
        cipher.decrypt_block(&mut decrypted, &actual);
        assert_eq!(decrypted, PLAINTEXT[..16], "decrypt block does not reverse encrypt block");
        Ok(())
    }

    #[test]
    fn encrypt_block_128() -> Result<()> {
        check_block(&KEY_128, hex!("3ad77bb40d7a3660a89ecaf32466ef97"))
    }

    #[test]
    fn encrypt_block_192() -> Result<()> {
        check_block(&KEY_192, hex!("bd334f1d6e45f25ff712a214571fa5cc"))
    }

    #[test]
    fn encrypt_block_256() -> Result<()> {
        check_block(&KEY_256, hex!("f3eed1bdb5d2a03c064b5a7e3db181f8"))
    }

    #[test]
    fn inplace_matches_out_of_place() -> Result<()> {
        let cipher = Aes::from_slice(&KEY_256)?;
        let mut expected = [0u8; 16];
        cipher.encrypt_block(&mut expected, &PLAINTEXT[16..32]);

        let mut block = [0u8; 16];
        block.copy_from_slice(&PLAINTEXT[16..32]);
        cipher.encrypt_block_inplace(&mut block);
        assert_eq!(block, expected);

        cipher.decrypt_block_inplace(&mut block);
        assert_eq!(block, PLAINTEXT[16..32]);
        Ok(())
    }

    #[test]
    fn key_size_follows_key() -> Result<()> {
        assert_eq!(Aes::from_slice(&KEY_128)?.key_size(), KeySize::Bits128);
        assert_eq!(Aes::from_slice(&KEY_192)?.key_size(), KeySize::Bits192);
        assert_eq!(Aes::from_slice(&KEY_256)?.key_size(), KeySize::Bits256);
        Ok(())
    }

    #[test]
    fn rejects_bad_key() {
        assert!(matches!(
            Aes::from_slice(&[0u8; 10]),
            Err(Error::InvalidKeyLength { len: 10 })
        ));
    }
}
