//! Cipher block chaining (CBC). Each plaintext block is XORed with the previous ciphertext
//! block (the IV for the first block) before being encrypted.

use rayon::prelude::*;
use tracing::trace;

use crate::blockmode::block::BlockCipher;
use crate::blockmode::error::*;
use crate::blockmode::modes::util::{
    PARALLEL_THRESHOLD, check_aligned, check_iv, check_output, xor_bytes, xor_inplace,
};

/// **Cipher block chaining** encryption.
///
/// Holds the chaining value, which starts as a copy of the IV and afterwards is the last
/// ciphertext block produced. Successive calls continue the chain, so encrypting a message
/// in several block-aligned pieces gives the same ciphertext as encrypting it in one go.
///
/// The IV must never be reused with the same key and should be unpredictable. Only its
/// length is checked here.
pub struct CbcEncrypter<'a, C: BlockCipher + ?Sized> {
    cipher: &'a C,
    iv: Vec<u8>,
    tmp: Vec<u8>,
}

impl<'a, C: BlockCipher + ?Sized> CbcEncrypter<'a, C> {
    /// Fails with [InvalidIvLength](crate::Error::InvalidIvLength) unless `iv` is exactly
    /// one block long.
    pub fn new(cipher: &'a C, iv: &[u8]) -> Result<Self> {
        let bs = cipher.block_size();
        check_iv(iv, bs)?;
        Ok(Self {
            cipher,
            iv: iv.to_vec(),
            tmp: vec![0u8; bs],
        })
    }

    pub fn block_size(&self) -> usize {
        self.iv.len()
    }

    /// Restarts the chain from a new IV.
    pub fn set_iv(&mut self, iv: &[u8]) -> Result<()> {
        check_iv(iv, self.block_size())?;
        self.iv.copy_from_slice(iv);
        Ok(())
    }

    /// Current chaining value: the IV before the first call, then the last ciphertext block.
    pub fn chaining_value(&self) -> &[u8] {
        &self.iv
    }

    pub fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut ciphertext = vec![0u8; plaintext.len()];
        self.encrypt_into(&mut ciphertext, plaintext)?;
        Ok(ciphertext)
    }

    /// Encrypts `src` into `dst[..src.len()]`.
    pub fn encrypt_into(&mut self, dst: &mut [u8], src: &[u8]) -> Result<()> {
        let bs = self.block_size();
        check_aligned(src.len(), bs, "CBC input")?;
        check_output(dst, src.len())?;

        for (out, block) in dst[..src.len()]
            .chunks_exact_mut(bs)
            .zip(src.chunks_exact(bs))
        {
            xor_bytes(&mut self.tmp, block, &self.iv);
            self.cipher.encrypt_block(out, &self.tmp);
            self.iv.copy_from_slice(out);
        }
        Ok(())
    }

    /// Encrypts `data` in place.
    pub fn encrypt_inplace(&mut self, data: &mut [u8]) -> Result<()> {
        let bs = self.block_size();
        check_aligned(data.len(), bs, "CBC input")?;

        for block in data.chunks_exact_mut(bs) {
            xor_inplace(block, &self.iv);
            self.cipher.encrypt_block_inplace(block);
            self.iv.copy_from_slice(block);
        }
        Ok(())
    }
}

/// **Cipher block chaining** decryption.
///
/// The chaining value is the last ciphertext block consumed (not the plaintext produced).
/// Block decryptions only depend on the previous ciphertext block, so large inputs are
/// decrypted in parallel.
pub struct CbcDecrypter<'a, C: BlockCipher + ?Sized> {
    cipher: &'a C,
    iv: Vec<u8>,
}

impl<'a, C: BlockCipher + ?Sized> CbcDecrypter<'a, C> {
    /// Fails with [InvalidIvLength](crate::Error::InvalidIvLength) unless `iv` is exactly
    /// one block long. The IV must match the one used for encryption.
    pub fn new(cipher: &'a C, iv: &[u8]) -> Result<Self> {
        check_iv(iv, cipher.block_size())?;
        Ok(Self {
            cipher,
            iv: iv.to_vec(),
        })
    }

    pub fn block_size(&self) -> usize {
        self.iv.len()
    }

    /// Restarts the chain from a new IV.
    pub fn set_iv(&mut self, iv: &[u8]) -> Result<()> {
        check_iv(iv, self.block_size())?;
        self.iv.copy_from_slice(iv);
        Ok(())
    }

    pub fn chaining_value(&self) -> &[u8] {
        &self.iv
    }

    pub fn decrypt(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let mut plaintext = vec![0u8; ciphertext.len()];
        self.decrypt_into(&mut plaintext, ciphertext)?;
        Ok(plaintext)
    }

    /// Decrypts `src` into `dst[..src.len()]`.
    pub fn decrypt_into(&mut self, dst: &mut [u8], src: &[u8]) -> Result<()> {
        let bs = self.block_size();
        check_aligned(src.len(), bs, "CBC input")?;
        check_output(dst, src.len())?;
        if src.is_empty() {
            return Ok(());
        }
        let dst = &mut dst[..src.len()];

        if src.len() >= PARALLEL_THRESHOLD {
            trace!(len = src.len(), "CBC: decrypting blocks in parallel");
            let iv = &self.iv;
            dst.par_chunks_exact_mut(bs)
                .zip(src.par_chunks_exact(bs))
                .enumerate()
                .for_each(|(i, (out, block))| {
                    self.cipher.decrypt_block(out, block);
                    let prev = if i == 0 {
                        &iv[..]
                    } else {
                        &src[(i - 1) * bs..i * bs]
                    };
                    xor_inplace(out, prev);
                });
        } else {
            for (out, block) in dst.chunks_exact_mut(bs).zip(src.chunks_exact(bs)) {
                self.cipher.decrypt_block(out, block);
                xor_inplace(out, &self.iv);
                self.iv.copy_from_slice(block);
            }
        }

        // save the last ciphertext block as the chaining value for the next call
        self.iv.copy_from_slice(&src[src.len() - bs..]);
        Ok(())
    }

    /// Decrypts `data` in place. Walks the blocks backwards so every block's predecessor
    /// is still ciphertext when it is needed.
    pub fn decrypt_inplace(&mut self, data: &mut [u8]) -> Result<()> {
        let bs = self.block_size();
        check_aligned(data.len(), bs, "CBC input")?;
        if data.is_empty() {
            return Ok(());
        }

        let next_iv = data[data.len() - bs..].to_vec();

        for i in (1..data.len() / bs).rev() {
            let (head, tail) = data.split_at_mut(i * bs);
            let block = &mut tail[..bs];
            self.cipher.decrypt_block_inplace(block);
            xor_inplace(block, &head[(i - 1) * bs..]);
        }

        let first = &mut data[..bs];
        self.cipher.decrypt_block_inplace(first);
        xor_inplace(first, &self.iv);

        self.iv = next_iv;
        Ok(())
    }
}
