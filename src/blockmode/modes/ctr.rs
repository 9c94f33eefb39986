//! Counter mode (CTR). Turns a block cipher into a stream cipher by encrypting an
//! incrementing counter and XORing the result with the input.

use tracing::trace;

use crate::blockmode::block::BlockCipher;
use crate::blockmode::error::*;
use crate::blockmode::modes::util::{check_iv, check_output, increment_be, xor_bytes, xor_inplace};

const STREAM_BUFFER_SIZE: usize = 512;

/// **Counter mode** keystream.
///
/// The IV is the initial counter block. It is treated as one big-endian unsigned integer
/// across the whole block and incremented after each keystream block, wrapping to zero
/// on overflow.
///
/// Any input length is accepted. Unused keystream bytes are kept between calls, so
/// feeding a message in arbitrary chunks gives exactly the same output as one call over
/// the whole message. Encryption and decryption are the same operation.
///
/// The same (key, IV) pair must never be used to encrypt two different messages.
pub struct CtrStream<'a, C: BlockCipher + ?Sized> {
    cipher: &'a C,
    ctr: Vec<u8>,
    out: Vec<u8>,
    out_size: usize,
    out_used: usize,
}

impl<'a, C: BlockCipher + ?Sized> CtrStream<'a, C> {
    /// Fails with [InvalidIvLength](crate::Error::InvalidIvLength) unless `iv` is exactly
    /// one block long.
    pub fn new(cipher: &'a C, iv: &[u8]) -> Result<Self> {
        let bs = cipher.block_size();
        check_iv(iv, bs)?;
        // whole number of blocks, at least two so a refill always makes progress
        let buf_size = STREAM_BUFFER_SIZE.max(2 * bs) / bs * bs;
        Ok(Self {
            cipher,
            ctr: iv.to_vec(),
            out: vec![0u8; buf_size],
            out_size: 0,
            out_used: 0,
        })
    }

    pub fn block_size(&self) -> usize {
        self.ctr.len()
    }

    /// Counter block that will be encrypted next.
    pub fn counter(&self) -> &[u8] {
        &self.ctr
    }

    /// Keystream bytes generated but not yet consumed.
    pub fn buffered(&self) -> usize {
        self.out_size - self.out_used
    }

    pub fn xor_key_stream(&mut self, input: &[u8]) -> Vec<u8> {
        let mut output = vec![0u8; input.len()];
        self.apply(&mut output, input);
        output
    }

    /// XORs `src` with the keystream into `dst[..src.len()]`. The rest of `dst` is left untouched.
    pub fn xor_key_stream_into(&mut self, dst: &mut [u8], src: &[u8]) -> Result<()> {
        check_output(dst, src.len())?;
        self.apply(&mut dst[..src.len()], src);
        Ok(())
    }

    /// XORs `data` with the keystream in place.
    pub fn xor_key_stream_inplace(&mut self, data: &mut [u8]) {
        let mut data = data;
        while !data.is_empty() {
            self.ensure_keystream();
            let n = xor_inplace(data, &self.out[self.out_used..self.out_size]);
            data = &mut data[n..];
            self.out_used += n;
        }
    }

    fn apply(&mut self, dst: &mut [u8], src: &[u8]) {
        let (mut dst, mut src) = (dst, src);
        while !src.is_empty() {
            self.ensure_keystream();
            let n = xor_bytes(dst, src, &self.out[self.out_used..self.out_size]);
            dst = &mut dst[n..];
            src = &src[n..];
            self.out_used += n;
        }
    }

    fn ensure_keystream(&mut self) {
        if self.out_used + self.block_size() > self.out_size {
            self.refill();
        }
    }

    /// Moves unused keystream to the front of the buffer, then appends freshly encrypted
    /// counter blocks until the buffer is full.
    fn refill(&mut self) {
        let bs = self.block_size();
        if self.out_used > 0 {
            self.out.copy_within(self.out_used..self.out_size, 0);
            self.out_size -= self.out_used;
            self.out_used = 0;
        }

        while self.out_size + bs <= self.out.len() {
            let start = self.out_size;
            self.cipher.encrypt_block(&mut self.out[start..start + bs], &self.ctr);
            increment_be(&mut self.ctr);
            self.out_size += bs;
        }
        trace!(buffered = self.out_size, "CTR: keystream refilled");
    }
}
