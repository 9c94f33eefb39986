use crate::blockmode::error::{Error, Result};

pub const PARALLEL_THRESHOLD: usize = 4 * 1024; // process in parallel if input size ge 4 KiB

/// dst[i] = a[i] ^ b[i] over the shortest of the three slices. Returns the number of bytes written.
#[inline(always)]
pub(crate) fn xor_bytes(dst: &mut [u8], a: &[u8], b: &[u8]) -> usize {
    let n = dst.len().min(a.len()).min(b.len());
    for ((d, x), y) in dst[..n].iter_mut().zip(&a[..n]).zip(&b[..n]) {
        *d = x ^ y;
    }
    n
}

/// buf[i] ^= other[i] over the shorter slice. Returns the number of bytes written.
#[inline(always)]
pub(crate) fn xor_inplace(buf: &mut [u8], other: &[u8]) -> usize {
    let n = buf.len().min(other.len());
    for (d, x) in buf[..n].iter_mut().zip(&other[..n]) {
        *d ^= x;
    }
    n
}

/// Increments `ctr` as one big-endian unsigned integer, wrapping to zero on overflow.
#[inline(always)]
pub(crate) fn increment_be(ctr: &mut [u8]) {
    for byte in ctr.iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            break;
        }
    }
}

pub(crate) fn check_aligned(len: usize, block_size: usize, context: &'static str) -> Result<()> {
    if len % block_size != 0 {
        return Err(Error::InvalidInputLength {
            len,
            block_size,
            context,
        });
    }
    Ok(())
}

pub(crate) fn check_iv(iv: &[u8], block_size: usize) -> Result<()> {
    if iv.len() != block_size {
        return Err(Error::InvalidIvLength {
            len: iv.len(),
            expected: block_size,
        });
    }
    Ok(())
}

pub(crate) fn check_output(dst: &[u8], needed: usize) -> Result<()> {
    if dst.len() < needed {
        return Err(Error::OutputTooSmall {
            len: dst.len(),
            needed,
        });
    }
    Ok(())
}
