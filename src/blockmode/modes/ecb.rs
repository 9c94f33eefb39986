use rayon::prelude::*;
use tracing::trace;

use crate::blockmode::block::BlockCipher;
use crate::blockmode::error::*;
use crate::blockmode::modes::util::{PARALLEL_THRESHOLD, check_aligned, check_output};

#[derive(Copy, Clone)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// **Electronic codebook** encryption. Encrypts each block entirely independently.
///
/// Input must be a whole number of blocks, no padding is applied. Identical plaintext
/// blocks always produce identical ciphertext blocks, so patterns in the plaintext remain
/// visible in the ciphertext.
pub fn ecb_encrypt<C: BlockCipher + ?Sized>(cipher: &C, plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut ciphertext = vec![0u8; plaintext.len()];
    ecb_encrypt_into(cipher, &mut ciphertext, plaintext)?;
    Ok(ciphertext)
}

/// **Electronic codebook** decryption.
pub fn ecb_decrypt<C: BlockCipher + ?Sized>(cipher: &C, ciphertext: &[u8]) -> Result<Vec<u8>> {
    let mut plaintext = vec![0u8; ciphertext.len()];
    ecb_decrypt_into(cipher, &mut plaintext, ciphertext)?;
    Ok(plaintext)
}

/// ECB encryption of `src` into `dst[..src.len()]`. The rest of `dst` is left untouched.
pub fn ecb_encrypt_into<C: BlockCipher + ?Sized>(
    cipher: &C,
    dst: &mut [u8],
    src: &[u8],
) -> Result<()> {
    ecb_core(cipher, dst, src, Direction::Encrypt)
}

/// ECB decryption of `src` into `dst[..src.len()]`.
pub fn ecb_decrypt_into<C: BlockCipher + ?Sized>(
    cipher: &C,
    dst: &mut [u8],
    src: &[u8],
) -> Result<()> {
    ecb_core(cipher, dst, src, Direction::Decrypt)
}

/// ECB encryption overwriting `data`.
pub fn ecb_encrypt_inplace<C: BlockCipher + ?Sized>(cipher: &C, data: &mut [u8]) -> Result<()> {
    let bs = cipher.block_size();
    check_aligned(data.len(), bs, "ECB input")?;
    data.chunks_exact_mut(bs)
        .for_each(|block| cipher.encrypt_block_inplace(block));
    Ok(())
}

/// ECB decryption overwriting `data`.
pub fn ecb_decrypt_inplace<C: BlockCipher + ?Sized>(cipher: &C, data: &mut [u8]) -> Result<()> {
    let bs = cipher.block_size();
    check_aligned(data.len(), bs, "ECB input")?;
    data.chunks_exact_mut(bs)
        .for_each(|block| cipher.decrypt_block_inplace(block));
    Ok(())
}

fn ecb_core<C: BlockCipher + ?Sized>(
    cipher: &C,
    dst: &mut [u8],
    src: &[u8],
    direction: Direction,
) -> Result<()> {
    let bs = cipher.block_size();
    check_aligned(src.len(), bs, "ECB input")?;
    check_output(dst, src.len())?;
    let dst = &mut dst[..src.len()];

    let apply = |out: &mut [u8], block: &[u8]| match direction {
        Direction::Encrypt => cipher.encrypt_block(out, block),
        Direction::Decrypt => cipher.decrypt_block(out, block),
    };

    if src.len() >= PARALLEL_THRESHOLD {
        trace!(len = src.len(), "ECB: processing blocks in parallel");
        dst.par_chunks_exact_mut(bs)
            .zip(src.par_chunks_exact(bs))
            .for_each(|(out, block)| apply(out, block));
    } else {
        dst.chunks_exact_mut(bs)
            .zip(src.chunks_exact(bs))
            .for_each(|(out, block)| apply(out, block));
    }

    Ok(())
}
