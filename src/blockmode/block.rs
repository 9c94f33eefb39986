//! The [`BlockCipher`] capability every mode of operation is built on.

/// A keyed block cipher that encrypts or decrypts exactly one block at a time.
///
/// Implementations hold an already expanded key and no other mutable state, so a single
/// instance can be shared by reference between any number of mode objects and threads.
///
/// All methods operate on exactly [`block_size`](BlockCipher::block_size) bytes. Passing
/// slices of any other length is a caller bug and implementations may panic. The modes in
/// this crate always slice their buffers to whole blocks before calling in.
pub trait BlockCipher: Send + Sync {
    /// Block size in bytes. Constant for the lifetime of the instance.
    fn block_size(&self) -> usize;

    /// Encrypts the block in `src` into `dst`.
    fn encrypt_block(&self, dst: &mut [u8], src: &[u8]);

    /// Decrypts the block in `src` into `dst`.
    fn decrypt_block(&self, dst: &mut [u8], src: &[u8]);

    /// Encrypts `block` in place.
    fn encrypt_block_inplace(&self, block: &mut [u8]) {
        let src = block.to_vec();
        self.encrypt_block(block, &src);
    }

    /// Decrypts `block` in place.
    fn decrypt_block_inplace(&self, block: &mut [u8]) {
        let src = block.to_vec();
        self.decrypt_block(block, &src);
    }
}

#[cfg(test)]
pub(crate) mod test_block {
    use super::BlockCipher;

    /// Block "cipher" that copies its input unchanged. Makes keystreams and chaining values
    /// directly observable in tests.
    pub struct NoopBlock(pub usize);

    impl BlockCipher for NoopBlock {
        fn block_size(&self) -> usize {
            self.0
        }

        fn encrypt_block(&self, dst: &mut [u8], src: &[u8]) {
            dst.copy_from_slice(src);
        }

        fn decrypt_block(&self, dst: &mut [u8], src: &[u8]) {
            dst.copy_from_slice(src);
        }
    }

    /// Adds a constant to every byte on encryption and subtracts it on decryption.
    pub struct AddBlock {
        pub size: usize,
        pub k: u8,
    }

    impl BlockCipher for AddBlock {
        fn block_size(&self) -> usize {
            self.size
        }

        fn encrypt_block(&self, dst: &mut [u8], src: &[u8]) {
            for (d, s) in dst.iter_mut().zip(src) {
                *d = s.wrapping_add(self.k);
            }
        }

        fn decrypt_block(&self, dst: &mut [u8], src: &[u8]) {
            for (d, s) in dst.iter_mut().zip(src) {
                *d = s.wrapping_sub(self.k);
            }
        }
    }

    #[test]
    fn default_inplace_matches_out_of_place() {
        let c = AddBlock { size: 8, k: 3 };
        let src = [1u8, 2, 3, 4, 5, 6, 7, 255];

        let mut out = [0u8; 8];
        c.encrypt_block(&mut out, &src);

        let mut buf = src;
        c.encrypt_block_inplace(&mut buf);
        assert_eq!(buf, out);

        c.decrypt_block_inplace(&mut buf);
        assert_eq!(buf, src);
    }
}
