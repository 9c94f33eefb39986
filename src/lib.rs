//! Modes of operation over a pluggable block cipher: ECB, CBC and CTR.
//!
//! Any type implementing [`BlockCipher`] can be driven by the modes. [`Aes`] provides
//! AES-128, AES-192 and AES-256.

mod blockmode;

pub use blockmode::{
    Aes, BlockCipher, CbcDecrypter, CbcEncrypter, CtrStream, Error, Key, KeySize, Mode,
    ModeDriver, Result, decrypt, ecb_decrypt, ecb_decrypt_inplace, ecb_decrypt_into, ecb_encrypt,
    ecb_encrypt_inplace, ecb_encrypt_into, encrypt, random_iv,
};
