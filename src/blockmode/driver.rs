use std::fmt;

use tracing::debug;

use crate::blockmode::block::BlockCipher;
use crate::blockmode::cipher::Aes;
use crate::blockmode::error::{Error, Result};
use crate::blockmode::key::Key;
use crate::blockmode::modes::util::{check_aligned, check_iv};
use crate::blockmode::modes::{CbcDecrypter, CbcEncrypter, CtrStream, ecb_decrypt, ecb_encrypt};
use crate::blockmode::util::random_iv;

/// Mode of operation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Mode {
    /// Electronic codebook. No IV, block-aligned input.
    Ecb,
    /// Cipher block chaining. One-block IV, block-aligned input.
    Cbc,
    /// Counter mode. One-block IV, any input length.
    Ctr,
}

impl Mode {
    pub fn requires_iv(self) -> bool {
        !matches!(self, Mode::Ecb)
    }

    pub fn requires_alignment(self) -> bool {
        !matches!(self, Mode::Ctr)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Ecb => "ECB",
            Mode::Cbc => "CBC",
            Mode::Ctr => "CTR",
        })
    }
}

/// Validates lengths and dispatches one-shot operations to [ECB](crate::ecb_encrypt),
/// [CBC](crate::CbcEncrypter) and [CTR](crate::CtrStream).
///
/// Owns a single block cipher. The stateful mode objects it hands out borrow that cipher,
/// so any number of them can run over one key schedule.
///
/// ## Examples
/// ```
/// # fn main() -> blockmode::Result<()> {
/// use blockmode::{Mode, ModeDriver};
///
/// let driver = ModeDriver::new(b"0123456789abcdef")?;
/// let iv = [0u8; 16];
///
/// let ct = driver.encrypt(Mode::Cbc, Some(&iv[..]), b"hello world.....hello world.....")?;
/// let pt = driver.decrypt(Mode::Cbc, Some(&iv[..]), &ct)?;
/// assert_eq!(pt, b"hello world.....hello world.....");
///
/// // CTR accepts any length
/// let ct = driver.encrypt(Mode::Ctr, Some(&iv[..]), b"hello world")?;
/// assert_eq!(ct.len(), 11);
///
/// // CBC input must be block aligned, and an IV is never defaulted
/// assert!(driver.encrypt(Mode::Cbc, Some(&iv[..]), b"hello world").is_err());
/// assert!(driver.encrypt(Mode::Ctr, None, b"hello world").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ModeDriver<C: BlockCipher = Aes> {
    cipher: C,
}

impl ModeDriver<Aes> {
    /// Builds an AES driver from raw key bytes. Fails with
    /// [InvalidKeyLength](crate::Error::InvalidKeyLength) unless the key is 16, 24, or 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self> {
        Ok(Self::with_cipher(Aes::from_slice(key)?))
    }

    pub fn from_key(key: &Key) -> Self {
        Self::with_cipher(Aes::new(key))
    }
}

impl<C: BlockCipher> ModeDriver<C> {
    pub fn with_cipher(cipher: C) -> Self {
        Self { cipher }
    }

    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    pub fn block_size(&self) -> usize {
        self.cipher.block_size()
    }

    /// Encrypts `plaintext` in one pass. Output has the same length as the input.
    pub fn encrypt(&self, mode: Mode, iv: Option<&[u8]>, plaintext: &[u8]) -> Result<Vec<u8>> {
        let iv = self.validate(mode, iv, plaintext.len())?;
        debug!(%mode, len = plaintext.len(), "encrypting");
        match mode {
            Mode::Ecb => ecb_encrypt(&self.cipher, plaintext),
            Mode::Cbc => self.cbc_encrypter(iv)?.encrypt(plaintext),
            Mode::Ctr => Ok(self.ctr_stream(iv)?.xor_key_stream(plaintext)),
        }
    }

    /// Decrypts `ciphertext` in one pass. Output has the same length as the input.
    pub fn decrypt(&self, mode: Mode, iv: Option<&[u8]>, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let iv = self.validate(mode, iv, ciphertext.len())?;
        debug!(%mode, len = ciphertext.len(), "decrypting");
        match mode {
            Mode::Ecb => ecb_decrypt(&self.cipher, ciphertext),
            Mode::Cbc => self.cbc_decrypter(iv)?.decrypt(ciphertext),
            Mode::Ctr => Ok(self.ctr_stream(iv)?.xor_key_stream(ciphertext)),
        }
    }

    pub fn cbc_encrypter(&self, iv: &[u8]) -> Result<CbcEncrypter<'_, C>> {
        CbcEncrypter::new(&self.cipher, iv)
    }

    pub fn cbc_decrypter(&self, iv: &[u8]) -> Result<CbcDecrypter<'_, C>> {
        CbcDecrypter::new(&self.cipher, iv)
    }

    pub fn ctr_stream(&self, iv: &[u8]) -> Result<CtrStream<'_, C>> {
        CtrStream::new(&self.cipher, iv)
    }

    /// Encrypts with a fresh random IV from the OS RNG and prepends it.
    ///
    /// Output is formatted as `IV (block_size bytes) || Ciphertext` for CBC and CTR, and is
    /// the bare ciphertext for ECB.
    pub fn seal(&self, mode: Mode, plaintext: &[u8]) -> Result<Vec<u8>> {
        if !mode.requires_iv() {
            return self.encrypt(mode, None, plaintext);
        }
        let iv = random_iv(self.block_size())?;
        let mut out = iv.clone();
        out.append(&mut self.encrypt(mode, Some(iv.as_slice()), plaintext)?);
        Ok(out)
    }

    /// Reverses [seal](ModeDriver::seal). Assumes `IV || Ciphertext` for CBC and CTR.
    pub fn open(&self, mode: Mode, sealed: &[u8]) -> Result<Vec<u8>> {
        if !mode.requires_iv() {
            return self.decrypt(mode, None, sealed);
        }
        let bs = self.block_size();
        if sealed.len() < bs {
            return Err(Error::InvalidCiphertext {
                len: sealed.len(),
                context: "missing IV prefix",
            });
        }
        let (iv, ciphertext) = sealed.split_at(bs);
        self.decrypt(mode, Some(iv), ciphertext)
    }

    /// Checks every precondition of `mode` before any output is produced. Returns the IV
    /// (empty for ECB).
    fn validate<'i>(&self, mode: Mode, iv: Option<&'i [u8]>, len: usize) -> Result<&'i [u8]> {
        let bs = self.block_size();
        let iv = match (mode.requires_iv(), iv) {
            (true, Some(iv)) => {
                check_iv(iv, bs)?;
                iv
            }
            (true, None) => {
                return Err(Error::InvalidIvLength {
                    len: 0,
                    expected: bs,
                });
            }
            (false, Some(iv)) => {
                return Err(Error::InvalidIvLength {
                    len: iv.len(),
                    expected: 0,
                });
            }
            (false, None) => &[],
        };
        if mode.requires_alignment() {
            check_aligned(len, bs, "block-aligned mode")?;
        }
        Ok(iv)
    }
}

/// One-shot encryption with an AES key. See [ModeDriver::encrypt].
pub fn encrypt(mode: Mode, key: &[u8], iv: Option<&[u8]>, plaintext: &[u8]) -> Result<Vec<u8>> {
    ModeDriver::new(key)?.encrypt(mode, iv, plaintext)
}

/// One-shot decryption with an AES key. See [ModeDriver::decrypt].
pub fn decrypt(mode: Mode, key: &[u8], iv: Option<&[u8]>, ciphertext: &[u8]) -> Result<Vec<u8>> {
    ModeDriver::new(key)?.decrypt(mode, iv, ciphertext)
}
