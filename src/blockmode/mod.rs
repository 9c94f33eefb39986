mod block;
mod cipher;
mod driver;
mod error;
mod key;
mod modes;
mod util;

pub use block::BlockCipher;
pub use cipher::Aes;
pub use driver::{Mode, ModeDriver, decrypt, encrypt};
pub use error::{Error, Result};
pub use key::{Key, KeySize};
pub use modes::{
    CbcDecrypter, CbcEncrypter, CtrStream, ecb_decrypt, ecb_decrypt_inplace, ecb_decrypt_into,
    ecb_encrypt, ecb_encrypt_inplace, ecb_encrypt_into,
};
pub use util::random_iv;
