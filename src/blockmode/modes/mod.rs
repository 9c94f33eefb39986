mod cbc;
mod ctr;
mod ecb;
pub(crate) mod util;

pub use cbc::{CbcDecrypter, CbcEncrypter};
pub use ctr::CtrStream;
pub use ecb::{
    ecb_decrypt, ecb_decrypt_inplace, ecb_decrypt_into, ecb_encrypt, ecb_encrypt_inplace,
    ecb_encrypt_into,
};
