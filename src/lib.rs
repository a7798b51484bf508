//! The Camellia block cipher specified by [RFC
//! 3713](https://www.rfc-editor.org/rfc/rfc3713).
//!
//! The cipher itself lives in the [camellia] module. [Camellia128],
//! [Camellia192], and [Camellia256] are ready-made [block
//! ciphers](BlockCipher) for the three supported key sizes.

#[cfg(test)]
mod test;

mod cipher;
mod key;
mod text;

pub use {
    cipher::{
        camellia,
        BlockCipher,
        BlockDecrypt,
        BlockEncrypt,
        Camellia128,
        Camellia192,
        Camellia256,
    },
    key::Key,
    text::{Ciphertext, Plaintext},
};
