mod block;

pub use block::{
    camellia,
    BlockCipher,
    BlockDecrypt,
    BlockEncrypt,
    Camellia128,
    Camellia192,
    Camellia256,
};
