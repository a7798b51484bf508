use crate::{Ciphertext, Key, Plaintext};

pub mod camellia;

pub use camellia::{Camellia128, Camellia192, Camellia256};

/// A block cipher encrypts and decrypts data in blocks of fixed size.
///
/// A block cipher is a keyed permutation of single fixed-size blocks; it
/// does not by itself handle data of arbitrary length. Chaining blocks
/// together, padding, and authentication are separate constructions layered
/// on top of the block primitive, and none of them live in this crate.
///
/// This trait ties together the [encryption](BlockEncrypt) and
/// [decryption](BlockDecrypt) halves of ciphers whose block and key types
/// coincide in both directions. The two halves must be inverses: decrypting
/// an encrypted block under the same key returns the original block.
pub trait BlockCipher:
    BlockEncrypt<EncryptionBlock = Self::Block, EncryptionKey = Self::Key>
    + BlockDecrypt<DecryptionBlock = Self::Block, DecryptionKey = Self::Key>
{
    type Block;
    type Key;
}

/// The encryption half of a [block cipher](BlockCipher).
pub trait BlockEncrypt {
    type EncryptionBlock;
    type EncryptionKey;

    /// Encrypt a single block of plaintext.
    fn encrypt(
        &self,
        data: Plaintext<Self::EncryptionBlock>,
        key: Key<Self::EncryptionKey>,
    ) -> Ciphertext<Self::EncryptionBlock>;
}

/// The decryption half of a [block cipher](BlockCipher).
pub trait BlockDecrypt {
    type DecryptionBlock;
    type DecryptionKey;

    /// Decrypt a single block of ciphertext.
    fn decrypt(
        &self,
        data: Ciphertext<Self::DecryptionBlock>,
        key: Key<Self::DecryptionKey>,
    ) -> Plaintext<Self::DecryptionBlock>;
}
