//! Camellia is a block cipher specified by [RFC
//! 3713](https://www.rfc-editor.org/rfc/rfc3713).
//!
//! Camellia works on 128-bit blocks and supports key sizes of 128, 192, and
//! 256 bits. It is a Feistel network: the block is split into two 64-bit
//! halves, and each round XORs one half with the output of the nonlinear
//! [round function](f) applied to the other half under a 64-bit subkey.
//! 128-bit keys take 18 rounds, 192- and 256-bit keys take 24. After every
//! six rounds except the last, the key-dependent linear layers [FL](fl) and
//! [FLINV](flinv) break up the otherwise uniform Feistel structure, and the
//! whole block is XORed with whitening subkeys before the first round and
//! after the last one.
//!
//! Every subkey comes from the [key schedule](schedule), which expands the
//! user key into a [SubkeyTable]. A single [transform] pipeline serves both
//! directions: decryption runs the same rounds with the subkeys reordered,
//! so a table is [swap]ped between its encryption and decryption orderings
//! in place rather than re-derived from the user key. [Camellia128],
//! [Camellia192], and [Camellia256] wrap this machinery in the block cipher
//! traits.
//!
//! The [round function](f) indexes fixed tables by key-dependent values, so
//! its timing can leak through the data cache. This implementation follows
//! the reference formulation and makes no attempt to be constant-time.

use {
    crate::{BlockCipher, BlockDecrypt, BlockEncrypt, Ciphertext, Key, Plaintext},
    docext::docext,
    std::fmt,
};

mod tables;

pub use tables::{
    SBOX1,
    SBOX2,
    SBOX3,
    SBOX4,
    SIGMA1,
    SIGMA2,
    SIGMA3,
    SIGMA4,
    SIGMA5,
    SIGMA6,
};

/// Camellia block size in bytes.
pub const BLOCK_BYTES: usize = 16;

/// A single cipher block.
pub type Block = [u8; BLOCK_BYTES];

const KEY128_BYTES: usize = 16;
const KEY192_BYTES: usize = 24;
const KEY256_BYTES: usize = 32;

/// The key size and direction a [SubkeyTable] is ordered for.
///
/// The size picks the 18-round (128-bit key) or 24-round (192- and 256-bit
/// key) pipeline, and the direction records whether the table currently
/// encrypts or decrypts. `Unknown` is the state of a
/// [default](SubkeyTable::default) table that has never been through the
/// [key schedule](schedule); every operation rejects it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    #[default]
    Unknown,
    Camellia128Encrypt,
    Camellia128Decrypt,
    Camellia192Encrypt,
    Camellia192Decrypt,
    Camellia256Encrypt,
    Camellia256Decrypt,
}

impl KeyKind {
    /// The same key size with the opposite direction.
    pub fn swapped(self) -> Result<Self, UnsupportedKind> {
        match self {
            Self::Camellia128Encrypt => Ok(Self::Camellia128Decrypt),
            Self::Camellia128Decrypt => Ok(Self::Camellia128Encrypt),
            Self::Camellia192Encrypt => Ok(Self::Camellia192Decrypt),
            Self::Camellia192Decrypt => Ok(Self::Camellia192Encrypt),
            Self::Camellia256Encrypt => Ok(Self::Camellia256Decrypt),
            Self::Camellia256Decrypt => Ok(Self::Camellia256Encrypt),
            Self::Unknown => Err(UnsupportedKind),
        }
    }

    /// The number of Feistel rounds for this key size. The round count also
    /// bounds the live `k` and `ke` slots of the table, so every loop over
    /// subkeys derives its range from it.
    fn rounds(self) -> Result<usize, UnsupportedKind> {
        match self {
            Self::Camellia128Encrypt | Self::Camellia128Decrypt => Ok(18),
            Self::Camellia192Encrypt
            | Self::Camellia192Decrypt
            | Self::Camellia256Encrypt
            | Self::Camellia256Decrypt => Ok(24),
            Self::Unknown => Err(UnsupportedKind),
        }
    }
}

/// The expanded form of a user key, consumed by [transform].
///
/// A flat record sized for the larger 24-round schedule: four whitening
/// subkeys `kw`, up to twenty-four round subkeys `k`, and up to six subkeys
/// `ke` for the FL layers. An 18-round table leaves the trailing `k` and
/// `ke` slots zero; the round count derived from the [tag](Self::kind)
/// keeps every consumer inside the live slots.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SubkeyTable {
    kind: KeyKind,
    kw: [u64; 4],
    k: [u64; 24],
    ke: [u64; 6],
}

impl SubkeyTable {
    /// The key size and direction this table is ordered for.
    pub fn kind(&self) -> KeyKind {
        self.kind
    }
}

/// A [KeyKind] outside the six supported size and direction combinations
/// was passed to an operation, or a kind other than the three encryption
/// kinds was passed to the [key schedule](schedule).
#[derive(Debug)]
pub struct UnsupportedKind;

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unsupported camellia key kind")
    }
}

/// Expand a user key into the [SubkeyTable] for the requested kind.
///
/// Only the three encryption kinds are accepted; a decryption table is
/// obtained by [swap]ping a scheduled table. `key` holds the key bytes in
/// big-endian order and must be at least 16, 24, or 32 bytes long for the
/// 128-, 192-, and 256-bit kinds respectively. The length is the caller's
/// contract: a shorter slice panics, extra bytes are ignored.
///
/// The key bytes are first widened into the 128-bit values KL and KR. A
/// 192-bit key only provides the upper half of KR, and the schedule fills
/// the lower half with the bitwise complement of the upper. KL and KR are
/// then mixed through the [round function](f) under the
/// [SIGMA1]..[SIGMA6] constants into KA (and KB for the longer keys), and
/// every subkey is one 64-bit half of KL, KR, KA, or KB rotated left by a
/// bit count fixed by RFC 3713.
pub fn schedule(kind: KeyKind, key: &[u8]) -> Result<SubkeyTable, UnsupportedKind> {
    let kr = match kind {
        KeyKind::Camellia128Encrypt => (0, 0),
        KeyKind::Camellia192Encrypt => {
            let hi = load64(key, 16);
            (hi, !hi)
        }
        KeyKind::Camellia256Encrypt => (load64(key, 16), load64(key, 24)),
        _ => return Err(UnsupportedKind),
    };
    let kl = (load64(key, 0), load64(key, 8));

    let mut d1 = kl.0 ^ kr.0;
    let mut d2 = kl.1 ^ kr.1;
    d2 ^= f(d1, SIGMA1);
    d1 ^= f(d2, SIGMA2);
    d1 ^= kl.0;
    d2 ^= kl.1;
    d2 ^= f(d1, SIGMA3);
    d1 ^= f(d2, SIGMA4);
    let ka = (d1, d2);

    let (mut kw, mut k, mut ke) = ([0; 4], [0; 24], [0; 6]);
    if kind == KeyKind::Camellia128Encrypt {
        (kw[0], kw[1]) = rotl128(kl.0, kl.1, 0);
        (k[0], k[1]) = rotl128(ka.0, ka.1, 0);
        (k[2], k[3]) = rotl128(kl.0, kl.1, 15);
        (k[4], k[5]) = rotl128(ka.0, ka.1, 15);
        (ke[0], ke[1]) = rotl128(ka.0, ka.1, 30);
        (k[6], k[7]) = rotl128(kl.0, kl.1, 45);
        (k[8], _) = rotl128(ka.0, ka.1, 45);
        (_, k[9]) = rotl128(kl.0, kl.1, 60);
        (k[10], k[11]) = rotl128(ka.0, ka.1, 60);
        (ke[2], ke[3]) = rotl128(kl.0, kl.1, 77);
        (k[12], k[13]) = rotl128(kl.0, kl.1, 94);
        (k[14], k[15]) = rotl128(ka.0, ka.1, 94);
        (k[16], k[17]) = rotl128(kl.0, kl.1, 111);
        (kw[2], kw[3]) = rotl128(ka.0, ka.1, 111);
    } else {
        d1 = ka.0 ^ kr.0;
        d2 = ka.1 ^ kr.1;
        d2 ^= f(d1, SIGMA5);
        d1 ^= f(d2, SIGMA6);
        let kb = (d1, d2);

        (kw[0], kw[1]) = rotl128(kl.0, kl.1, 0);
        (k[0], k[1]) = rotl128(kb.0, kb.1, 0);
        (k[2], k[3]) = rotl128(kr.0, kr.1, 15);
        (k[4], k[5]) = rotl128(ka.0, ka.1, 15);
        (ke[0], ke[1]) = rotl128(kr.0, kr.1, 30);
        (k[6], k[7]) = rotl128(kb.0, kb.1, 30);
        (k[8], k[9]) = rotl128(kl.0, kl.1, 45);
        (k[10], k[11]) = rotl128(ka.0, ka.1, 45);
        (ke[2], ke[3]) = rotl128(kl.0, kl.1, 60);
        (k[12], k[13]) = rotl128(kr.0, kr.1, 60);
        (k[14], k[15]) = rotl128(kb.0, kb.1, 60);
        (k[16], k[17]) = rotl128(kl.0, kl.1, 77);
        (ke[4], ke[5]) = rotl128(ka.0, ka.1, 77);
        (k[18], k[19]) = rotl128(kr.0, kr.1, 94);
        (k[20], k[21]) = rotl128(ka.0, ka.1, 94);
        (k[22], k[23]) = rotl128(kl.0, kl.1, 111);
        (kw[2], kw[3]) = rotl128(kb.0, kb.1, 111);
    }

    Ok(SubkeyTable { kind, kw, k, ke })
}

/// Reorder a table between its encryption and decryption orderings, in
/// place.
///
/// Decryption runs the same [transform] pipeline with the whitening pairs
/// exchanged and the round and FL subkeys reversed, so the conversion is a
/// permutation of the table rather than a new run of the
/// [key schedule](schedule). The permutation is an involution: swapping
/// twice restores the original table exactly. The table is not touched if
/// its tag is rejected.
pub fn swap(table: &mut SubkeyTable) -> Result<(), UnsupportedKind> {
    let kind = table.kind.swapped()?;
    let rounds = kind.rounds()?;

    table.kw.swap(0, 2);
    table.kw.swap(1, 3);
    for i in 0..rounds / 2 {
        table.k.swap(i, rounds - 1 - i);
    }
    let ke_slots = (rounds / 6 - 1) * 2;
    for i in 0..ke_slots / 2 {
        table.ke.swap(i, ke_slots - 1 - i);
    }
    table.kind = kind;
    Ok(())
}

/// Run a single block through the Feistel pipeline described by `table`.
///
/// The same pipeline encrypts and decrypts; direction is entirely a
/// property of the table's subkey ordering (see [swap]). The block halves
/// are pre-whitened, pushed through 18 or 24 Feistel rounds with the
/// [FL](fl)/[FLINV](flinv) layers between the six-round groups, and
/// post-whitened. The output writes the halves in swapped order, which is
/// what lets the reversed table compute the inverse permutation.
pub fn transform(block: Block, table: &SubkeyTable) -> Result<Block, UnsupportedKind> {
    let rounds = table.kind.rounds()?;

    let data = u128::from_be_bytes(block);
    let mut d1 = (data >> 64) as u64;
    let mut d2 = data as u64;

    d1 ^= table.kw[0];
    d2 ^= table.kw[1];
    for group in 0..rounds / 6 {
        if group > 0 {
            d1 = fl(d1, table.ke[2 * group - 2]);
            d2 = flinv(d2, table.ke[2 * group - 1]);
        }
        for round in (6 * group..6 * group + 6).step_by(2) {
            d2 ^= f(d1, table.k[round]);
            d1 ^= f(d2, table.k[round + 1]);
        }
    }
    d2 ^= table.kw[2];
    d1 ^= table.kw[3];

    Ok((u128::from(d2) << 64 | u128::from(d1)).to_be_bytes())
}

/// The round function, the nonlinear heart of the cipher.
///
/// The 64-bit input is XORed with the subkey, and each of the eight
/// resulting bytes $x_1, \dots, x_8$ (most significant first) is
/// substituted through an S-box: [SBOX1] through [SBOX4] for $x_1..x_4$,
/// then [SBOX2], [SBOX3], [SBOX4], [SBOX1] for $x_5..x_8$. The substituted
/// bytes $t_1, \dots, t_8$ are mixed into the output bytes by a fixed
/// linear map over $GF(2)$:
///
/// $$
/// y_1 = t_1 \oplus t_3 \oplus t_4 \oplus t_6 \oplus t_7 \oplus t_8\\
/// y_2 = t_1 \oplus t_2 \oplus t_4 \oplus t_5 \oplus t_7 \oplus t_8\\
/// y_3 = t_1 \oplus t_2 \oplus t_3 \oplus t_5 \oplus t_6 \oplus t_8\\
/// y_4 = t_2 \oplus t_3 \oplus t_4 \oplus t_5 \oplus t_6 \oplus t_7\\
/// y_5 = t_1 \oplus t_2 \oplus t_6 \oplus t_7 \oplus t_8\\
/// y_6 = t_2 \oplus t_3 \oplus t_5 \oplus t_7 \oplus t_8\\
/// y_7 = t_3 \oplus t_4 \oplus t_5 \oplus t_6 \oplus t_8\\
/// y_8 = t_1 \oplus t_4 \oplus t_5 \oplus t_6 \oplus t_7
/// $$
///
/// The S-boxes provide confusion, the linear map diffuses every input byte
/// into at least five output bytes.
#[docext]
pub fn f(data: u64, ke: u64) -> u64 {
    let x = (data ^ ke).to_be_bytes();
    let t1 = SBOX1[usize::from(x[0])];
    let t2 = SBOX2[usize::from(x[1])];
    let t3 = SBOX3[usize::from(x[2])];
    let t4 = SBOX4[usize::from(x[3])];
    let t5 = SBOX2[usize::from(x[4])];
    let t6 = SBOX3[usize::from(x[5])];
    let t7 = SBOX4[usize::from(x[6])];
    let t8 = SBOX1[usize::from(x[7])];
    u64::from_be_bytes([
        t1 ^ t3 ^ t4 ^ t6 ^ t7 ^ t8,
        t1 ^ t2 ^ t4 ^ t5 ^ t7 ^ t8,
        t1 ^ t2 ^ t3 ^ t5 ^ t6 ^ t8,
        t2 ^ t3 ^ t4 ^ t5 ^ t6 ^ t7,
        t1 ^ t2 ^ t6 ^ t7 ^ t8,
        t2 ^ t3 ^ t5 ^ t7 ^ t8,
        t3 ^ t4 ^ t5 ^ t6 ^ t8,
        t1 ^ t4 ^ t5 ^ t6 ^ t7,
    ])
}

/// The FL layer, a key-dependent linear bijection applied to the first
/// block half between six-round groups.
///
/// With the input and the subkey split into 32-bit halves $(x_1, x_2)$ and
/// $(k_1, k_2)$:
///
/// $$
/// x_2 \gets x_2 \oplus \mathrm{ROTL}(x_1 \land k_1, 1)\\
/// x_1 \gets x_1 \oplus (x_2 \lor k_2)
/// $$
///
/// The second update reads the already-updated $x_2$; the order matters.
#[docext]
pub fn fl(data: u64, ke: u64) -> u64 {
    let (mut x1, mut x2) = ((data >> 32) as u32, data as u32);
    let (k1, k2) = ((ke >> 32) as u32, ke as u32);
    x2 ^= (x1 & k1).rotate_left(1);
    x1 ^= x2 | k2;
    u64::from(x1) << 32 | u64::from(x2)
}

/// The inverse of the [FL layer](fl) under the same subkey, applied to the
/// second block half. Runs the two [FL](fl) updates in the opposite order,
/// so `flinv(fl(x, ke), ke) == x`.
pub fn flinv(data: u64, ke: u64) -> u64 {
    let (mut y1, mut y2) = ((data >> 32) as u32, data as u32);
    let (k1, k2) = ((ke >> 32) as u32, ke as u32);
    y1 ^= y2 | k2;
    y2 ^= (y1 & k1).rotate_left(1);
    u64::from(y1) << 32 | u64::from(y2)
}

/// Rotate the 128-bit value `hi ‖ lo` left by `n` bits.
///
/// The rotation splits into a cross-shift of the two 64-bit halves by
/// `n mod 64` and a swap of the halves when bit 6 of `n` is set, so `n = 0`
/// returns the input unchanged and `n = 64` swaps the halves. The [key
/// schedule](schedule) never rotates by more than 111 bits; callers that
/// need only one half of the result discard the other.
pub fn rotl128(hi: u64, lo: u64, n: u32) -> (u64, u64) {
    let bits = n % 64;
    let (hi, lo) = if bits == 0 {
        (hi, lo)
    } else {
        (hi << bits | lo >> (64 - bits), lo << bits | hi >> (64 - bits))
    };
    if n / 64 % 2 == 0 {
        (hi, lo)
    } else {
        (lo, hi)
    }
}

/// Load a big-endian 64-bit word from `bytes` starting at offset `at`.
fn load64(bytes: &[u8], at: usize) -> u64 {
    let mut word = [0; 8];
    word.copy_from_slice(&bytes[at..at + 8]);
    u64::from_be_bytes(word)
}

/// Encrypt a single block: schedule the table for `kind` and run the block
/// through it.
fn encrypt(data: Block, key: &[u8], kind: KeyKind) -> Block {
    let table = schedule(kind, key).expect("kind is a supported encryption kind");
    transform(data, &table).expect("scheduled table has a known kind")
}

/// Decrypt a single block: schedule the encryption table for `kind`,
/// reorder it for decryption, and run the block through it.
fn decrypt(data: Block, key: &[u8], kind: KeyKind) -> Block {
    let mut table = schedule(kind, key).expect("kind is a supported encryption kind");
    swap(&mut table).expect("scheduled table has a known kind");
    transform(data, &table).expect("swapped table has a known kind")
}

/// [Camellia block cipher](self) with 128-bit keys.
#[derive(Debug, Default)]
pub struct Camellia128(());

impl BlockEncrypt for Camellia128 {
    type EncryptionBlock = Block;
    type EncryptionKey = [u8; KEY128_BYTES];

    fn encrypt(
        &self,
        data: Plaintext<Self::EncryptionBlock>,
        key: Key<Self::EncryptionKey>,
    ) -> Ciphertext<Self::EncryptionBlock> {
        Ciphertext(encrypt(data.0, &key.0, KeyKind::Camellia128Encrypt))
    }
}

impl BlockDecrypt for Camellia128 {
    type DecryptionBlock = Block;
    type DecryptionKey = [u8; KEY128_BYTES];

    fn decrypt(
        &self,
        data: Ciphertext<Self::DecryptionBlock>,
        key: Key<Self::DecryptionKey>,
    ) -> Plaintext<Self::DecryptionBlock> {
        Plaintext(decrypt(data.0, &key.0, KeyKind::Camellia128Encrypt))
    }
}

impl BlockCipher for Camellia128 {
    type Block = Block;
    type Key = [u8; KEY128_BYTES];
}

/// [Camellia block cipher](self) with 192-bit keys.
#[derive(Debug, Default)]
pub struct Camellia192(());

impl BlockEncrypt for Camellia192 {
    type EncryptionBlock = Block;
    type EncryptionKey = [u8; KEY192_BYTES];

    fn encrypt(
        &self,
        data: Plaintext<Self::EncryptionBlock>,
        key: Key<Self::EncryptionKey>,
    ) -> Ciphertext<Self::EncryptionBlock> {
        Ciphertext(encrypt(data.0, &key.0, KeyKind::Camellia192Encrypt))
    }
}

impl BlockDecrypt for Camellia192 {
    type DecryptionBlock = Block;
    type DecryptionKey = [u8; KEY192_BYTES];

    fn decrypt(
        &self,
        data: Ciphertext<Self::DecryptionBlock>,
        key: Key<Self::DecryptionKey>,
    ) -> Plaintext<Self::DecryptionBlock> {
        Plaintext(decrypt(data.0, &key.0, KeyKind::Camellia192Encrypt))
    }
}

impl BlockCipher for Camellia192 {
    type Block = Block;
    type Key = [u8; KEY192_BYTES];
}

/// [Camellia block cipher](self) with 256-bit keys.
#[derive(Debug, Default)]
pub struct Camellia256(());

impl BlockEncrypt for Camellia256 {
    type EncryptionBlock = Block;
    type EncryptionKey = [u8; KEY256_BYTES];

    fn encrypt(
        &self,
        data: Plaintext<Self::EncryptionBlock>,
        key: Key<Self::EncryptionKey>,
    ) -> Ciphertext<Self::EncryptionBlock> {
        Ciphertext(encrypt(data.0, &key.0, KeyKind::Camellia256Encrypt))
    }
}

impl BlockDecrypt for Camellia256 {
    type DecryptionBlock = Block;
    type DecryptionKey = [u8; KEY256_BYTES];

    fn decrypt(
        &self,
        data: Ciphertext<Self::DecryptionBlock>,
        key: Key<Self::DecryptionKey>,
    ) -> Plaintext<Self::DecryptionBlock> {
        Plaintext(decrypt(data.0, &key.0, KeyKind::Camellia256Encrypt))
    }
}

impl BlockCipher for Camellia256 {
    type Block = Block;
    type Key = [u8; KEY256_BYTES];
}
