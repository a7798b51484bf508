//! Tests for the Camellia cipher: the known-answer vectors from RFC 3713
//! Appendix A, the algebraic laws of the internal pieces, and rejection of
//! unsupported key kinds.

use {
    crate::{
        camellia::{
            self,
            schedule,
            swap,
            transform,
            Block,
            KeyKind,
            SubkeyTable,
            SBOX1,
            SBOX2,
            SBOX3,
            SBOX4,
        },
        BlockCipher,
        Camellia128,
        Camellia192,
        Camellia256,
        Key,
        Plaintext,
    },
    core::fmt,
    rand::Rng,
};

/// The plaintext shared by all three reference vectors.
const PLAINTEXT: Block = [
    0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98, 0x76, 0x54, 0x32, 0x10,
];

/// RFC 3713 Appendix A vector for a 128-bit key.
#[test]
fn vector_128() {
    known_answer(
        KeyKind::Camellia128Encrypt,
        &[
            0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ],
        [
            0x67, 0x67, 0x31, 0x38, 0x54, 0x96, 0x69, 0x73, 0x08, 0x57, 0x06, 0x56, 0x48, 0xea,
            0xbe, 0x43,
        ],
    );
}

/// RFC 3713 Appendix A vector for a 192-bit key.
#[test]
fn vector_192() {
    known_answer(
        KeyKind::Camellia192Encrypt,
        &[
            0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98, 0x76, 0x54,
            0x32, 0x10, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
        ],
        [
            0xb4, 0x99, 0x34, 0x01, 0xb3, 0xe9, 0x96, 0xf8, 0x4e, 0xe5, 0xce, 0xe7, 0xd7, 0x9b,
            0x09, 0xb9,
        ],
    );
}

/// RFC 3713 Appendix A vector for a 256-bit key.
#[test]
fn vector_256() {
    known_answer(
        KeyKind::Camellia256Encrypt,
        &[
            0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98, 0x76, 0x54,
            0x32, 0x10, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb,
            0xcc, 0xdd, 0xee, 0xff,
        ],
        [
            0x9a, 0xcc, 0x23, 0x7d, 0xff, 0x16, 0xd7, 0x6c, 0x20, 0xef, 0x7c, 0x91, 0x9e, 0x3a,
            0x75, 0x09,
        ],
    );
}

/// Ensure that scheduling `kind` over `key` encrypts [PLAINTEXT] to
/// `ciphertext`, and that the swapped table decrypts it back.
fn known_answer(kind: KeyKind, key: &[u8], ciphertext: Block) {
    let mut table = schedule(kind, key).unwrap();
    let encrypted = transform(PLAINTEXT, &table).unwrap();
    assert_eq!(
        encrypted, ciphertext,
        "encryption does not match the reference vector for {kind:?}\nkey: {key:02x?}"
    );

    swap(&mut table).unwrap();
    let decrypted = transform(ciphertext, &table).unwrap();
    assert_eq!(
        decrypted, PLAINTEXT,
        "decryption does not match the reference vector for {kind:?}\nkey: {key:02x?}"
    );
}

#[test]
fn camellia_128_round_trip() {
    for _ in 0..16 {
        round_trip(Camellia128::default());
    }
}

#[test]
fn camellia_192_round_trip() {
    for _ in 0..16 {
        round_trip(Camellia192::default());
    }
}

#[test]
fn camellia_256_round_trip() {
    for _ in 0..16 {
        round_trip(Camellia256::default());
    }
}

/// Test that a block cipher is valid by making sure that
/// ```
/// decrypt(encrypt(block, key), key) == block
/// ```
/// for a random block and key.
fn round_trip<Cip: BlockCipher>(cip: Cip)
where
    Cip::Block: AsMut<[u8]> + Default + Copy + PartialEq + fmt::Debug,
    Cip::Key: AsMut<[u8]> + Default + Copy + fmt::Debug,
{
    let mut data = Cip::Block::default();
    rand::thread_rng().fill(data.as_mut());
    let mut key = Cip::Key::default();
    rand::thread_rng().fill(key.as_mut());

    let ciphertext = cip.encrypt(Plaintext(data), Key(key));
    let plaintext = cip.decrypt(ciphertext, Key(key));

    assert_eq!(
        data, plaintext.0,
        "decrypted plaintext did not match\ndata: {data:?}\nkey: {key:?}\nciphertext: \
         {ciphertext:?}"
    );
}

/// Double [swap] must restore the table byte-for-byte, and a single [swap]
/// must flip the direction of the tag.
#[test]
fn swap_involution() {
    involution(KeyKind::Camellia128Encrypt, 16);
    involution(KeyKind::Camellia192Encrypt, 24);
    involution(KeyKind::Camellia256Encrypt, 32);
}

fn involution(kind: KeyKind, key_len: usize) {
    let key: Vec<u8> = (0..key_len).map(|_| rand::thread_rng().gen()).collect();
    let table = schedule(kind, &key).unwrap();

    let mut swapped = table;
    swap(&mut swapped).unwrap();
    assert_eq!(swapped.kind(), kind.swapped().unwrap());
    assert_ne!(table, swapped, "swap left the table unchanged for {kind:?}");

    swap(&mut swapped).unwrap();
    assert_eq!(
        table, swapped,
        "double swap did not restore the table for {kind:?}"
    );
}

/// [camellia::flinv] must invert [camellia::fl] under the same subkey, in
/// both compositions.
#[test]
fn fl_inverse() {
    for _ in 0..1000 {
        let x: u64 = rand::thread_rng().gen();
        let ke: u64 = rand::thread_rng().gen();
        assert_eq!(camellia::flinv(camellia::fl(x, ke), ke), x);
        assert_eq!(camellia::fl(camellia::flinv(x, ke), ke), x);
    }
}

/// The [round function](camellia::f) absorbs its subkey purely by XOR.
#[test]
fn f_absorbs_key() {
    for _ in 0..1000 {
        let x: u64 = rand::thread_rng().gen();
        let ke: u64 = rand::thread_rng().gen();
        assert_eq!(camellia::f(x, ke), camellia::f(x ^ ke, 0));
    }
}

/// [camellia::rotl128] laws: rotating by zero is the identity, rotating by
/// 64 swaps the halves, and every rotation agrees with `u128::rotate_left`.
#[test]
fn rotl128_laws() {
    for _ in 0..1000 {
        let hi: u64 = rand::thread_rng().gen();
        let lo: u64 = rand::thread_rng().gen();
        assert_eq!(camellia::rotl128(hi, lo, 0), (hi, lo));
        assert_eq!(camellia::rotl128(hi, lo, 64), (lo, hi));

        let n = rand::thread_rng().gen_range(0..128);
        let wide = (u128::from(hi) << 64 | u128::from(lo)).rotate_left(n);
        assert_eq!(
            camellia::rotl128(hi, lo, n),
            ((wide >> 64) as u64, wide as u64),
            "rotation by {n} disagrees with the u128 oracle"
        );
    }
}

/// The embedded S-boxes must satisfy the derivation identities from RFC
/// 3713: SBOX2, SBOX3, and SBOX4 are fixed rotations of SBOX1.
#[test]
fn sbox_derivation() {
    for x in 0..=255u8 {
        let i = usize::from(x);
        assert_eq!(SBOX2[i], SBOX1[i].rotate_left(1), "SBOX2[{i}]");
        assert_eq!(SBOX3[i], SBOX1[i].rotate_left(7), "SBOX3[{i}]");
        assert_eq!(SBOX4[i], SBOX1[usize::from(x.rotate_left(1))], "SBOX4[{i}]");
    }
}

/// The key schedule accepts only the three encryption kinds.
#[test]
fn schedule_rejects_unsupported_kinds() {
    let key = [0; 32];
    assert!(schedule(KeyKind::Unknown, &key).is_err());
    assert!(schedule(KeyKind::Camellia128Decrypt, &key).is_err());
    assert!(schedule(KeyKind::Camellia192Decrypt, &key).is_err());
    assert!(schedule(KeyKind::Camellia256Decrypt, &key).is_err());
}

/// A default table has never been scheduled and must be rejected by both
/// consumers.
#[test]
fn unscheduled_table_rejected() {
    let mut table = SubkeyTable::default();
    assert_eq!(table.kind(), KeyKind::Unknown);
    assert!(transform([0; 16], &table).is_err());
    assert!(swap(&mut table).is_err());
}

/// A 192-bit key must behave exactly like the 256-bit key formed by
/// appending the complement of its final eight bytes, because the schedule
/// fills the missing lower half of KR with that complement.
#[test]
fn complement_192() {
    let mut key192 = [0u8; 24];
    rand::thread_rng().fill(&mut key192[..]);

    let mut key256 = [0u8; 32];
    key256[..24].copy_from_slice(&key192);
    for i in 0..8 {
        key256[24 + i] = !key192[16 + i];
    }

    let table192 = schedule(KeyKind::Camellia192Encrypt, &key192).unwrap();
    let table256 = schedule(KeyKind::Camellia256Encrypt, &key256).unwrap();

    let mut block = [0u8; 16];
    rand::thread_rng().fill(&mut block[..]);
    assert_eq!(
        transform(block, &table192).unwrap(),
        transform(block, &table256).unwrap(),
        "192-bit key and its 256-bit completion disagree\nkey: {key192:02x?}"
    );
}
