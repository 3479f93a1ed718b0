//! Shared helpers for integration tests

#![allow(dead_code)]

use secp256k1::{PublicKey, Secp256k1, SecretKey};
use utxo_compression::script::*;
use utxo_compression::ByteString;

/// A deterministic key whose compressed form has the requested y parity.
pub fn key_with_parity(odd: bool) -> PublicKey {
    let secp = Secp256k1::new();
    (1u8..=0xfe)
        .filter_map(|i| SecretKey::from_slice(&[i; 32]).ok())
        .map(|sk| PublicKey::from_secret_key(&secp, &sk))
        .find(|pk| (pk.serialize()[0] == 0x03) == odd)
        .expect("a key of each parity exists in the first few secrets")
}

/// One script of every shape the compressor distinguishes, with a label.
pub fn sample_scripts() -> Vec<(&'static str, ByteString)> {
    let even = key_with_parity(false);
    let odd = key_with_parity(true);
    vec![
        ("p2pkh", pay_to_pubkey_hash_for_key(&even)),
        ("p2sh", pay_to_script_hash_script(&hash160(&[0x51]))),
        ("p2pk compressed even", pay_to_pubkey_script(&even, true)),
        ("p2pk compressed odd", pay_to_pubkey_script(&odd, true)),
        ("p2pk uncompressed even", pay_to_pubkey_script(&even, false)),
        ("p2pk uncompressed odd", pay_to_pubkey_script(&odd, false)),
        ("non-standard", [&[0x6a, 0x0b][..], &b"hello world"[..]].concat()),
        ("empty", Vec::new()),
    ]
}
