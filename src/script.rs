//! Standard script recognition and construction
//!
//! The compressor only needs to recognize a handful of standard public key
//! script shapes. Opcodes are matched byte for byte and never executed.

use crate::constants::*;
use crate::error::{CodecError, Result};
use crate::types::*;
use ripemd::Ripemd160;
use secp256k1::PublicKey;
use sha2::{Digest, Sha256};

/// Extract the 20-byte hash paid to by a standard pay-to-pubkey-hash script
///
/// `OP_DUP OP_HASH160 OP_DATA_20 <20-byte hash> OP_EQUALVERIFY OP_CHECKSIG`
pub fn extract_pubkey_hash(script: &[u8]) -> Option<&[u8]> {
    if script.len() == P2PKH_SCRIPT_LEN
        && script[0] == OP_DUP
        && script[1] == OP_HASH160
        && script[2] == OP_DATA_20
        && script[23] == OP_EQUALVERIFY
        && script[24] == OP_CHECKSIG
    {
        return Some(&script[3..23]);
    }
    None
}

/// Whether `script` is a standard pay-to-pubkey-hash script
pub fn is_pubkey_hash(script: &[u8]) -> bool {
    extract_pubkey_hash(script).is_some()
}

/// Extract the 20-byte hash paid to by a standard pay-to-script-hash script
///
/// `OP_HASH160 OP_DATA_20 <20-byte hash> OP_EQUAL`
pub fn extract_script_hash(script: &[u8]) -> Option<&[u8]> {
    if script.len() == P2SH_SCRIPT_LEN
        && script[0] == OP_HASH160
        && script[1] == OP_DATA_20
        && script[22] == OP_EQUAL
    {
        return Some(&script[2..22]);
    }
    None
}

/// Whether `script` is a standard pay-to-script-hash script
pub fn is_script_hash(script: &[u8]) -> bool {
    extract_script_hash(script).is_some()
}

/// Extract the serialized public key paid to by a pay-to-pubkey script
///
/// Only compressed (0x02/0x03) and uncompressed (0x04) keys are accepted, and
/// the key must actually parse. Hybrid keys are rejected even though they have
/// the right shape, since the compressed encoding cannot represent them.
pub fn extract_pubkey(script: &[u8]) -> Option<&[u8]> {
    // Pay-to-compressed-pubkey.
    if script.len() == P2PK_COMPRESSED_SCRIPT_LEN
        && script[0] == OP_DATA_33
        && script[34] == OP_CHECKSIG
        && (script[1] == 0x02 || script[1] == 0x03)
    {
        let key = &script[1..34];
        if PublicKey::from_slice(key).is_ok() {
            return Some(key);
        }
    }

    // Pay-to-uncompressed-pubkey.
    if script.len() == P2PK_UNCOMPRESSED_SCRIPT_LEN
        && script[0] == OP_DATA_65
        && script[66] == OP_CHECKSIG
        && script[1] == 0x04
    {
        let key = &script[1..66];
        if PublicKey::from_slice(key).is_ok() {
            return Some(key);
        }
    }

    None
}

/// Whether `script` is a pay-to-pubkey script paying to a valid key
pub fn is_pubkey(script: &[u8]) -> bool {
    extract_pubkey(script).is_some()
}

/// Classify a public key script into the shapes the compressor knows about
pub fn classify_script(script: &[u8]) -> ScriptClass {
    if is_pubkey_hash(script) {
        return ScriptClass::PubKeyHash;
    }
    if is_script_hash(script) {
        return ScriptClass::ScriptHash;
    }
    match extract_pubkey(script) {
        Some(key) if key.len() == 33 => ScriptClass::PubKeyCompressed,
        Some(_) => ScriptClass::PubKeyUncompressed,
        None => ScriptClass::NonStandard,
    }
}

/// RIPEMD160(SHA256(data))
pub fn hash160(data: &[u8]) -> [u8; HASH160_LEN] {
    let sha = Sha256::digest(data);
    let digest = Ripemd160::digest(sha);
    let mut out = [0u8; HASH160_LEN];
    out.copy_from_slice(&digest);
    out
}

/// Build a pay-to-pubkey-hash script
pub fn pay_to_pubkey_hash_script(hash: &[u8; HASH160_LEN]) -> ByteString {
    let mut script = Vec::with_capacity(P2PKH_SCRIPT_LEN);
    script.push(OP_DUP);
    script.push(OP_HASH160);
    script.push(OP_DATA_20);
    script.extend_from_slice(hash);
    script.push(OP_EQUALVERIFY);
    script.push(OP_CHECKSIG);
    script
}

/// Build a pay-to-script-hash script
pub fn pay_to_script_hash_script(hash: &[u8; HASH160_LEN]) -> ByteString {
    let mut script = Vec::with_capacity(P2SH_SCRIPT_LEN);
    script.push(OP_HASH160);
    script.push(OP_DATA_20);
    script.extend_from_slice(hash);
    script.push(OP_EQUAL);
    script
}

/// Build a pay-to-pubkey script in compressed or uncompressed key form
pub fn pay_to_pubkey_script(key: &PublicKey, compressed: bool) -> ByteString {
    if compressed {
        let mut script = Vec::with_capacity(P2PK_COMPRESSED_SCRIPT_LEN);
        script.push(OP_DATA_33);
        script.extend_from_slice(&key.serialize());
        script.push(OP_CHECKSIG);
        script
    } else {
        let mut script = Vec::with_capacity(P2PK_UNCOMPRESSED_SCRIPT_LEN);
        script.push(OP_DATA_65);
        script.extend_from_slice(&key.serialize_uncompressed());
        script.push(OP_CHECKSIG);
        script
    }
}

/// Pay-to-pubkey-hash script for the hash160 of a compressed key
pub fn pay_to_pubkey_hash_for_key(key: &PublicKey) -> ByteString {
    pay_to_pubkey_hash_script(&hash160(&key.serialize()))
}

/// Parse a serialized public key, mapping failures into the codec error space
pub(crate) fn parse_pubkey(serialized: &[u8]) -> Result<PublicKey> {
    PublicKey::from_slice(serialized).map_err(|e| CodecError::InvalidPubKey(e.to_string()))
}


#[cfg(test)]
mod tests {
    use super::test_keys::key_with_parity;
    use super::*;

    #[test]
    fn test_extract_pubkey_hash() {
        let hash = [0x11u8; 20];
        let script = pay_to_pubkey_hash_script(&hash);
        assert_eq!(script.len(), 25);
        assert_eq!(extract_pubkey_hash(&script), Some(&hash[..]));
        assert!(is_pubkey_hash(&script));
        assert!(!is_script_hash(&script));
    }

    #[test]
    fn test_extract_pubkey_hash_wrong_opcode() {
        let mut script = pay_to_pubkey_hash_script(&[0x11; 20]);
        script[24] = OP_EQUAL;
        assert_eq!(extract_pubkey_hash(&script), None);

        let mut script = pay_to_pubkey_hash_script(&[0x11; 20]);
        script.push(0x00);
        assert_eq!(extract_pubkey_hash(&script), None);
    }

    #[test]
    fn test_extract_script_hash() {
        let hash = [0x22u8; 20];
        let script = pay_to_script_hash_script(&hash);
        assert_eq!(script.len(), 23);
        assert_eq!(extract_script_hash(&script), Some(&hash[..]));
        assert!(is_script_hash(&script));
        assert!(!is_pubkey_hash(&script));
    }

    #[test]
    fn test_extract_script_hash_wrong_push() {
        let mut script = pay_to_script_hash_script(&[0x22; 20]);
        script[1] = 0x15;
        assert!(!is_script_hash(&script));
    }

    #[test]
    fn test_extract_pubkey_compressed() {
        for odd in [false, true] {
            let key = key_with_parity(odd);
            let script = pay_to_pubkey_script(&key, true);
            assert_eq!(script.len(), 35);
            assert_eq!(extract_pubkey(&script), Some(&key.serialize()[..]));
            assert_eq!(classify_script(&script), ScriptClass::PubKeyCompressed);
        }
    }

    #[test]
    fn test_extract_pubkey_uncompressed() {
        let key = key_with_parity(true);
        let script = pay_to_pubkey_script(&key, false);
        assert_eq!(script.len(), 67);
        assert_eq!(extract_pubkey(&script), Some(&key.serialize_uncompressed()[..]));
        assert_eq!(classify_script(&script), ScriptClass::PubKeyUncompressed);
    }

    #[test]
    fn test_extract_pubkey_rejects_invalid_point() {
        // Right shape, but x = 5 is not on the curve.
        let mut script = vec![OP_DATA_33, 0x02];
        script.extend_from_slice(&[0u8; 31]);
        script.push(0x05);
        script.push(OP_CHECKSIG);
        assert_eq!(script.len(), 35);
        assert!(!is_pubkey(&script));
        assert_eq!(classify_script(&script), ScriptClass::NonStandard);
    }

    #[test]
    fn test_extract_pubkey_rejects_hybrid() {
        let key = key_with_parity(false);
        let mut script = pay_to_pubkey_script(&key, false);
        script[1] = 0x06;
        assert!(!is_pubkey(&script));
    }

    #[test]
    fn test_classify_non_standard() {
        assert_eq!(classify_script(&[]), ScriptClass::NonStandard);
        assert_eq!(classify_script(&[0x51]), ScriptClass::NonStandard);
    }

    #[test]
    fn test_hash160_known_vector() {
        // hash160 of the empty string.
        assert_eq!(
            hash160(&[]),
            [
                0xb4, 0x72, 0xa2, 0x66, 0xd0, 0xbd, 0x89, 0xc1, 0x37, 0x06, 0xa4, 0x13, 0x2c,
                0xcf, 0xb1, 0x6f, 0x7c, 0x3b, 0x9f, 0xcb
            ]
        );
    }

    #[test]
    fn test_pay_to_pubkey_hash_for_key() {
        let key = key_with_parity(false);
        let script = pay_to_pubkey_hash_for_key(&key);
        assert_eq!(extract_pubkey_hash(&script), Some(&hash160(&key.serialize())[..]));
    }

    #[test]
    fn test_parse_pubkey_error() {
        assert!(matches!(parse_pubkey(&[0x02; 5]), Err(CodecError::InvalidPubKey(_))));
    }
}
