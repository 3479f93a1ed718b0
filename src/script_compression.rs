//! Domain-specific public key script compression
//!
//! Standard scripts are recognized and stored with fewer bytes than the
//! original. The general serialized format is:
//!
//! ```text
//!   Field                 Type     Size
//!   script size or type   VLQ      variable
//!   script data           []byte   variable
//! ```
//!
//! Recognized standard scripts:
//!
//! - pay-to-pubkey-hash: 21 bytes, `<0><20-byte pubkey hash>`
//! - pay-to-script-hash: 21 bytes, `<1><20-byte script hash>`
//! - pay-to-pubkey: 33 bytes, `<2, 3, 4, or 5><32-byte pubkey X value>`;
//!   2 and 3 are compressed keys, 4 and 5 uncompressed keys, bit 0 giving the
//!   parity of y
//!
//! Anything else is stored verbatim after its size plus `NUM_SPECIAL_SCRIPTS`,
//! encoded as a VLQ. The empty script takes this general form too, a single
//! `0x40`.

use crate::constants::*;
use crate::error::{ensure_capacity, CodecError, Result};
use crate::script::{
    extract_pubkey, extract_pubkey_hash, extract_script_hash, parse_pubkey,
};
use crate::types::ByteString;
use crate::vlq::{deserialize_vlq, put_vlq, serialize_size_vlq};

/// How a script is laid out once compressed
enum CompressedForm<'a> {
    PubKeyHash(&'a [u8]),
    ScriptHash(&'a [u8]),
    PubKey(&'a [u8]),
    Raw(&'a [u8]),
}

impl<'a> CompressedForm<'a> {
    fn of(script: &'a [u8]) -> Self {
        if let Some(hash) = extract_pubkey_hash(script) {
            return CompressedForm::PubKeyHash(hash);
        }
        if let Some(hash) = extract_script_hash(script) {
            return CompressedForm::ScriptHash(hash);
        }
        if let Some(key) = extract_pubkey(script) {
            return CompressedForm::PubKey(key);
        }
        CompressedForm::Raw(script)
    }

    fn size(&self) -> usize {
        match self {
            CompressedForm::PubKeyHash(_) | CompressedForm::ScriptHash(_) => {
                COMPRESSED_HASH_SCRIPT_SIZE
            }
            CompressedForm::PubKey(_) => COMPRESSED_PUBKEY_SCRIPT_SIZE,
            CompressedForm::Raw(script) => {
                serialize_size_vlq(script.len() as u64 + NUM_SPECIAL_SCRIPTS) + script.len()
            }
        }
    }

    /// Writes the form; `target` must already hold at least `size()` bytes.
    fn write(&self, target: &mut [u8]) -> Result<usize> {
        match self {
            CompressedForm::PubKeyHash(hash) => {
                target[0] = CST_PAY_TO_PUBKEY_HASH as u8;
                target[1..COMPRESSED_HASH_SCRIPT_SIZE].copy_from_slice(hash);
                Ok(COMPRESSED_HASH_SCRIPT_SIZE)
            }
            CompressedForm::ScriptHash(hash) => {
                target[0] = CST_PAY_TO_SCRIPT_HASH as u8;
                target[1..COMPRESSED_HASH_SCRIPT_SIZE].copy_from_slice(hash);
                Ok(COMPRESSED_HASH_SCRIPT_SIZE)
            }
            CompressedForm::PubKey(key) => {
                // Both key forms keep the X coordinate; the tag carries the
                // parity of y so the full key can be recovered.
                let tag = match key[0] {
                    0x02 => CST_PAY_TO_PUBKEY_COMP_EVEN,
                    0x03 => CST_PAY_TO_PUBKEY_COMP_ODD,
                    _ if key[64] & 0x01 == 0x01 => CST_PAY_TO_PUBKEY_UNCOMP_ODD,
                    _ => CST_PAY_TO_PUBKEY_UNCOMP_EVEN,
                };
                target[0] = tag as u8;
                target[1..COMPRESSED_PUBKEY_SCRIPT_SIZE].copy_from_slice(&key[1..33]);
                Ok(COMPRESSED_PUBKEY_SCRIPT_SIZE)
            }
            CompressedForm::Raw(script) => {
                let encoded_size = script.len() as u64 + NUM_SPECIAL_SCRIPTS;
                let offset = put_vlq(target, encoded_size)?;
                target[offset..offset + script.len()].copy_from_slice(script);
                Ok(offset + script.len())
            }
        }
    }
}

/// Number of bytes `script` occupies once compressed
pub fn compressed_script_size(
    _script_version: u16,
    script: &[u8],
    _compression_version: u32,
) -> usize {
    CompressedForm::of(script).size()
}

/// Compress `script` into the front of `target`, returning the bytes written
pub fn put_compressed_script(
    target: &mut [u8],
    _script_version: u16,
    script: &[u8],
    _compression_version: u32,
) -> Result<usize> {
    let form = CompressedForm::of(script);
    ensure_capacity(target, form.size())?;
    form.write(target)
}

/// Compress `script` into a freshly allocated buffer
pub fn compress_script(
    script_version: u16,
    script: &[u8],
    compression_version: u32,
) -> Result<ByteString> {
    let form = CompressedForm::of(script);
    let mut target = vec![0u8; form.size()];
    put_compressed_script(&mut target, script_version, script, compression_version)?;
    Ok(target)
}

/// Size of the compressed script at the front of `serialized`
///
/// `serialized` may be followed by other data. Only the leading size or type
/// VLQ is inspected; the caller checks the payload is actually present.
pub fn decode_compressed_script_size(
    serialized: &[u8],
    _compression_version: u32,
) -> Result<usize> {
    let (script_size, bytes_read) = deserialize_vlq(serialized)?;

    match script_size {
        CST_PAY_TO_PUBKEY_HASH | CST_PAY_TO_SCRIPT_HASH => return Ok(COMPRESSED_HASH_SCRIPT_SIZE),
        CST_PAY_TO_PUBKEY_COMP_EVEN
        | CST_PAY_TO_PUBKEY_COMP_ODD
        | CST_PAY_TO_PUBKEY_UNCOMP_EVEN
        | CST_PAY_TO_PUBKEY_UNCOMP_ODD => return Ok(COMPRESSED_PUBKEY_SCRIPT_SIZE),
        _ => {}
    }

    let raw_len = raw_script_len(script_size)?;
    raw_len
        .checked_add(bytes_read)
        .ok_or_else(|| CodecError::deserialize(format!("script size {} overflows", script_size)))
}

/// Decompress a compressed script back into the original script
///
/// An empty slice or a lone `0x00` also decodes to the empty script.
pub fn decompress_script(compressed: &[u8], _compression_version: u32) -> Result<ByteString> {
    if compressed.is_empty() || compressed == [0x00] {
        return Ok(Vec::new());
    }

    let (encoded_size, bytes_read) = deserialize_vlq(compressed)?;
    match encoded_size {
        // <OP_DUP><OP_HASH160><OP_DATA_20><20-byte hash><OP_EQUALVERIFY><OP_CHECKSIG>
        CST_PAY_TO_PUBKEY_HASH => {
            let hash = payload(compressed, bytes_read, HASH160_LEN)?;
            let mut script = Vec::with_capacity(P2PKH_SCRIPT_LEN);
            script.extend_from_slice(&[OP_DUP, OP_HASH160, OP_DATA_20]);
            script.extend_from_slice(hash);
            script.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);
            Ok(script)
        }

        // <OP_HASH160><OP_DATA_20><20-byte hash><OP_EQUAL>
        CST_PAY_TO_SCRIPT_HASH => {
            let hash = payload(compressed, bytes_read, HASH160_LEN)?;
            let mut script = Vec::with_capacity(P2SH_SCRIPT_LEN);
            script.extend_from_slice(&[OP_HASH160, OP_DATA_20]);
            script.extend_from_slice(hash);
            script.push(OP_EQUAL);
            Ok(script)
        }

        // <OP_DATA_33><33-byte compressed pubkey><OP_CHECKSIG>
        CST_PAY_TO_PUBKEY_COMP_EVEN | CST_PAY_TO_PUBKEY_COMP_ODD => {
            let x = payload(compressed, bytes_read, PUBKEY_X_LEN)?;
            let mut script = Vec::with_capacity(P2PK_COMPRESSED_SCRIPT_LEN);
            script.push(OP_DATA_33);
            script.push(parity_prefix(encoded_size));
            script.extend_from_slice(x);
            script.push(OP_CHECKSIG);
            Ok(script)
        }

        // <OP_DATA_65><65-byte uncompressed pubkey><OP_CHECKSIG>
        CST_PAY_TO_PUBKEY_UNCOMP_EVEN | CST_PAY_TO_PUBKEY_UNCOMP_ODD => {
            let x = payload(compressed, bytes_read, PUBKEY_X_LEN)?;
            let mut compressed_key = [0u8; 33];
            compressed_key[0] = parity_prefix(encoded_size);
            compressed_key[1..].copy_from_slice(x);

            // Only valid keys are ever compressed to this type, so failing to
            // parse here means the stored bytes are corrupt.
            let key = parse_pubkey(&compressed_key).map_err(|e| {
                tracing::debug!(tag = encoded_size, error = %e, "corrupt compressed pubkey script");
                e
            })?;

            let mut script = Vec::with_capacity(P2PK_UNCOMPRESSED_SCRIPT_LEN);
            script.push(OP_DATA_65);
            script.extend_from_slice(&key.serialize_uncompressed());
            script.push(OP_CHECKSIG);
            Ok(script)
        }

        _ => {
            let raw_len = raw_script_len(encoded_size)?;
            Ok(payload(compressed, bytes_read, raw_len)?.to_vec())
        }
    }
}

/// 0x02 for the even tags, 0x03 for the odd ones.
fn parity_prefix(tag: u64) -> u8 {
    if tag & 0x01 == 0x01 {
        0x03
    } else {
        0x02
    }
}

/// Raw script length carried by a general-format size value
fn raw_script_len(encoded_size: u64) -> Result<usize> {
    let raw_len = encoded_size.checked_sub(NUM_SPECIAL_SCRIPTS).ok_or_else(|| {
        tracing::debug!(encoded_size, "reserved compressed script type");
        CodecError::deserialize(format!(
            "negative script size: reserved compressed script type {}",
            encoded_size
        ))
    })?;
    usize::try_from(raw_len).map_err(|_| {
        CodecError::deserialize(format!("script size {} does not fit in memory", raw_len))
    })
}

/// `len` bytes following the leading VLQ, or a deserialize error
fn payload(compressed: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    let available = compressed.len() - offset;
    if available < len {
        return Err(CodecError::deserialize(format!(
            "unexpected end of data in compressed script (got {}, need {})",
            available, len
        )));
    }
    Ok(&compressed[offset..offset + len])
}
