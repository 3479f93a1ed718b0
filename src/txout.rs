//! Compressed transaction outputs
//!
//! UTXO entries store each output as an amount and a public key script, both
//! compressed with their domain-specific algorithms:
//!
//! ```text
//!   Field                 Type     Size
//!   compressed amount     VLQ      variable (only when the record has one)
//!   script version        VLQ      variable
//!   compressed script     []byte   variable
//! ```
//!
//! Loaded entries keep their scripts compressed until the output is accessed,
//! so a record may be written from an already compressed script.

use crate::amount::{compress_amount, decompress_amount};
use crate::error::{ensure_capacity, CodecError, Result};
use crate::script_compression::{
    compressed_script_size, decode_compressed_script_size, put_compressed_script,
};
use crate::types::*;
use crate::vlq::{deserialize_vlq, put_vlq, serialize_size_vlq};

impl<'a> TxOutRecord<'a> {
    fn amount(&self) -> Option<u64> {
        match *self {
            TxOutRecord::Full { amount, .. } | TxOutRecord::PreCompressed { amount, .. } => {
                Some(amount)
            }
            TxOutRecord::NoAmount { .. } | TxOutRecord::PreCompressedNoAmount { .. } => None,
        }
    }

    fn script_version(&self) -> u16 {
        match *self {
            TxOutRecord::Full { script_version, .. }
            | TxOutRecord::NoAmount { script_version, .. }
            | TxOutRecord::PreCompressed { script_version, .. }
            | TxOutRecord::PreCompressedNoAmount { script_version, .. } => script_version,
        }
    }

    /// Number of bytes the record occupies once serialized
    pub fn serialized_size(&self, compression_version: u32) -> usize {
        let amount_size = self
            .amount()
            .map_or(0, |amount| serialize_size_vlq(compress_amount(amount)));
        let version_size = serialize_size_vlq(u64::from(self.script_version()));

        let script_size = match *self {
            TxOutRecord::Full { script_version, script, .. }
            | TxOutRecord::NoAmount { script_version, script } => {
                compressed_script_size(script_version, script, compression_version)
            }
            TxOutRecord::PreCompressed { compressed_script, .. }
            | TxOutRecord::PreCompressedNoAmount {
                compressed_script, ..
            } => compressed_script.len(),
        };

        amount_size + version_size + script_size
    }

    /// Serialize the record into the front of `target`, returning the bytes written
    pub fn put(&self, target: &mut [u8], compression_version: u32) -> Result<usize> {
        ensure_capacity(target, self.serialized_size(compression_version))?;

        let mut offset = 0;
        if let Some(amount) = self.amount() {
            offset += put_vlq(target, compress_amount(amount))?;
        }
        offset += put_vlq(&mut target[offset..], u64::from(self.script_version()))?;

        match *self {
            TxOutRecord::Full { script_version, script, .. }
            | TxOutRecord::NoAmount { script_version, script } => {
                offset += put_compressed_script(
                    &mut target[offset..],
                    script_version,
                    script,
                    compression_version,
                )?;
            }
            TxOutRecord::PreCompressed { compressed_script, .. }
            | TxOutRecord::PreCompressedNoAmount { compressed_script, .. } => {
                target[offset..offset + compressed_script.len()].copy_from_slice(compressed_script);
                offset += compressed_script.len();
            }
        }

        Ok(offset)
    }

    /// Serialize the record into a freshly allocated buffer
    pub fn to_bytes(&self, compression_version: u32) -> Result<ByteString> {
        let mut target = vec![0u8; self.serialized_size(compression_version)];
        let written = self.put(&mut target, compression_version)?;
        target.truncate(written);
        Ok(target)
    }
}

/// Number of bytes a transaction output takes once compressed
///
/// `pre_compressed` means `script` is already compressed; `has_amount` selects
/// whether the amount is part of the record at all.
pub fn compressed_txout_size(
    amount: u64,
    script_version: u16,
    script: &[u8],
    compression_version: u32,
    pre_compressed: bool,
    has_amount: bool,
) -> usize {
    TxOutRecord::new(amount, script_version, script, pre_compressed, has_amount)
        .serialized_size(compression_version)
}

/// Compress a transaction output into the front of `target`
pub fn put_compressed_txout(
    target: &mut [u8],
    amount: u64,
    script_version: u16,
    script: &[u8],
    compression_version: u32,
    pre_compressed: bool,
    has_amount: bool,
) -> Result<usize> {
    TxOutRecord::new(amount, script_version, script, pre_compressed, has_amount)
        .put(target, compression_version)
}

/// Decode a compressed transaction output at the front of `serialized`
///
/// The script is returned still compressed. `serialized` may be followed by
/// other data; `bytes_read` in the result says where the record ended.
pub fn decode_compressed_txout(
    serialized: &[u8],
    compression_version: u32,
    has_amount: bool,
) -> Result<CompressedTxOut> {
    decode_record(serialized, compression_version, has_amount).map_err(|e| {
        tracing::debug!(
            len = serialized.len(),
            has_amount,
            error = %e,
            "failed to decode compressed txout"
        );
        e
    })
}

/// Prefix a decode error with the field being read
fn in_field(field: &'static str) -> impl Fn(CodecError) -> CodecError {
    move |e| match e {
        CodecError::Deserialize(msg) => CodecError::Deserialize(format!("{}: {}", field, msg)),
        other => other,
    }
}

fn decode_record(
    serialized: &[u8],
    compression_version: u32,
    has_amount: bool,
) -> Result<CompressedTxOut> {
    let mut offset = 0;
    let mut amount: Amount = 0;

    if has_amount {
        let (compressed_amount, bytes_read) =
            deserialize_vlq(serialized).map_err(in_field("compressed amount"))?;
        if bytes_read >= serialized.len() {
            return Err(CodecError::deserialize(
                "unexpected end of data after compressed amount",
            ));
        }
        amount = decompress_amount(compressed_amount) as Amount;
        offset += bytes_read;
    }

    let (script_version, bytes_read) =
        deserialize_vlq(&serialized[offset..]).map_err(in_field("script version"))?;
    let script_version = u16::try_from(script_version).map_err(|_| {
        CodecError::deserialize(format!("script version {} exceeds 16 bits", script_version))
    })?;
    offset += bytes_read;

    let script_size = decode_compressed_script_size(&serialized[offset..], compression_version)?;
    let remaining = serialized.len() - offset;
    if remaining < script_size {
        return Err(CodecError::deserialize(format!(
            "unexpected end of data after script size (got {}, need {})",
            remaining, script_size
        )));
    }

    // Copy the script out so the serialized buffer can be released.
    let compressed_script = serialized[offset..offset + script_size].to_vec();

    Ok(CompressedTxOut {
        amount,
        script_version,
        compressed_script,
        bytes_read: offset + script_size,
    })
}
