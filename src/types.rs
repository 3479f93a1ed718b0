//! Core types for UTXO compression

use crate::constants::*;
use crate::error::{CodecError, Result};
use serde::{Deserialize, Serialize};

/// Byte string type
pub type ByteString = Vec<u8>;

/// Amount in atoms as carried by a transaction output
pub type Amount = i64;

/// Stake transaction type, stored in bits 2-3 of the flags byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TxType {
    /// Ordinary transfer
    Regular = 0,
    /// Ticket purchase (SStx)
    Ticket = 1,
    /// Vote (SSGen)
    Vote = 2,
    /// Ticket revocation (SSRtx)
    Revocation = 3,
}

impl TxType {
    pub const ALL: [TxType; 4] = [
        TxType::Regular,
        TxType::Ticket,
        TxType::Vote,
        TxType::Revocation,
    ];

    /// Maps the low two bits of `bits` to a transaction type.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => TxType::Regular,
            1 => TxType::Ticket,
            2 => TxType::Vote,
            _ => TxType::Revocation,
        }
    }
}

/// Transaction details needed to decide how its outputs may be spent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxFlags {
    pub is_coinbase: bool,
    pub has_expiry: bool,
    pub tx_type: TxType,
    pub fully_spent: bool,
}

/// Shape of a standard public key script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptClass {
    PubKeyHash,
    ScriptHash,
    PubKeyCompressed,
    PubKeyUncompressed,
    NonStandard,
}

/// Codec configuration
///
/// The compression version is recorded by the storage engine alongside the
/// database and handed back on every encode and decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub compression_version: u32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            compression_version: CURRENT_COMPRESSION_VERSION,
        }
    }
}

impl CodecConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CodecConfig = serde_json::from_str(json).map_err(|e| {
            tracing::debug!(error = %e, "rejecting codec configuration");
            CodecError::Config(e.to_string())
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| CodecError::Config(e.to_string()))
    }

    /// Reject compression versions this crate cannot produce.
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_COMPRESSION_VERSIONS.contains(&self.compression_version) {
            return Err(CodecError::UnsupportedCompressionVersion(
                self.compression_version,
            ));
        }
        Ok(())
    }
}

/// A transaction output record as loaded from the UTXO database
///
/// The script is kept in compressed form; `script()` decompresses it on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedTxOut {
    /// Decompressed amount, zero when the record carried no amount
    pub amount: Amount,
    pub script_version: u16,
    pub compressed_script: ByteString,
    /// Number of bytes the record occupied in the serialized input
    pub bytes_read: usize,
}

impl CompressedTxOut {
    /// Decompress the stored script.
    pub fn script(&self, compression_version: u32) -> Result<ByteString> {
        crate::script_compression::decompress_script(&self.compressed_script, compression_version)
    }

    /// Amount in the compressed domain, as it would be written back.
    pub fn compressed_amount(&self) -> u64 {
        crate::amount::compress_amount(self.amount as u64)
    }

    /// Classify the stored script without decompressing it.
    pub fn script_class(&self) -> ScriptClass {
        match crate::vlq::deserialize_vlq(&self.compressed_script) {
            Ok((CST_PAY_TO_PUBKEY_HASH, _)) if self.compressed_script.len() > 1 => {
                ScriptClass::PubKeyHash
            }
            Ok((CST_PAY_TO_SCRIPT_HASH, _)) => ScriptClass::ScriptHash,
            Ok((CST_PAY_TO_PUBKEY_COMP_EVEN, _)) | Ok((CST_PAY_TO_PUBKEY_COMP_ODD, _)) => {
                ScriptClass::PubKeyCompressed
            }
            Ok((CST_PAY_TO_PUBKEY_UNCOMP_EVEN, _)) | Ok((CST_PAY_TO_PUBKEY_UNCOMP_ODD, _)) => {
                ScriptClass::PubKeyUncompressed
            }
            _ => ScriptClass::NonStandard,
        }
    }
}

/// The four shapes a compressed transaction output record can be written in
///
/// Whether the amount is present and whether the script is already compressed
/// are not recorded in the bytes; the storage engine tracks them out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxOutRecord<'a> {
    /// Amount and raw script, both compressed on write
    Full {
        amount: u64,
        script_version: u16,
        script: &'a [u8],
    },
    /// Raw script only, compressed on write
    NoAmount { script_version: u16, script: &'a [u8] },
    /// Amount plus a script that is already compressed
    PreCompressed {
        amount: u64,
        script_version: u16,
        compressed_script: &'a [u8],
    },
    /// Already compressed script only
    PreCompressedNoAmount {
        script_version: u16,
        compressed_script: &'a [u8],
    },
}

impl<'a> TxOutRecord<'a> {
    /// Build the record shape selected by the two storage-engine flags.
    pub fn new(
        amount: u64,
        script_version: u16,
        script: &'a [u8],
        pre_compressed: bool,
        has_amount: bool,
    ) -> Self {
        match (pre_compressed, has_amount) {
            (false, true) => TxOutRecord::Full {
                amount,
                script_version,
                script,
            },
            (false, false) => TxOutRecord::NoAmount {
                script_version,
                script,
            },
            (true, true) => TxOutRecord::PreCompressed {
                amount,
                script_version,
                compressed_script: script,
            },
            (true, false) => TxOutRecord::PreCompressedNoAmount {
                script_version,
                compressed_script: script,
            },
        }
    }

    pub fn has_amount(&self) -> bool {
        matches!(
            self,
            TxOutRecord::Full { .. } | TxOutRecord::PreCompressed { .. }
        )
    }

    pub fn is_pre_compressed(&self) -> bool {
        matches!(
            self,
            TxOutRecord::PreCompressed { .. } | TxOutRecord::PreCompressedNoAmount { .. }
        )
    }
}
