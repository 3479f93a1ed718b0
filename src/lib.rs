//! # UTXO Compression
//!
//! Domain-specific binary encoding of the unspent transaction output set.
//!
//! This crate provides pure, side-effect-free functions that turn transaction
//! output amounts and public key scripts into the compact byte records a full
//! node keeps in its UTXO database, and back again.
//!
//! ## Architecture
//!
//! The codec is built from small layers:
//! - VLQ integers (`vlq`)
//! - Standard script recognition (`script`)
//! - Script compression (`script_compression`)
//! - Amount compression (`amount`)
//! - Transaction flags (`flags`)
//! - Compressed transaction output records (`txout`)
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every operation is deterministic and side-effect-free
//! 2. **Exact Formats**: Bytes match what existing databases already hold
//! 3. **Panic-Free Decoding**: Corrupt or truncated input is an error, never a panic
//! 4. **Checked Writes**: Undersized buffers are reported, never overrun
//!
//! ## Usage
//!
//! ```rust
//! use utxo_compression::UtxoCodec;
//! use utxo_compression::script::pay_to_pubkey_hash_script;
//!
//! let codec = UtxoCodec::new();
//! let script = pay_to_pubkey_hash_script(&[0x42; 20]);
//! let bytes = codec.compress_txout(100_000_000, 0, &script).unwrap();
//! assert_eq!(bytes.len(), 23);
//!
//! let txout = codec.decode_txout(&bytes, true).unwrap();
//! assert_eq!(txout.amount, 100_000_000);
//! assert_eq!(codec.decompress_script(&txout.compressed_script).unwrap(), script);
//! ```

pub mod types;
pub mod constants;
pub mod vlq;
pub mod script;
pub mod script_compression;
pub mod amount;
pub mod flags;
pub mod txout;
pub mod error;

// Re-export commonly used types
pub use types::*;
pub use constants::*;
pub use error::{CodecError, Result};

pub use amount::{compress_amount, decompress_amount};
pub use flags::{decode_flags, decode_flags_fully_spent, encode_flags};
pub use script_compression::{
    compress_script, compressed_script_size, decode_compressed_script_size, decompress_script,
    put_compressed_script,
};
pub use txout::{compressed_txout_size, decode_compressed_txout, put_compressed_txout};
pub use vlq::{append_vlq, deserialize_vlq, put_vlq, serialize_size_vlq};

/// UTXO codec bound to a compression version
///
/// # Examples
///
/// ```
/// use utxo_compression::{CodecConfig, UtxoCodec};
///
/// let codec = UtxoCodec::with_config(CodecConfig::default()).unwrap();
/// assert_eq!(codec.compression_version(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UtxoCodec {
    config: CodecConfig,
}

impl UtxoCodec {
    /// Create a codec writing the current compression version
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec from a validated configuration
    pub fn with_config(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        tracing::debug!(compression_version = config.compression_version, "utxo codec configured");
        Ok(Self { config })
    }

    pub fn config(&self) -> CodecConfig {
        self.config
    }

    pub fn compression_version(&self) -> u32 {
        self.config.compression_version
    }

    /// Number of bytes `script` occupies once compressed
    pub fn compressed_script_size(&self, script_version: u16, script: &[u8]) -> usize {
        script_compression::compressed_script_size(
            script_version,
            script,
            self.compression_version(),
        )
    }

    /// Compress a public key script
    ///
    /// # Examples
    ///
    /// ```
    /// use utxo_compression::UtxoCodec;
    ///
    /// let codec = UtxoCodec::new();
    /// // Non-standard scripts are stored verbatim behind their size plus 64.
    /// assert_eq!(codec.compress_script(0, &[0x51]).unwrap(), vec![0x41, 0x51]);
    /// ```
    pub fn compress_script(&self, script_version: u16, script: &[u8]) -> Result<ByteString> {
        script_compression::compress_script(script_version, script, self.compression_version())
    }

    /// Decompress a compressed public key script
    pub fn decompress_script(&self, compressed: &[u8]) -> Result<ByteString> {
        script_compression::decompress_script(compressed, self.compression_version())
    }

    /// Number of bytes a transaction output record occupies
    pub fn compressed_txout_size(&self, record: &TxOutRecord<'_>) -> usize {
        record.serialized_size(self.compression_version())
    }

    /// Serialize a transaction output record into `target`
    pub fn put_txout(&self, target: &mut [u8], record: &TxOutRecord<'_>) -> Result<usize> {
        record.put(target, self.compression_version())
    }

    /// Compress an amount and raw script into a full record
    ///
    /// # Examples
    ///
    /// ```
    /// use utxo_compression::UtxoCodec;
    ///
    /// let codec = UtxoCodec::new();
    /// let bytes = codec.compress_txout(1_000, 0, &[0x51]).unwrap();
    /// assert_eq!(bytes, vec![0x04, 0x00, 0x41, 0x51]);
    /// ```
    pub fn compress_txout(
        &self,
        amount: u64,
        script_version: u16,
        script: &[u8],
    ) -> Result<ByteString> {
        TxOutRecord::Full {
            amount,
            script_version,
            script,
        }
        .to_bytes(self.compression_version())
    }

    /// Decode a transaction output record, leaving its script compressed
    pub fn decode_txout(&self, serialized: &[u8], has_amount: bool) -> Result<CompressedTxOut> {
        txout::decode_compressed_txout(serialized, self.compression_version(), has_amount)
    }

    /// Decode a transaction output record and decompress its script
    pub fn decode_txout_full(
        &self,
        serialized: &[u8],
        has_amount: bool,
    ) -> Result<(Amount, u16, ByteString)> {
        let txout = self.decode_txout(serialized, has_amount)?;
        let script = txout.script(self.compression_version())?;
        Ok((txout.amount, txout.script_version, script))
    }
}
