//! Error types for UTXO compression and decompression

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Deserialization failed: {0}")]
    Deserialize(String),

    #[error("Insufficient capacity: need {needed} bytes, have {available}")]
    InsufficientCapacity { needed: usize, available: usize },

    #[error("Invalid public key: {0}")]
    InvalidPubKey(String),

    #[error("Unsupported compression version: {0}")]
    UnsupportedCompressionVersion(u32),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CodecError {
    /// Shorthand for a malformed-input error.
    pub fn deserialize(msg: impl Into<String>) -> Self {
        CodecError::Deserialize(msg.into())
    }

    /// Returns true when the error originates from corrupt or truncated input.
    pub fn is_deserialize(&self) -> bool {
        matches!(self, CodecError::Deserialize(_) | CodecError::InvalidPubKey(_))
    }
}

/// Fails with `InsufficientCapacity` unless `target` can hold `needed` bytes.
pub(crate) fn ensure_capacity(target: &[u8], needed: usize) -> Result<()> {
    if target.len() < needed {
        return Err(CodecError::InsufficientCapacity {
            needed,
            available: target.len(),
        });
    }
    Ok(())
}

pub type Result<T> = std::result::Result<T, CodecError>;
