//! Transaction flags byte
//!
//! Details about a transaction needed to decide how its outputs may be spent
//! are packed into one byte, bit index in zeroeth order:
//!
//! ```text
//!   0: is coinbase
//!   1: has an expiry
//! 2-3: transaction type
//!   4: fully spent
//! 5-7: unused
//! ```
//!
//! Fully spent must remain the highest assigned bit. New flags go in bits 5-7
//! so bytes already written keep their meaning.

use crate::constants::*;
use crate::types::*;

/// Encode transaction flags into a single byte
pub fn encode_flags(is_coinbase: bool, has_expiry: bool, tx_type: TxType, fully_spent: bool) -> u8 {
    let mut b = (tx_type as u8) << TX_TYPE_SHIFT;
    if is_coinbase {
        b |= TX_FLAG_COINBASE;
    }
    if has_expiry {
        b |= TX_FLAG_HAS_EXPIRY;
    }
    if fully_spent {
        b |= TX_FLAG_FULLY_SPENT;
    }
    b
}

/// Decode a flags byte into (is coinbase, has expiry, tx type, fully spent)
pub fn decode_flags(b: u8) -> (bool, bool, TxType, bool) {
    let is_coinbase = b & TX_FLAG_COINBASE != 0;
    let has_expiry = b & TX_FLAG_HAS_EXPIRY != 0;
    let tx_type = TxType::from_bits((b & TX_TYPE_BITMASK) >> TX_TYPE_SHIFT);
    let fully_spent = decode_flags_fully_spent(b);
    (is_coinbase, has_expiry, tx_type, fully_spent)
}

/// Whether the fully spent bit is set
pub fn decode_flags_fully_spent(b: u8) -> bool {
    b & TX_FLAG_FULLY_SPENT != 0
}

impl TxFlags {
    pub fn to_byte(&self) -> u8 {
        encode_flags(self.is_coinbase, self.has_expiry, self.tx_type, self.fully_spent)
    }

    /// Decode a flags byte; bits 5-7 are ignored.
    pub fn from_byte(b: u8) -> Self {
        let (is_coinbase, has_expiry, tx_type, fully_spent) = decode_flags(b);
        TxFlags {
            is_coinbase,
            has_expiry,
            tx_type,
            fully_spent,
        }
    }
}

impl From<u8> for TxFlags {
    fn from(b: u8) -> Self {
        TxFlags::from_byte(b)
    }
}

impl From<TxFlags> for u8 {
    fn from(flags: TxFlags) -> Self {
        flags.to_byte()
    }
}
