//! Protocol constants for the UTXO compression format
//!
//! Every value in this file is serialized into the UTXO database and must stay
//! stable for long-term storage.

/// Current script compression version of the database
pub const CURRENT_COMPRESSION_VERSION: u32 = 1;

/// Compression versions this crate knows how to read and write
pub const SUPPORTED_COMPRESSION_VERSIONS: &[u32] = &[CURRENT_COMPRESSION_VERSION];

// Opcodes matched by the script classifier. They are never executed here.

/// OP_DATA_20: push the next 20 bytes
pub const OP_DATA_20: u8 = 0x14;

/// OP_DATA_33: push the next 33 bytes
pub const OP_DATA_33: u8 = 0x21;

/// OP_DATA_65: push the next 65 bytes
pub const OP_DATA_65: u8 = 0x41;

/// OP_DUP
pub const OP_DUP: u8 = 0x76;

/// OP_EQUAL
pub const OP_EQUAL: u8 = 0x87;

/// OP_EQUALVERIFY
pub const OP_EQUALVERIFY: u8 = 0x88;

/// OP_HASH160
pub const OP_HASH160: u8 = 0xa9;

/// OP_CHECKSIG
pub const OP_CHECKSIG: u8 = 0xac;

// Compressed script type tags.

/// Compressed pay-to-pubkey-hash script
pub const CST_PAY_TO_PUBKEY_HASH: u64 = 0;

/// Compressed pay-to-script-hash script
pub const CST_PAY_TO_SCRIPT_HASH: u64 = 1;

/// Compressed pay-to-pubkey script to a compressed key with even y
pub const CST_PAY_TO_PUBKEY_COMP_EVEN: u64 = 2;

/// Compressed pay-to-pubkey script to a compressed key with odd y
pub const CST_PAY_TO_PUBKEY_COMP_ODD: u64 = 3;

/// Compressed pay-to-pubkey script to an uncompressed key with even y
pub const CST_PAY_TO_PUBKEY_UNCOMP_EVEN: u64 = 4;

/// Compressed pay-to-pubkey script to an uncompressed key with odd y
pub const CST_PAY_TO_PUBKEY_UNCOMP_ODD: u64 = 5;

/// Number of script type slots reserved ahead of the general encoding.
///
/// Any encoded size of 64 or above is `raw script length + 64`. Only six slots
/// are assigned; the remainder is reserved for future special scripts.
pub const NUM_SPECIAL_SCRIPTS: u64 = 64;

// Script and payload sizes.

/// Length of a pay-to-pubkey-hash script
pub const P2PKH_SCRIPT_LEN: usize = 25;

/// Length of a pay-to-script-hash script
pub const P2SH_SCRIPT_LEN: usize = 23;

/// Length of a pay-to-compressed-pubkey script
pub const P2PK_COMPRESSED_SCRIPT_LEN: usize = 35;

/// Length of a pay-to-uncompressed-pubkey script
pub const P2PK_UNCOMPRESSED_SCRIPT_LEN: usize = 67;

/// Length of a RIPEMD160 hash
pub const HASH160_LEN: usize = 20;

/// Length of a secp256k1 X coordinate
pub const PUBKEY_X_LEN: usize = 32;

/// Compressed size of a P2PKH or P2SH script: tag + 20-byte hash
pub const COMPRESSED_HASH_SCRIPT_SIZE: usize = 1 + HASH160_LEN;

/// Compressed size of any P2PK script: tag + 32-byte X coordinate
pub const COMPRESSED_PUBKEY_SCRIPT_SIZE: usize = 1 + PUBKEY_X_LEN;

// Transaction flag bits.

/// Bit 0: coinbase
pub const TX_FLAG_COINBASE: u8 = 0x01;

/// Bit 1: has an expiry
pub const TX_FLAG_HAS_EXPIRY: u8 = 0x02;

/// Bits 2-3: transaction type
pub const TX_TYPE_BITMASK: u8 = 0x0c;

/// Shift applied to the transaction type within the flags byte
pub const TX_TYPE_SHIFT: u8 = 2;

/// Bit 4: fully spent. Must stay the highest assigned flag.
pub const TX_FLAG_FULLY_SPENT: u8 = 0x10;

/// Largest number of bytes a `u64` VLQ can occupy
pub const MAX_VLQ_SIZE: usize = 10;
