//! Variable-length quantity (VLQ) integer encoding
//!
//! A VLQ is an MSB-first base-128 encoding where the high bit of each byte
//! indicates whether another byte follows. To rule out redundant encodings, one
//! is subtracted every time a group of 7 bits is shifted out, so every integer
//! has exactly one representation and every representation stands for exactly
//! one integer.
//!
//! Values 0-127 take a single byte, 128-16511 two bytes and 16512-2113663 three
//! bytes:
//!
//! ```text
//!          0 -> [0x00]
//!        127 -> [0x7f]                  max 1-byte value
//!        128 -> [0x80 0x00]
//!      16511 -> [0xff 0x7f]             max 2-byte value
//!      16512 -> [0x80 0x80 0x00]
//!    2113663 -> [0xff 0xff 0x7f]        max 3-byte value
//!  270549119 -> [0xff 0xff 0xff 0x7f]   max 4-byte value
//!     2^64-1 -> [0x80 0xfe 0xfe 0xfe 0xfe 0xfe 0xfe 0xfe 0xfe 0x7f]
//! ```

use crate::constants::MAX_VLQ_SIZE;
use crate::error::{ensure_capacity, CodecError, Result};

/// Number of bytes `n` occupies when serialized as a VLQ
pub fn serialize_size_vlq(mut n: u64) -> usize {
    let mut size = 1;
    while n > 0x7f {
        n = (n >> 7) - 1;
        size += 1;
    }
    size
}

/// Serialize `n` as a VLQ into the front of `target`
///
/// Returns the number of bytes written. Fails without touching `target` when it
/// is shorter than `serialize_size_vlq(n)`.
pub fn put_vlq(target: &mut [u8], n: u64) -> Result<usize> {
    let size = serialize_size_vlq(n);
    ensure_capacity(target, size)?;

    let mut scratch = [0u8; MAX_VLQ_SIZE];
    let len = encode_reversed(&mut scratch, n);
    for (dst, src) in target[..len].iter_mut().zip(scratch[..len].iter().rev()) {
        *dst = *src;
    }
    Ok(len)
}

/// Append the VLQ serialization of `n` to `buf`
pub fn append_vlq(buf: &mut Vec<u8>, n: u64) -> usize {
    let mut scratch = [0u8; MAX_VLQ_SIZE];
    let len = encode_reversed(&mut scratch, n);
    buf.extend(scratch[..len].iter().rev());
    len
}

/// Deserialize a VLQ from the front of `serialized`
///
/// Returns the value and the number of bytes consumed. Trailing bytes after the
/// terminal byte are left alone.
pub fn deserialize_vlq(serialized: &[u8]) -> Result<(u64, usize)> {
    let mut n: u64 = 0;
    for (i, &val) in serialized.iter().enumerate() {
        if n > (u64::MAX >> 7) {
            return Err(CodecError::deserialize(format!(
                "VLQ overflows 64 bits after {} bytes",
                i
            )));
        }
        n = (n << 7) | u64::from(val & 0x7f);
        if val & 0x80 != 0x80 {
            return Ok((n, i + 1));
        }
        n = n.checked_add(1).ok_or_else(|| {
            CodecError::deserialize(format!("VLQ overflows 64 bits after {} bytes", i + 1))
        })?;
    }

    tracing::trace!(len = serialized.len(), "truncated VLQ");
    Err(CodecError::deserialize(format!(
        "unexpected end of data reading VLQ (read {} bytes without a terminal byte)",
        serialized.len()
    )))
}

/// Emit the encoding least significant group first; callers reverse it.
fn encode_reversed(scratch: &mut [u8; MAX_VLQ_SIZE], mut n: u64) -> usize {
    let mut offset = 0;
    loop {
        // The high bit is set when another byte follows.
        let high_bit = if offset == 0 { 0x00 } else { 0x80 };
        scratch[offset] = (n & 0x7f) as u8 | high_bit;
        if n <= 0x7f {
            break;
        }
        n = (n >> 7) - 1;
        offset += 1;
    }
    offset + 1
}
