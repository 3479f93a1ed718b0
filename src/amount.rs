//! Domain-specific amount compression
//!
//! Typical amounts carry many trailing zeros. The compressed form trades one
//! `u64` for another of much smaller magnitude, which then takes fewer bytes as
//! a VLQ. For example 0.1 coin, 10000000 atoms, takes 4 bytes as a VLQ while its
//! compressed value 8 takes 1.
//!
//! The value is split into an exponent `e` in [0, 9] and, when possible, a last
//! non-zero digit `d` in [1, 9]:
//! - 0 is 0
//! - `e` is the largest power of 10 (at most 9) dividing the value
//! - when `e < 9`, `d` is the final digit and `n` the value divided by 10 once
//!   more; the result is `1 + 10*(9*n + d - 1) + e`
//! - when `e == 9`, the result is `1 + 10*(n - 1) + 9`, i.e. `10 + 10*(n - 1)`
//!
//! ```text
//!          0 -> 0
//!       1000 -> 4
//!      10000 -> 5
//!   12345678 -> 111111101
//!   50000000 -> 48
//!  100000000 -> 9
//!  500000000 -> 49
//! 1000000000 -> 10
//! ```

/// Compress an amount
///
/// The mapping is a bijection for every amount up to `u64::MAX / 9`, far above
/// any monetary supply. Larger inputs wrap exactly as the on-disk format always
/// has rather than panicking.
pub fn compress_amount(mut amount: u64) -> u64 {
    if amount == 0 {
        return 0;
    }

    let mut exponent = 0u64;
    while amount % 10 == 0 && exponent < 9 {
        amount /= 10;
        exponent += 1;
    }

    if exponent < 9 {
        let last_digit = amount % 10;
        amount /= 10;
        return 9u64
            .wrapping_mul(amount)
            .wrapping_add(last_digit - 1)
            .wrapping_mul(10)
            .wrapping_add(1 + exponent);
    }

    10u64.wrapping_mul(amount - 1).wrapping_add(10)
}

/// Recover the amount a compressed value stands for
///
/// Exact inverse of `compress_amount`. Values no amount compresses to wrap
/// instead of panicking.
pub fn decompress_amount(compressed: u64) -> u64 {
    if compressed == 0 {
        return 0;
    }

    // x = 1 + 10*(9*n + d - 1) + e  or  x = 1 + 10*(n - 1) + 9
    let x = compressed - 1;
    let mut exponent = x % 10;
    let x = x / 10;

    let mut n = if exponent < 9 {
        let last_digit = x % 9 + 1;
        (x / 9).wrapping_mul(10).wrapping_add(last_digit)
    } else {
        x + 1
    };

    while exponent > 0 {
        n = n.wrapping_mul(10);
        exponent -= 1;
    }
    n
}
