// In: src/kernels/math.rs

//! This module contains the pure, stateless arithmetic kernels used by the
//! sieve engine. They are fully panic-free for the documented input domains.

use num_traits::{PrimInt, Unsigned};

//==================================================================================
// 1. Multiple Alignment
//==================================================================================

/// Returns the smallest multiple of `n` greater than or equal to `m`.
///
/// This is the alignment step of the segment pass: the first multiple of a
/// sieving prime that lands inside a new segment.
///
/// `n` must be strictly positive.
pub fn smallest_multiple_geq<T>(n: T, m: T) -> T
where
    T: PrimInt + Unsigned,
{
    m + ((n - m % n) % n)
}

//==================================================================================
// 2. Integer Square Root
//==================================================================================

/// Returns `floor(sqrt(n))` using Newton's method on integers.
///
/// The initial guess is the power of two just above `sqrt(n)`, so every
/// intermediate value stays well below `u64::MAX` and the iteration converges
/// downward to the floor.
pub fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let shift = (u64::BITS - n.leading_zeros() + 1) / 2;
    let mut x = 1u64 << shift; // x >= sqrt(n)
    let mut y = (x + n / x) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}
