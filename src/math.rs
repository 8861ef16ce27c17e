//! Integer-width polymorphism and small numeric primitives shared by every
//! component of the counting engine.
//!
//! The reference implementation this engine is modeled on monomorphizes its
//! hot loops over `{uint64_t, int128_t}` by hand rather than using one
//! generic code path, because 128-bit division is far slower than 64-bit
//! division on every current CPU. We keep that shape: [`Wide`] is
//! implemented for exactly `u64` and `u128`, and callers pick whichever one
//! `x` actually needs instead of always paying for 128-bit arithmetic.

use num_traits::{One, PrimInt, Zero};
use std::fmt::Debug;
use std::ops::{AddAssign, SubAssign};

/// A value type wide enough to hold `x` and quantities derived from it.
///
/// Implemented only for `u64` and `u128`; see the module docs for why this
/// is not a blanket impl over every integer type.
pub trait Wide:
    PrimInt + AddAssign + SubAssign + Zero + One + Debug + Send + Sync + 'static
{
    /// `self` widened to `u128` for overflow-free arithmetic at call sites
    /// that mix widths.
    fn as_u128(self) -> u128;
    /// Truncating narrow to `u64`, valid whenever the caller has already
    /// proven `self <= u64::MAX`.
    fn as_u64_trunc(self) -> u64;
    fn from_u64(v: u64) -> Self;
}

impl Wide for u64 {
    fn as_u128(self) -> u128 {
        self as u128
    }
    fn as_u64_trunc(self) -> u64 {
        self
    }
    fn from_u64(v: u64) -> Self {
        v
    }
}

impl Wide for u128 {
    fn as_u128(self) -> u128 {
        self
    }
    fn as_u64_trunc(self) -> u64 {
        self as u64
    }
    fn from_u64(v: u64) -> Self {
        v as u128
    }
}

/// Integer square root via Newton's method with a floating-point seed,
/// corrected by at most one step in either direction.
pub fn isqrt(n: u128) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut r = (n as f64).sqrt() as u128;
    // Floating point seeds can be off by one near perfect squares once n
    // exceeds the f64 mantissa (2^53); nudge back into range with integer
    // comparisons only.
    while r > 0 && r * r > n {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= n {
        r += 1;
    }
    r as u64
}

/// Integer cube root, corrected the same way as [`isqrt`].
pub fn icbrt(n: u128) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut r = (n as f64).cbrt() as u128;
    while r > 0 && r * r * r > n {
        r -= 1;
    }
    while (r + 1) * (r + 1) * (r + 1) <= n {
        r += 1;
    }
    r as u64
}

/// Integer fourth root, used for Gourdon's `k = get_k(x) = get_c(x^(1/4))`.
pub fn ifourthrt(n: u128) -> u64 {
    isqrt(isqrt(n) as u128)
}

#[inline]
pub fn ceil_div(a: u64, b: u64) -> u64 {
    (a + b - 1) / b
}

#[inline]
pub fn ceil_div_u128(a: u128, b: u128) -> u128 {
    (a + b - 1) / b
}

/// 128-by-64 division producing a 64-bit quotient, used at every hot
/// division site inside the leaf formulas (`x / (prime * m)` etc.). The
/// reference implementation hand-rolls a `divq`/libdivide fallback here;
/// Rust's native `u128 / u64` division already compiles to the hardware
/// division instruction on every target we support, so this function exists
/// only to keep call sites self-documenting and to assert the precondition.
#[inline]
pub fn div_128_64(a: u128, b: u64) -> u64 {
    debug_assert!(b != 0);
    (a / b as u128) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isqrt_matches_known_values() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(99), 9);
        assert_eq!(isqrt(100), 10);
        assert_eq!(isqrt(101), 10);
        assert_eq!(isqrt(10u128.pow(30)), 10u64.pow(15));
    }

    #[test]
    fn icbrt_matches_known_values() {
        assert_eq!(icbrt(0), 0);
        assert_eq!(icbrt(7), 1);
        assert_eq!(icbrt(8), 2);
        assert_eq!(icbrt(26), 2);
        assert_eq!(icbrt(27), 3);
        assert_eq!(icbrt(10u128.pow(30)), 10u64.pow(10));
    }

    #[test]
    fn wide_roundtrips_u64_and_u128() {
        assert_eq!(42u64.as_u128(), 42u128);
        assert_eq!(42u128.as_u64_trunc(), 42u64);
        assert_eq!(u64::from_u64(7), 7u64);
        assert_eq!(u128::from_u64(7), 7u128);
    }
}
