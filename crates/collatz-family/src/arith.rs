//! Arithmetic primitives: 2-adic valuation and the accelerated operators.
//!
//! ```text
//! v2(x)  = max { k : 2^k | x }            (v2(0) = 0 by convention)
//! O+(m)  = (3m + 1) / 2^v2(3m + 1)        O+(0) = +1
//! O-(m)  = (3m - 1) / 2^v2(3m - 1)        O-(0) = -1
//! ```
//!
//! The quotient keeps the sign of `3m ± 1`. Division is always exact, so the
//! arithmetic right shift used below never rounds.
//!
//! # Examples
//!
//! ```
//! use collatz_family::{accelerated_step_negative, accelerated_step_positive, valuation2};
//! use num_bigint::BigInt;
//!
//! assert_eq!(valuation2(&BigInt::from(-24)), 3);
//! assert_eq!(accelerated_step_positive(&BigInt::from(7)), BigInt::from(11));
//! assert_eq!(accelerated_step_negative(&BigInt::from(7)), BigInt::from(5));
//! assert_eq!(accelerated_step_negative(&BigInt::from(0)), BigInt::from(-1));
//! ```

use num_bigint::BigInt;
use num_traits::{One, Zero};

/// Exponent of the largest power of two dividing `|x|`.
///
/// Returns 0 for `x = 0`. That value is never used as a division exponent:
/// every caller special-cases zero first.
#[inline]
pub fn valuation2(x: &BigInt) -> u64 {
    x.trailing_zeros().unwrap_or(0)
}

/// Split `x` into its odd part and the number of halvings removed.
///
/// `odd_part(x) = (x / 2^k, k)` with `k = v2(x)`. Zero maps to `(0, 0)`.
#[inline]
pub fn odd_part(x: &BigInt) -> (BigInt, u64) {
    let k = valuation2(x);
    (x >> k, k)
}

/// Shared core of both operators: `3m + c` with its full power of two
/// removed, plus the number of halvings.
///
/// `m = 0` follows the odd-zero convention and yields `(c, 0)`.
#[inline]
pub(crate) fn accelerate(m: &BigInt, c: i32) -> (BigInt, u64) {
    if m.is_zero() {
        return (BigInt::from(c), 0);
    }
    let x: BigInt = m * 3i32 + c;
    odd_part(&x)
}

/// `O+(m)`: one accelerated `3m + 1` step.
#[inline]
pub fn accelerated_step_positive(m: &BigInt) -> BigInt {
    if m.is_zero() {
        return BigInt::one();
    }
    accelerate(m, 1).0
}

/// `O-(m)`: one accelerated `3m - 1` step.
#[inline]
pub fn accelerated_step_negative(m: &BigInt) -> BigInt {
    if m.is_zero() {
        return -BigInt::one();
    }
    accelerate(m, -1).0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: i64) -> BigInt {
        BigInt::from(v)
    }

    #[test]
    fn valuation_of_zero_is_zero() {
        assert_eq!(valuation2(&big(0)), 0);
    }

    #[test]
    fn valuation_ignores_sign() {
        for (x, k) in [(1, 0), (2, 1), (12, 2), (-12, 2), (-64, 6), (96, 5), (-7, 0)] {
            assert_eq!(valuation2(&big(x)), k, "v2({x})");
        }
    }

    #[test]
    fn valuation_beyond_machine_words() {
        let x = BigInt::from(3) << 200u32;
        assert_eq!(valuation2(&x), 200);
        assert_eq!(valuation2(&-x), 200);
    }

    #[test]
    fn odd_part_strips_all_twos() {
        assert_eq!(odd_part(&big(40)), (big(5), 3));
        assert_eq!(odd_part(&big(-40)), (big(-5), 3));
        assert_eq!(odd_part(&big(9)), (big(9), 0));
        assert_eq!(odd_part(&big(0)), (big(0), 0));
    }

    #[test]
    fn positive_operator_values() {
        // 3*1+1 = 4 -> 1; 3*3+1 = 10 -> 5; 3*5+1 = 16 -> 1; 3*-1+1 = -2 -> -1
        assert_eq!(accelerated_step_positive(&big(1)), big(1));
        assert_eq!(accelerated_step_positive(&big(3)), big(5));
        assert_eq!(accelerated_step_positive(&big(5)), big(1));
        assert_eq!(accelerated_step_positive(&big(-1)), big(-1));
        assert_eq!(accelerated_step_positive(&big(-5)), big(-7));
        assert_eq!(accelerated_step_positive(&big(-7)), big(-5));
    }

    #[test]
    fn negative_operator_values() {
        // 3*1-1 = 2 -> 1; 3*-1-1 = -4 -> -1; 3*5-1 = 14 -> 7; 3*7-1 = 20 -> 5
        assert_eq!(accelerated_step_negative(&big(1)), big(1));
        assert_eq!(accelerated_step_negative(&big(-1)), big(-1));
        assert_eq!(accelerated_step_negative(&big(5)), big(7));
        assert_eq!(accelerated_step_negative(&big(7)), big(5));
    }

    #[test]
    fn odd_zero_convention() {
        assert_eq!(accelerated_step_positive(&big(0)), big(1));
        assert_eq!(accelerated_step_negative(&big(0)), big(-1));
        assert_eq!(accelerate(&big(0), 1), (big(1), 0));
        assert_eq!(accelerate(&big(0), -1), (big(-1), 0));
    }

    #[test]
    fn operators_mirror_each_other() {
        for m in (-301i64..=301).step_by(2) {
            assert_eq!(
                accelerated_step_negative(&big(-m)),
                -accelerated_step_positive(&big(m)),
                "O-(-m) = -O+(m) at m = {m}"
            );
        }
    }

    #[test]
    fn operators_return_odd_values_for_odd_inputs() {
        for m in (-999i64..=999).step_by(2) {
            let p = accelerated_step_positive(&big(m));
            let n = accelerated_step_negative(&big(m));
            assert_eq!(valuation2(&p), 0, "O+({m}) = {p} is even");
            assert_eq!(valuation2(&n), 0, "O-({m}) = {n} is even");
        }
    }
}
