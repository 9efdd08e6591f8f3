//! Initial-value normalizer and the accelerated step function.
//!
//! A raw trajectory alternates an even phase (halving, with negation for
//! Bridge) and an odd phase (`3n ± 1`). The accelerated form folds one odd
//! step and the whole even run that follows it into a single odd -> odd
//! transition:
//!
//! ```text
//! Wall   : n -> O±(n)
//! Bridge : n -> (-1)^v2(3n ± 1) * O±(n)
//! ```
//!
//! The Bridge correction accounts for one negation per real halving.
//!
//! # Examples
//!
//! ```
//! use collatz_family::{normalize_initial, step, Family, Shape};
//! use num_bigint::BigInt;
//!
//! // 12 = 3 * 2^2: two halvings, so Bridge keeps the sign.
//! assert_eq!(normalize_initial(&BigInt::from(12), Shape::Bridge), BigInt::from(3));
//! // 6 = 3 * 2^1: one halving, so Bridge negates.
//! assert_eq!(normalize_initial(&BigInt::from(6), Shape::Bridge), BigInt::from(-3));
//!
//! // 3 -> 10 -> -5 under B+1.
//! assert_eq!(step(&BigInt::from(3), Family::B_PLUS), BigInt::from(-5));
//! ```

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::arith::{accelerate, odd_part};
use crate::family::{Family, OddSign, Shape};

/// A concrete odd -> odd step, resolved once per family.
pub type StepFn = fn(&BigInt) -> BigInt;

/// Collapse the initial even phase of `n0` into an odd starting value.
///
/// Zero maps to 1 (odd-zero convention). Otherwise every factor of two is
/// removed; under Bridge the result is negated when the number of halvings
/// is odd.
pub fn normalize_initial(n0: &BigInt, shape: Shape) -> BigInt {
    if n0.is_zero() {
        return BigInt::one();
    }
    let (odd, k) = odd_part(n0);
    match shape {
        Shape::Bridge if k & 1 == 1 => -odd,
        _ => odd,
    }
}

/// Apply one accelerated step of `family` to the odd value `n`.
///
/// Convenience form of `family.stepper()(n)`.
#[inline]
pub fn step(n: &BigInt, family: Family) -> BigInt {
    (family.stepper())(n)
}

fn wall_plus(n: &BigInt) -> BigInt {
    accelerate(n, 1).0
}

fn wall_minus(n: &BigInt) -> BigInt {
    accelerate(n, -1).0
}

fn bridge_plus(n: &BigInt) -> BigInt {
    bridge(n, 1)
}

fn bridge_minus(n: &BigInt) -> BigInt {
    bridge(n, -1)
}

#[inline]
fn bridge(n: &BigInt, c: i32) -> BigInt {
    let (next, k) = accelerate(n, c);
    if k & 1 == 1 {
        -next
    } else {
        next
    }
}

impl Family {
    /// Resolve this family into its concrete step function.
    #[inline]
    pub const fn stepper(self) -> StepFn {
        match (self.shape, self.sign) {
            (Shape::Wall, OddSign::Plus) => wall_plus,
            (Shape::Wall, OddSign::Minus) => wall_minus,
            (Shape::Bridge, OddSign::Plus) => bridge_plus,
            (Shape::Bridge, OddSign::Minus) => bridge_minus,
        }
    }
}
