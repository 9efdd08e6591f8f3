//! ABS1 gating and known trivial cycles.
//!
//! Two independent questions are asked of every closed cycle:
//!
//! - [`is_canonical_attractor`] decides the label (`ABS1` vs `NON-ABS1`).
//! - [`is_known_trivial_cycle`] only decides whether a `NON-ABS1` cycle is
//!   worth reporting as "unknown".
//!
//! A cycle can be trivial without being ABS1: under `W+1`, `[-1]` is a
//! closed loop in the unstable negative domain, so it is labeled
//! `NON-ABS1` but never reported.
//!
//! # Examples
//!
//! ```
//! use collatz_family::{is_canonical_attractor, is_known_trivial_cycle, Family};
//! use num_bigint::BigInt;
//!
//! let minus_one = [BigInt::from(-1)];
//! assert!(is_canonical_attractor(&minus_one, Family::B_PLUS));
//! assert!(!is_canonical_attractor(&minus_one, Family::W_PLUS));
//! assert!(is_known_trivial_cycle(&minus_one));
//! ```

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed};

use crate::family::{Family, OddSign};

/// Absolute values of the raw short loop `1 -> 4 -> 2 -> 1`, as logged.
const RAW_LOOP: [u32; 4] = [1, 4, 2, 1];

/// True when `cycle` counts as the absolute-1 loop for `family`.
///
/// Either the accelerated fixed point `[1]` / `[-1]` in a domain-stable
/// configuration, or a cycle whose absolute values are literally
/// `[1, 4, 2, 1]` (raw-form representation).
pub fn is_canonical_attractor(cycle: &[BigInt], family: Family) -> bool {
    if let Some(sign) = unit_fixed_point(cycle) {
        return family.is_domain_stable(sign);
    }
    abs_equals(cycle, &RAW_LOOP)
}

/// True for the statically known cycles excluded from unknown-cycle
/// reporting: `[1]`, `[-1]`, `|cycle| = [1, 2]` or `[2, 1]`, and
/// `|cycle| = [1, 4, 2, 1]`.
pub fn is_known_trivial_cycle(cycle: &[BigInt]) -> bool {
    unit_fixed_point(cycle).is_some()
        || abs_equals(cycle, &[1, 2])
        || abs_equals(cycle, &[2, 1])
        || abs_equals(cycle, &RAW_LOOP)
}

/// Sign of a single-element `[1]` or `[-1]` cycle.
fn unit_fixed_point(cycle: &[BigInt]) -> Option<OddSign> {
    match cycle {
        [v] if v.magnitude().is_one() => Some(OddSign::of_unit(v.is_positive())),
        _ => None,
    }
}

fn abs_equals(cycle: &[BigInt], expected: &[u32]) -> bool {
    cycle.len() == expected.len()
        && cycle
            .iter()
            .zip(expected)
            .all(|(v, &e)| *v.magnitude() == BigUint::from(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cyc(values: &[i64]) -> Vec<BigInt> {
        values.iter().copied().map(BigInt::from).collect()
    }

    #[test]
    fn unit_loops_follow_domain_stability() {
        let plus = cyc(&[1]);
        let minus = cyc(&[-1]);
        for family in [Family::B_PLUS, Family::B_MINUS] {
            assert!(is_canonical_attractor(&plus, family), "{family}");
            assert!(is_canonical_attractor(&minus, family), "{family}");
        }
        assert!(is_canonical_attractor(&plus, Family::W_PLUS));
        assert!(!is_canonical_attractor(&minus, Family::W_PLUS));
        assert!(!is_canonical_attractor(&plus, Family::W_MINUS));
        assert!(is_canonical_attractor(&minus, Family::W_MINUS));
    }

    #[test]
    fn raw_loop_is_abs1_for_every_family() {
        for family in Family::ALL {
            assert!(is_canonical_attractor(&cyc(&[1, 4, 2, 1]), family));
            assert!(is_canonical_attractor(&cyc(&[-1, -4, -2, -1]), family));
            assert!(is_canonical_attractor(&cyc(&[1, -4, 2, -1]), family));
        }
    }

    #[test]
    fn raw_loop_is_order_sensitive() {
        // Rotations of the literal sequence do not match the fallback.
        assert!(!is_canonical_attractor(&cyc(&[4, 2, 1, 1]), Family::W_PLUS));
        assert!(!is_canonical_attractor(&cyc(&[4, 2, 1]), Family::W_PLUS));
    }

    #[test]
    fn other_cycles_are_not_abs1() {
        for family in Family::ALL {
            assert!(!is_canonical_attractor(&cyc(&[-5, -7]), family));
            assert!(!is_canonical_attractor(&cyc(&[5, 7]), family));
            assert!(!is_canonical_attractor(&cyc(&[3]), family));
            assert!(!is_canonical_attractor(&[], family));
        }
    }

    #[test]
    fn known_trivial_cycles() {
        assert!(is_known_trivial_cycle(&cyc(&[1])));
        assert!(is_known_trivial_cycle(&cyc(&[-1])));
        assert!(is_known_trivial_cycle(&cyc(&[1, 2])));
        assert!(is_known_trivial_cycle(&cyc(&[2, 1])));
        assert!(is_known_trivial_cycle(&cyc(&[-1, 2])));
        assert!(is_known_trivial_cycle(&cyc(&[-2, -1])));
        assert!(is_known_trivial_cycle(&cyc(&[1, 4, 2, 1])));
        assert!(is_known_trivial_cycle(&cyc(&[-1, -4, -2, -1])));
    }

    #[test]
    fn unknown_cycles_are_not_trivial() {
        assert!(!is_known_trivial_cycle(&cyc(&[-5, -7])));
        assert!(!is_known_trivial_cycle(&cyc(&[1, 1])));
        assert!(!is_known_trivial_cycle(&cyc(&[2])));
        assert!(!is_known_trivial_cycle(&cyc(&[1, 2, 1])));
        assert!(!is_known_trivial_cycle(&cyc(&[17, 25, 37, 55, 41, 61, 91])));
    }
}
