//! Rotation-invariant cycle fingerprints.
//!
//! A closed cycle has no preferred starting point: `[-5, -7]` and `[-7, -5]`
//! are the same orbit entered at different places. The fingerprint picks the
//! lexicographically smallest rotation, so every entry point yields the same
//! key.
//!
//! ```text
//! Signed   : min over rotations of (c_s, c_s+1, ..., c_s-1)
//! Absolute : min over rotations of (|c_s|, |c_s+1|, ..., |c_s-1|)
//! ```
//!
//! Absolute mode additionally merges a cycle with its mirror image, which is
//! how the `W+1` and `W-1` families' cycles line up.
//!
//! # Examples
//!
//! ```
//! use collatz_family::{canonicalize, FingerprintMode};
//! use num_bigint::BigInt;
//!
//! let a: Vec<BigInt> = [-5, -7].map(BigInt::from).to_vec();
//! let b: Vec<BigInt> = [-7, -5].map(BigInt::from).to_vec();
//! let mirror: Vec<BigInt> = [7, 5].map(BigInt::from).to_vec();
//!
//! assert_eq!(canonicalize(&a, FingerprintMode::Signed), canonicalize(&b, FingerprintMode::Signed));
//! assert_ne!(canonicalize(&a, FingerprintMode::Signed), canonicalize(&mirror, FingerprintMode::Signed));
//! assert_eq!(canonicalize(&a, FingerprintMode::Absolute), canonicalize(&mirror, FingerprintMode::Absolute));
//! assert_eq!(canonicalize(&a, FingerprintMode::Absolute).to_string(), "(5, 7)");
//! ```

use core::cmp::Ordering;
use core::fmt;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// Comparison space used when choosing the canonical rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintMode {
    /// Compare raw signed values. Mirror cycles stay distinct.
    #[default]
    Signed,
    /// Compare absolute values. Mirror cycles collapse to one fingerprint,
    /// which is expressed in absolute values.
    Absolute,
}

impl FingerprintMode {
    /// `Absolute` when `by_abs` is set.
    #[inline]
    pub const fn from_abs_flag(by_abs: bool) -> Self {
        if by_abs {
            Self::Absolute
        } else {
            Self::Signed
        }
    }

    /// True for [`FingerprintMode::Absolute`].
    #[inline]
    pub const fn is_absolute(self) -> bool {
        matches!(self, Self::Absolute)
    }
}

/// Canonical, rotation-invariant identity of a closed cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(Box<[BigInt]>);

impl Fingerprint {
    /// The canonical values.
    #[inline]
    pub fn values(&self) -> &[BigInt] {
        &self.0
    }

    /// Cycle length.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the fingerprint of an empty cycle.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str(")")
    }
}

/// Compute the fingerprint of `cycle`.
///
/// Returns the smallest rotation under `mode`. In absolute mode the
/// fingerprint holds absolute values. An empty cycle yields an empty
/// fingerprint.
pub fn canonicalize(cycle: &[BigInt], mode: FingerprintMode) -> Fingerprint {
    let n = cycle.len();
    let best = (1..n).fold(0, |best, s| {
        if compare_rotations(cycle, s, best, mode) == Ordering::Less {
            s
        } else {
            best
        }
    });
    let rotated = cycle[best..].iter().chain(&cycle[..best]);
    let values: Box<[BigInt]> = match mode {
        FingerprintMode::Signed => rotated.cloned().collect(),
        FingerprintMode::Absolute => rotated.map(|v| BigInt::from(v.magnitude().clone())).collect(),
    };
    Fingerprint(values)
}

/// Lexicographic comparison of the rotations starting at `a` and `b`.
fn compare_rotations(cycle: &[BigInt], a: usize, b: usize, mode: FingerprintMode) -> Ordering {
    let n = cycle.len();
    for k in 0..n {
        let x = &cycle[(a + k) % n];
        let y = &cycle[(b + k) % n];
        let ord = match mode {
            FingerprintMode::Signed => x.cmp(y),
            FingerprintMode::Absolute => x.magnitude().cmp(y.magnitude()),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
