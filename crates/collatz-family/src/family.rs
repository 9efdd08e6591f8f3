//! Operator family tags: shape x sign.
//!
//! Each family is named by its even-phase shape and its odd-step constant:
//!
//! | Tag | Shape | Even step | Odd step |
//! |-----|-------|-----------|----------|
//! | `W+1` | Wall | `n / 2` | `3n + 1` |
//! | `W-1` | Wall | `n / 2` | `3n - 1` |
//! | `B+1` | Bridge | `n / -2` | `3n + 1` |
//! | `B-1` | Bridge | `n / -2` | `3n - 1` |
//!
//! Tags are parsed once, at configuration time; the hot loop only ever sees
//! the resolved [`StepFn`](crate::StepFn).
//!
//! # Examples
//!
//! ```
//! use collatz_family::{Family, OddSign, Shape};
//!
//! let f: Family = "B-1".parse().unwrap();
//! assert_eq!(f.shape, Shape::Bridge);
//! assert_eq!(f.sign, OddSign::Minus);
//! assert_eq!(f.to_string(), "B-1");
//! assert!("X+1".parse::<Family>().is_err());
//! ```

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Even-phase rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shape {
    /// Plain halving.
    Wall,
    /// Halving with negation: every single halving flips the sign.
    Bridge,
}

impl Shape {
    /// One-letter tag prefix (`W` or `B`).
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Self::Wall => 'W',
            Self::Bridge => 'B',
        }
    }
}

/// Additive constant of the odd step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OddSign {
    /// `3n + 1`.
    Plus,
    /// `3n - 1`.
    Minus,
}

impl OddSign {
    /// The constant as an integer (`+1` or `-1`).
    #[inline]
    pub const fn constant(self) -> i32 {
        match self {
            Self::Plus => 1,
            Self::Minus => -1,
        }
    }

    /// The sign of a literal fixed point `[1]` or `[-1]`.
    #[inline]
    pub const fn of_unit(positive: bool) -> Self {
        if positive {
            Self::Plus
        } else {
            Self::Minus
        }
    }
}

/// A complete operator family. Immutable for a run.
///
/// Serialized as its tag (`"W+1"`, `"B-1"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Family {
    /// Even-phase shape.
    pub shape: Shape,
    /// Odd-step constant.
    pub sign: OddSign,
}

impl Family {
    /// `W+1`: the classical Collatz map.
    pub const W_PLUS: Self = Self::new(Shape::Wall, OddSign::Plus);
    /// `W-1`.
    pub const W_MINUS: Self = Self::new(Shape::Wall, OddSign::Minus);
    /// `B+1`.
    pub const B_PLUS: Self = Self::new(Shape::Bridge, OddSign::Plus);
    /// `B-1`.
    pub const B_MINUS: Self = Self::new(Shape::Bridge, OddSign::Minus);

    /// All four families in canonical order.
    pub const ALL: [Self; 4] = [Self::W_PLUS, Self::W_MINUS, Self::B_PLUS, Self::B_MINUS];

    /// Creates a family from its two components.
    #[inline]
    pub const fn new(shape: Shape, sign: OddSign) -> Self {
        Self { shape, sign }
    }

    /// Whether the accelerated fixed point of the given sign is an ABS1
    /// attractor in this family.
    ///
    /// Bridge families accept both `[1]` and `[-1]`. Wall families accept
    /// only the fixed point matching their own odd sign.
    #[inline]
    pub const fn is_domain_stable(self, fixed: OddSign) -> bool {
        match self.shape {
            Shape::Bridge => true,
            Shape::Wall => matches!(
                (self.sign, fixed),
                (OddSign::Plus, OddSign::Plus) | (OddSign::Minus, OddSign::Minus)
            ),
        }
    }

    /// Human-readable ABS1 definition for this family, as printed in
    /// report headers.
    pub const fn abs1_definition(self) -> &'static str {
        match (self.shape, self.sign) {
            (Shape::Bridge, _) => "[1] or [-1] (both domains A1-stable); raw: 1 -> 4 -> 2 -> 1",
            (Shape::Wall, OddSign::Plus) => "[1] only (positive domain A1-stable); raw: 1 -> 4 -> 2 -> 1",
            (Shape::Wall, OddSign::Minus) => {
                "[-1] only (negative domain A1-stable); raw: 1 -> 4 -> 2 -> 1"
            }
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign {
            OddSign::Plus => "+1",
            OddSign::Minus => "-1",
        };
        write!(f, "{}{}", self.shape.letter(), sign)
    }
}

impl FromStr for Family {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        let (shape, sign) = tag.split_at_checked(1).ok_or_else(|| unknown(s))?;
        let shape = match shape {
            "W" | "w" => Shape::Wall,
            "B" | "b" => Shape::Bridge,
            _ => return Err(unknown(s)),
        };
        let sign = match sign {
            "+1" | "+" => OddSign::Plus,
            "-1" | "-" => OddSign::Minus,
            _ => return Err(unknown(s)),
        };
        Ok(Self::new(shape, sign))
    }
}

fn unknown(tag: &str) -> Error {
    Error::UnknownFamily(tag.to_owned())
}

impl TryFrom<String> for Family {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Family> for String {
    fn from(value: Family) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_tags() {
        assert_eq!("W+1".parse::<Family>().ok(), Some(Family::W_PLUS));
        assert_eq!("W-1".parse::<Family>().ok(), Some(Family::W_MINUS));
        assert_eq!("B+1".parse::<Family>().ok(), Some(Family::B_PLUS));
        assert_eq!("B-1".parse::<Family>().ok(), Some(Family::B_MINUS));
    }

    #[test]
    fn parse_is_lenient_on_case_and_whitespace() {
        assert_eq!(" b+1 ".parse::<Family>().ok(), Some(Family::B_PLUS));
        assert_eq!("w-".parse::<Family>().ok(), Some(Family::W_MINUS));
    }

    #[test]
    fn parse_rejects_malformed_tags() {
        for bad in ["", "W", "X+1", "W+2", "B*1", "WB+1", "+1", "B+1 extra"] {
            let parsed = bad.parse::<Family>();
            assert!(
                matches!(&parsed, Err(Error::UnknownFamily(tag)) if tag == bad),
                "{bad:?} parsed to {parsed:?}"
            );
        }
    }

    #[test]
    fn display_round_trips() {
        for f in Family::ALL {
            assert_eq!(f.to_string().parse::<Family>().ok(), Some(f));
        }
    }

    #[test]
    fn domain_stability_table() {
        use OddSign::{Minus, Plus};
        assert!(Family::B_PLUS.is_domain_stable(Plus));
        assert!(Family::B_PLUS.is_domain_stable(Minus));
        assert!(Family::B_MINUS.is_domain_stable(Plus));
        assert!(Family::B_MINUS.is_domain_stable(Minus));
        assert!(Family::W_PLUS.is_domain_stable(Plus));
        assert!(!Family::W_PLUS.is_domain_stable(Minus));
        assert!(!Family::W_MINUS.is_domain_stable(Plus));
        assert!(Family::W_MINUS.is_domain_stable(Minus));
    }

    #[test]
    fn constants() {
        assert_eq!(OddSign::Plus.constant(), 1);
        assert_eq!(OddSign::Minus.constant(), -1);
        assert_eq!(OddSign::of_unit(true), OddSign::Plus);
        assert_eq!(OddSign::of_unit(false), OddSign::Minus);
    }
}
