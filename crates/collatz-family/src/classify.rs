//! Single-trajectory walker.
//!
//! Iterates the accelerated step from a normalized start, logging each
//! odd-phase value with its first-seen index. The first repeated value
//! closes the walk: the log from its earlier index onward is the minimal
//! closed cycle.
//!
//! ```text
//! n0 -> normalize -> v0 -> v1 -> ... -> vi -> ... -> vj -> vi
//!                                       \_____cycle____/
//! ```
//!
//! The walk performs at most `cap` step applications and keeps at most
//! `cap` values, so memory is bounded by the cap regardless of how large the
//! values grow. Each walk owns its visited map; nothing is shared between
//! walks.
//!
//! # Examples
//!
//! ```
//! use collatz_family::{Classifier, Family, Label};
//! use num_bigint::BigInt;
//!
//! let classifier = Classifier::new(Family::B_PLUS, 50);
//! let t = classifier.trace(&BigInt::from(7));
//! assert_eq!(t.values, [7, -11, 1].map(BigInt::from));
//! assert_eq!(t.cycle().map(<[BigInt]>::len), Some(1));
//! assert_eq!(t.label, Label::AbsoluteOneLoop);
//! ```

use core::fmt;
use std::collections::HashMap;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::One;
use serde::Serialize;

use crate::family::Family;
use crate::fingerprint::{canonicalize, Fingerprint, FingerprintMode};
use crate::gating::{is_canonical_attractor, is_known_trivial_cycle};
use crate::step::{normalize_initial, StepFn};

/// Classification of one starting value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Label {
    /// Closed on the domain-stable absolute-1 loop.
    #[serde(rename = "ABS1")]
    AbsoluteOneLoop,
    /// Closed on any other cycle.
    #[serde(rename = "NON-ABS1")]
    OtherClosedCycle,
    /// Did not close within the step cap.
    #[serde(rename = "CAP")]
    StepCapExceeded,
}

impl Label {
    /// All labels in report order.
    pub const ALL: [Self; 3] = [
        Self::AbsoluteOneLoop,
        Self::OtherClosedCycle,
        Self::StepCapExceeded,
    ];

    /// Short report tag: `ABS1`, `NON-ABS1` or `CAP`.
    #[inline]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::AbsoluteOneLoop => "ABS1",
            Self::OtherClosedCycle => "NON-ABS1",
            Self::StepCapExceeded => "CAP",
        }
    }

    /// True when the trajectory closed on a cycle.
    #[inline]
    pub const fn is_closed(self) -> bool {
        !matches!(self, Self::StepCapExceeded)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Result of classifying one starting value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// The label.
    pub label: Label,
    /// Whether the literal value 1 appeared anywhere in the walk.
    pub hit_one: bool,
    /// The closed cycle, kept when examples are requested or when the
    /// cycle is reported as unknown.
    pub cycle: Option<Vec<BigInt>>,
    /// Fingerprint of an unknown `NON-ABS1` cycle, when reporting is on.
    pub fingerprint: Option<Fingerprint>,
    /// Step applications performed.
    pub steps: u64,
    /// Times an even value had to be re-normalized mid-walk. Always 0 for
    /// correct arithmetic.
    pub renormalizations: u64,
}

/// Full odd-phase log of one walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trajectory {
    /// The raw starting value.
    pub start: BigInt,
    /// Every odd-phase value visited, starting with the normalized start.
    pub values: Vec<BigInt>,
    /// Index in `values` where the closed cycle begins.
    pub cycle_start: Option<usize>,
    /// The label.
    pub label: Label,
    /// Whether the literal value 1 was visited.
    pub hit_one: bool,
    /// Step applications performed.
    pub steps: u64,
    /// Mid-walk re-normalizations (see [`Outcome::renormalizations`]).
    pub renormalizations: u64,
}

impl Trajectory {
    /// The closed cycle, if the walk closed.
    pub fn cycle(&self) -> Option<&[BigInt]> {
        self.cycle_start.map(|i| &self.values[i..])
    }

    /// The pre-periodic part: values visited before entering the cycle
    /// (the whole log when the walk hit the cap).
    pub fn tail(&self) -> &[BigInt] {
        &self.values[..self.cycle_start.unwrap_or(self.values.len())]
    }
}

/// Raw walk state shared by [`Classifier::classify`] and
/// [`Classifier::trace`].
struct Walk {
    values: Vec<BigInt>,
    cycle_start: Option<usize>,
    hit_one: bool,
    steps: u64,
    renormalizations: u64,
}

/// Classifies starting values for one family and step cap.
///
/// The family is resolved into its concrete [`StepFn`] once, at
/// construction.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    family: Family,
    step: StepFn,
    cap: u64,
    retain_examples: bool,
    report_unknown: bool,
    fingerprint: FingerprintMode,
}

impl Classifier {
    /// Classifier with examples and unknown-cycle reporting off and signed
    /// fingerprints.
    pub fn new(family: Family, cap: u64) -> Self {
        Self {
            family,
            step: family.stepper(),
            cap,
            retain_examples: false,
            report_unknown: false,
            fingerprint: FingerprintMode::Signed,
        }
    }

    /// Keep the closed cycle of every closed outcome.
    #[must_use]
    pub fn with_examples(mut self, on: bool) -> Self {
        self.retain_examples = on;
        self
    }

    /// Fingerprint unknown `NON-ABS1` cycles.
    #[must_use]
    pub fn with_unknown_cycles(mut self, on: bool) -> Self {
        self.report_unknown = on;
        self
    }

    /// Fingerprint comparison space.
    #[must_use]
    pub fn with_fingerprint(mut self, mode: FingerprintMode) -> Self {
        self.fingerprint = mode;
        self
    }

    /// The operator family.
    #[inline]
    pub fn family(&self) -> Family {
        self.family
    }

    /// The step cap.
    #[inline]
    pub fn cap(&self) -> u64 {
        self.cap
    }

    /// Classify `start`.
    pub fn classify(&self, start: &BigInt) -> Outcome {
        let walk = self.walk(start);
        let Some(i) = walk.cycle_start else {
            return Outcome {
                label: Label::StepCapExceeded,
                hit_one: walk.hit_one,
                cycle: None,
                fingerprint: None,
                steps: walk.steps,
                renormalizations: walk.renormalizations,
            };
        };

        let mut values = walk.values;
        let cycle = values.split_off(i);
        let label = self.label_of(&cycle);
        let fingerprint = (self.report_unknown
            && label == Label::OtherClosedCycle
            && !is_known_trivial_cycle(&cycle))
        .then(|| canonicalize(&cycle, self.fingerprint));
        let keep = self.retain_examples || fingerprint.is_some();

        Outcome {
            label,
            hit_one: walk.hit_one,
            cycle: keep.then_some(cycle),
            fingerprint,
            steps: walk.steps,
            renormalizations: walk.renormalizations,
        }
    }

    /// Walk `start` and return the full odd-phase log.
    pub fn trace(&self, start: &BigInt) -> Trajectory {
        let walk = self.walk(start);
        let label = match walk.cycle_start {
            Some(i) => self.label_of(&walk.values[i..]),
            None => Label::StepCapExceeded,
        };
        Trajectory {
            start: start.clone(),
            values: walk.values,
            cycle_start: walk.cycle_start,
            label,
            hit_one: walk.hit_one,
            steps: walk.steps,
            renormalizations: walk.renormalizations,
        }
    }

    fn label_of(&self, cycle: &[BigInt]) -> Label {
        if is_canonical_attractor(cycle, self.family) {
            Label::AbsoluteOneLoop
        } else {
            Label::OtherClosedCycle
        }
    }

    fn walk(&self, start: &BigInt) -> Walk {
        let shape = self.family.shape;
        let mut n = normalize_initial(start, shape);
        let mut seen: HashMap<BigInt, usize> = HashMap::new();
        let mut values: Vec<BigInt> = Vec::new();
        let mut hit_one = false;
        let mut steps = 0u64;
        let mut renormalizations = 0u64;

        while steps < self.cap {
            if n.is_one() {
                hit_one = true;
            }
            if let Some(&i) = seen.get(&n) {
                return Walk {
                    values,
                    cycle_start: Some(i),
                    hit_one,
                    steps,
                    renormalizations,
                };
            }
            seen.insert(n.clone(), values.len());

            let next = if n.is_odd() {
                (self.step)(&n)
            } else {
                // Unreachable for exact arithmetic; counted so it shows up.
                renormalizations += 1;
                tracing::warn!(
                    family = %self.family,
                    start = %start,
                    value = %n,
                    "even value inside accelerated walk, re-normalizing"
                );
                normalize_initial(&n, shape)
            };
            values.push(n);
            n = next;
            steps += 1;
        }

        Walk {
            values,
            cycle_start: None,
            hit_one,
            steps,
            renormalizations,
        }
    }
}
