//! Aggregated sweep result record.
//!
//! [`SweepReport`] is the only thing a sweep hands back: label counts,
//! hit-1 counts, the first example per closed label, and the ranked
//! unknown-cycle listing, plus run metadata. It serializes with serde
//! (big integers as decimal strings) and renders as a plain-text report
//! through [`Display`](core::fmt::Display):
//!
//! ```text
//! === Collatz Family Sweep ===
//! Type        : W+1  (even=Wall, odd_sign=+1)
//! Range       : [-200, 200]  (count=401)
//! Step cap    : 200  (accelerated O_±)
//! ABS1 def.   : [1] only (positive domain A1-stable); raw: 1 -> 4 -> 2 -> 1
//!
//! Results     : ABS1=201  NON-ABS1=200  OTHER=0
//! Hit-1       : YES=201  NO=200
//! Time        : 0.004s
//! ```

use core::fmt;
use std::time::Duration;

use num_bigint::BigInt;
use serde::{Serialize, Serializer};

use crate::classify::Label;
use crate::family::{Family, OddSign};
use crate::fingerprint::{Fingerprint, FingerprintMode};

/// Per-label counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LabelCounts {
    /// `ABS1` outcomes.
    pub abs1: u64,
    /// `NON-ABS1` outcomes.
    pub non_abs1: u64,
    /// `CAP` outcomes.
    pub cap: u64,
}

impl LabelCounts {
    /// Count one outcome.
    #[inline]
    pub fn bump(&mut self, label: Label) {
        match label {
            Label::AbsoluteOneLoop => self.abs1 += 1,
            Label::OtherClosedCycle => self.non_abs1 += 1,
            Label::StepCapExceeded => self.cap += 1,
        }
    }

    /// Count for `label`.
    #[inline]
    pub fn get(&self, label: Label) -> u64 {
        match label {
            Label::AbsoluteOneLoop => self.abs1,
            Label::OtherClosedCycle => self.non_abs1,
            Label::StepCapExceeded => self.cap,
        }
    }

    /// Sum over all labels.
    #[inline]
    pub fn total(&self) -> u64 {
        self.abs1 + self.non_abs1 + self.cap
    }
}

/// Whether the literal value 1 was visited, over every starting value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HitCounts {
    /// Walks that visited 1.
    pub yes: u64,
    /// Walks that never visited 1.
    pub no: u64,
}

impl HitCounts {
    /// Count one walk.
    #[inline]
    pub fn bump(&mut self, hit_one: bool) {
        if hit_one {
            self.yes += 1;
        } else {
            self.no += 1;
        }
    }
}

/// A starting value and the cycle it closed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Example {
    /// Starting value.
    pub start: i64,
    /// Literal closed cycle.
    #[serde(serialize_with = "decimal_seq")]
    pub cycle: Vec<BigInt>,
}

/// First example per closed label.
///
/// Under parallel execution the example kept is whichever result reached
/// the aggregator first, so it may differ between runs. Counts and the
/// cycle registry do not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Examples {
    /// First `ABS1` example.
    pub abs1: Option<Example>,
    /// First `NON-ABS1` example.
    pub non_abs1: Option<Example>,
}

impl Examples {
    /// Example for `label`; always `None` for `CAP`.
    pub fn get(&self, label: Label) -> Option<&Example> {
        match label {
            Label::AbsoluteOneLoop => self.abs1.as_ref(),
            Label::OtherClosedCycle => self.non_abs1.as_ref(),
            Label::StepCapExceeded => None,
        }
    }

    /// Keep `example` for `label` unless one is already held.
    ///
    /// Returns true when the example was kept.
    pub fn offer(&mut self, label: Label, example: impl FnOnce() -> Example) -> bool {
        let slot = match label {
            Label::AbsoluteOneLoop => &mut self.abs1,
            Label::OtherClosedCycle => &mut self.non_abs1,
            Label::StepCapExceeded => return false,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(example());
        true
    }
}

/// One ranked row of the unknown-cycle listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleSummary {
    /// Canonical fingerprint.
    #[serde(serialize_with = "decimal_fingerprint")]
    pub fingerprint: Fingerprint,
    /// Cycle length.
    pub len: usize,
    /// Discoveries.
    pub count: u64,
    /// Smallest starting values that closed on this cycle, ascending.
    pub samples: Vec<i64>,
    /// Representative literal cycle (found from the smallest start).
    #[serde(serialize_with = "decimal_seq")]
    pub cycle: Vec<BigInt>,
}

impl CycleSummary {
    /// Values shown in the text listing: the fingerprint when fingerprints
    /// collapse sign, the literal cycle otherwise.
    pub fn display_values(&self, mode: FingerprintMode) -> &[BigInt] {
        if mode.is_absolute() {
            self.fingerprint.values()
        } else {
            &self.cycle
        }
    }
}

/// Result of a range sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    /// Operator family.
    pub family: Family,
    /// Inclusive lower bound.
    pub lo: i64,
    /// Inclusive upper bound.
    pub hi: i64,
    /// Number of starting values classified.
    pub total: u64,
    /// Step cap.
    pub cap: u64,
    /// Fingerprint mode used by the registry.
    pub fingerprint: FingerprintMode,
    /// Which closed loops count as `ABS1` for this family.
    pub abs1_definition: &'static str,
    /// Per-label counts.
    pub counts: LabelCounts,
    /// Hit-1 counts.
    pub hits: HitCounts,
    /// First example per closed label, if examples were requested.
    pub examples: Option<Examples>,
    /// Ranked unknown cycles; empty when cycle reporting is off.
    pub cycles: Vec<CycleSummary>,
    /// Mid-walk re-normalizations across the whole sweep.
    pub renormalizations: u64,
    /// Wall-clock time spent classifying.
    #[serde(rename = "elapsed_secs", serialize_with = "seconds")]
    pub elapsed: Duration,
}

impl SweepReport {
    /// Starting values that did not close on any loop:
    /// `total - ABS1 - NON-ABS1`.
    pub fn other(&self) -> u64 {
        self.total
            .saturating_sub(self.counts.abs1)
            .saturating_sub(self.counts.non_abs1)
    }
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.family.sign {
            OddSign::Plus => "+1",
            OddSign::Minus => "-1",
        };
        writeln!(f, "=== Collatz Family Sweep ===")?;
        writeln!(
            f,
            "Type        : {}  (even={:?}, odd_sign={sign})",
            self.family, self.family.shape
        )?;
        writeln!(
            f,
            "Range       : [{}, {}]  (count={})",
            self.lo, self.hi, self.total
        )?;
        writeln!(f, "Step cap    : {}  (accelerated O_±)", self.cap)?;
        writeln!(f, "ABS1 def.   : {}", self.abs1_definition)?;
        writeln!(f)?;
        writeln!(
            f,
            "Results     : ABS1={}  NON-ABS1={}  OTHER={}",
            self.counts.abs1,
            self.counts.non_abs1,
            self.other()
        )?;
        writeln!(f, "Hit-1       : YES={}  NO={}", self.hits.yes, self.hits.no)?;
        writeln!(f, "Time        : {:.3}s", self.elapsed.as_secs_f64())?;
        if self.renormalizations > 0 {
            writeln!(f, "Renormalized: {}", self.renormalizations)?;
        }

        if let Some(examples) = &self.examples {
            let mut first = true;
            for label in [Label::AbsoluteOneLoop, Label::OtherClosedCycle] {
                if let Some(ex) = examples.get(label) {
                    if first {
                        writeln!(f)?;
                        first = false;
                    }
                    writeln!(
                        f,
                        "Example {label} start {}: cycle {}",
                        ex.start,
                        Bracketed(&ex.cycle)
                    )?;
                }
            }
        }

        if !self.cycles.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "Unknown closed cycles (excluding [±1], 1<->2, and 1->4->2->1):"
            )?;
            for row in &self.cycles {
                writeln!(
                    f,
                    "  len={:>2}  count={:>6}  sample_starts={:?}  cycle={}",
                    row.len,
                    row.count,
                    row.samples,
                    Bracketed(row.display_values(self.fingerprint))
                )?;
            }
        }
        Ok(())
    }
}

/// Renders a value list as `[a, b, c]`.
///
/// ```
/// use collatz_family::Bracketed;
/// use num_bigint::BigInt;
///
/// let values = [-5, -7].map(BigInt::from);
/// assert_eq!(Bracketed(&values).to_string(), "[-5, -7]");
/// assert_eq!(Bracketed(&[]).to_string(), "[]");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Bracketed<'a>(pub &'a [BigInt]);

impl fmt::Display for Bracketed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}

fn decimal_seq<S: Serializer>(values: &[BigInt], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(values.iter().map(ToString::to_string))
}

fn decimal_fingerprint<S: Serializer>(fp: &Fingerprint, s: S) -> Result<S::Ok, S::Error> {
    decimal_seq(fp.values(), s)
}

fn seconds<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}
