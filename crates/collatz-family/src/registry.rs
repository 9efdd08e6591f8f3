//! Deduplicated registry of unknown closed cycles.
//!
//! Keyed by [`Fingerprint`]. Each entry counts every discovery and keeps a
//! bounded list of sample starting values plus one literal cycle.
//!
//! Every update is a commutative merge, so the registry built from a set of
//! discoveries does not depend on the order they arrive in:
//!
//! - `count` is a sum;
//! - `samples` holds the `max_samples` smallest starting values (in range
//!   order this is "first found, first kept");
//! - the literal cycle is the one discovered from the smallest start.
//!
//! # Examples
//!
//! ```
//! use collatz_family::{canonicalize, CycleRegistry, FingerprintMode};
//! use num_bigint::BigInt;
//!
//! let cycle: Vec<BigInt> = [-5, -7].map(BigInt::from).to_vec();
//! let fp = canonicalize(&cycle, FingerprintMode::Signed);
//!
//! let mut reg = CycleRegistry::new(2);
//! for start in [-5, -7, -10, -20] {
//!     reg.record(fp.clone(), start, cycle.clone());
//! }
//! let entry = reg.get(&fp).unwrap();
//! assert_eq!(entry.count, 4);
//! assert_eq!(entry.samples, [-20, -10]);
//! ```

use core::cmp::Ordering;
use std::collections::HashMap;

use num_bigint::BigInt;

use crate::fingerprint::Fingerprint;

/// Aggregated data for one unknown cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleEntry {
    /// Number of starting values that closed on this cycle.
    pub count: u64,
    /// Cycle length.
    pub len: usize,
    /// Up to `max_samples` starting values, ascending.
    pub samples: Vec<i64>,
    /// The literal cycle as discovered from `first_start`.
    pub cycle: Vec<BigInt>,
    /// Smallest starting value seen for this cycle.
    pub first_start: i64,
}

impl CycleEntry {
    fn new(start: i64, cycle: Vec<BigInt>, max_samples: usize) -> Self {
        let mut samples = Vec::with_capacity(max_samples.min(16));
        if max_samples > 0 {
            samples.push(start);
        }
        Self {
            count: 1,
            len: cycle.len(),
            samples,
            cycle,
            first_start: start,
        }
    }

    fn offer_sample(&mut self, start: i64, max_samples: usize) {
        if let Err(pos) = self.samples.binary_search(&start) {
            if pos < max_samples {
                self.samples.insert(pos, start);
                self.samples.truncate(max_samples);
            }
        }
    }

    fn absorb(&mut self, other: CycleEntry, max_samples: usize) {
        self.count += other.count;
        if other.first_start < self.first_start {
            self.first_start = other.first_start;
            self.cycle = other.cycle;
        }
        for start in other.samples {
            self.offer_sample(start, max_samples);
        }
    }
}

/// Fingerprint -> entry map with bounded sample retention.
#[derive(Debug, Clone, Default)]
pub struct CycleRegistry {
    entries: HashMap<Fingerprint, CycleEntry>,
    max_samples: usize,
}

impl CycleRegistry {
    /// Empty registry keeping at most `max_samples` starts per cycle.
    pub fn new(max_samples: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_samples,
        }
    }

    /// Sample capacity per entry.
    #[inline]
    pub fn max_samples(&self) -> usize {
        self.max_samples
    }

    /// Record one discovery of `fingerprint` from `start`.
    ///
    /// Returns true when this is the first discovery of the fingerprint.
    pub fn record(&mut self, fingerprint: Fingerprint, start: i64, cycle: Vec<BigInt>) -> bool {
        let max = self.max_samples;
        match self.entries.get_mut(&fingerprint) {
            Some(entry) => {
                entry.absorb(CycleEntry::new(start, cycle, max), max);
                false
            }
            None => {
                self.entries
                    .insert(fingerprint, CycleEntry::new(start, cycle, max));
                true
            }
        }
    }

    /// Fold `other` into `self`. Counts add; samples and literal cycles are
    /// chosen exactly as if every discovery had been recorded here.
    ///
    /// `other` is assumed to use the same fingerprint mode.
    pub fn merge(&mut self, other: CycleRegistry) {
        let max = self.max_samples;
        for (fp, mut entry) in other.entries {
            entry.samples.truncate(max);
            match self.entries.get_mut(&fp) {
                Some(mine) => mine.absorb(entry, max),
                None => {
                    self.entries.insert(fp, entry);
                }
            }
        }
    }

    /// Entry for `fingerprint`.
    #[inline]
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&CycleEntry> {
        self.entries.get(fingerprint)
    }

    /// Number of distinct cycles.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no unknown cycle has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total discoveries across all entries.
    pub fn total_count(&self) -> u64 {
        self.entries.values().map(|e| e.count).sum()
    }

    /// Entries in report order: descending count, ascending length, then
    /// ascending fingerprint.
    pub fn ranked(&self) -> Vec<(&Fingerprint, &CycleEntry)> {
        let mut out: Vec<_> = self.entries.iter().collect();
        out.sort_by(|(fa, a), (fb, b)| rank_order(fa, a, fb, b));
        out
    }

    /// Consume the registry into ranked `(fingerprint, entry)` pairs.
    pub fn into_ranked(self) -> Vec<(Fingerprint, CycleEntry)> {
        let mut out: Vec<_> = self.entries.into_iter().collect();
        out.sort_by(|(fa, a), (fb, b)| rank_order(fa, a, fb, b));
        out
    }
}

/// Report order: descending count, ascending length, ascending fingerprint.
fn rank_order(fa: &Fingerprint, a: &CycleEntry, fb: &Fingerprint, b: &CycleEntry) -> Ordering {
    b.count
        .cmp(&a.count)
        .then(a.len.cmp(&b.len))
        .then_with(|| fa.cmp(fb))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fingerprint::{canonicalize, FingerprintMode};

    fn cyc(values: &[i64]) -> Vec<BigInt> {
        values.iter().copied().map(BigInt::from).collect()
    }

    fn fp(values: &[i64]) -> Fingerprint {
        canonicalize(&cyc(values), FingerprintMode::Signed)
    }

    #[test]
    fn first_record_creates_entry() {
        let mut reg = CycleRegistry::new(3);
        assert!(reg.is_empty());
        assert!(reg.record(fp(&[-5, -7]), -5, cyc(&[-5, -7])));
        assert!(!reg.record(fp(&[-5, -7]), -7, cyc(&[-7, -5])));
        assert_eq!(reg.len(), 1);

        let entry = reg.get(&fp(&[-7, -5])).cloned().unwrap();
        assert_eq!(entry.count, 2);
        assert_eq!(entry.len, 2);
        assert_eq!(entry.samples, [-7, -5]);
        assert_eq!(entry.first_start, -7);
        assert_eq!(entry.cycle, cyc(&[-7, -5]));
    }

    #[test]
    fn samples_are_bounded_and_count_keeps_going() {
        let mut reg = CycleRegistry::new(3);
        let f = fp(&[-5, -7]);
        for start in -10..0 {
            reg.record(f.clone(), start, cyc(&[-5, -7]));
        }
        let entry = reg.get(&f).cloned().unwrap();
        assert_eq!(entry.count, 10);
        assert_eq!(entry.samples, [-10, -9, -8]);
    }

    #[test]
    fn zero_sample_capacity() {
        let mut reg = CycleRegistry::new(0);
        let f = fp(&[-5, -7]);
        reg.record(f.clone(), 3, cyc(&[-5, -7]));
        reg.record(f.clone(), 1, cyc(&[-7, -5]));
        let entry = reg.get(&f).cloned().unwrap();
        assert!(entry.samples.is_empty());
        assert_eq!(entry.count, 2);
        assert_eq!(entry.first_start, 1);
        assert_eq!(entry.cycle, cyc(&[-7, -5]));
    }

    #[test]
    fn arrival_order_does_not_matter() {
        let f = fp(&[-5, -7]);
        let starts = [7, -3, 12, -9, 0, 4, -1];

        let mut forward = CycleRegistry::new(2);
        for &s in &starts {
            forward.record(f.clone(), s, cyc(&[s, s]));
        }
        let mut backward = CycleRegistry::new(2);
        for &s in starts.iter().rev() {
            backward.record(f.clone(), s, cyc(&[s, s]));
        }
        assert_eq!(forward.get(&f), backward.get(&f));
        let entry = forward.get(&f).cloned().unwrap();
        assert_eq!(entry.samples, [-9, -3]);
        assert_eq!(entry.cycle, cyc(&[-9, -9]));
    }

    #[test]
    fn merge_matches_single_registry() {
        let a = fp(&[-5, -7]);
        let b = fp(&[-17, -25, -37, -55, -41, -61, -91]);

        let mut whole = CycleRegistry::new(3);
        let mut left = CycleRegistry::new(3);
        let mut right = CycleRegistry::new(3);
        for start in -40i64..40 {
            let f = if start % 3 == 0 { &a } else { &b };
            whole.record(f.clone(), start, cyc(&[start]));
            let half = if start % 2 == 0 { &mut left } else { &mut right };
            half.record(f.clone(), start, cyc(&[start]));
        }
        right.merge(left);

        assert_eq!(whole.len(), right.len());
        for (f, entry) in whole.ranked() {
            assert_eq!(right.get(f), Some(entry));
        }
    }

    #[test]
    fn ranking_order() {
        let mut reg = CycleRegistry::new(1);
        let long = fp(&[1, 3, 5]);
        let short = fp(&[9, 11]);
        let rare = fp(&[13]);
        for s in 0..5 {
            reg.record(long.clone(), s, cyc(&[1, 3, 5]));
            reg.record(short.clone(), s, cyc(&[9, 11]));
        }
        reg.record(rare.clone(), 0, cyc(&[13]));

        let order: Vec<_> = reg.ranked().into_iter().map(|(f, _)| f.clone()).collect();
        assert_eq!(order, [short.clone(), long.clone(), rare.clone()]);

        let owned: Vec<_> = reg.into_ranked().into_iter().map(|(f, _)| f).collect();
        assert_eq!(owned, [short, long, rare]);
    }

    #[test]
    fn borrowed_and_owned_rankings_agree_on_ties() {
        // Equal counts and lengths fall back to fingerprint order.
        let mut reg = CycleRegistry::new(2);
        for v in [41i64, -3, 17, 5, -29] {
            reg.record(fp(&[v, v + 2]), v, cyc(&[v, v + 2]));
        }
        let borrowed: Vec<_> = reg.ranked().into_iter().map(|(f, _)| f.clone()).collect();
        let owned: Vec<_> = reg.clone().into_ranked().into_iter().map(|(f, _)| f).collect();
        assert_eq!(borrowed, owned);
        let heads: Vec<_> = owned.iter().map(|f| f.values()[0].clone()).collect();
        assert_eq!(heads, cyc(&[-29, -3, 5, 17, 41]));
    }

    #[test]
    fn total_count_sums_entries() {
        let mut reg = CycleRegistry::new(1);
        reg.record(fp(&[3]), 0, cyc(&[3]));
        reg.record(fp(&[3]), 1, cyc(&[3]));
        reg.record(fp(&[5]), 2, cyc(&[5]));
        assert_eq!(reg.total_count(), 3);
    }
}
