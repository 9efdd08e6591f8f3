//! Range sweep and result aggregation.
//!
//! Every starting value in `[lo, hi]` is classified independently. Workers
//! never share state: each walk owns its visited map, and each finished
//! walk becomes an immutable [`Record`]. A single [`Aggregator`] owns the
//! counters and the cycle registry and folds records in as they arrive.
//!
//! ```text
//!             +-- worker 0 --+
//! lo..=hi --> +-- worker 1 --+ --Record--> sync_channel --> Aggregator --> SweepReport
//!             +-- worker k --+
//! ```
//!
//! With one worker the range is walked in order on the calling thread.
//! Otherwise the range is split across a rayon pool and records reach the
//! aggregator in whatever order workers finish. Counts, hit counts and the
//! cycle registry come out identical either way; the first example kept per
//! label is whichever record arrived first.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use num_bigint::BigInt;
use rayon::prelude::*;

use crate::classify::{Classifier, Outcome};
use crate::config::SweepConfig;
use crate::error::{Error, Result};
use crate::family::Family;
use crate::fingerprint::FingerprintMode;
use crate::registry::CycleRegistry;
use crate::report::{
    CycleSummary, Example, Examples, HitCounts, LabelCounts, SweepReport,
};

/// Records buffered between the workers and the aggregator.
const CHANNEL_DEPTH: usize = 4096;

/// One classified starting value, as sent from a worker to the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Starting value.
    pub start: i64,
    /// Its classification.
    pub outcome: Outcome,
}

impl Record {
    fn classify(classifier: &Classifier, start: i64) -> Self {
        Self {
            start,
            outcome: classifier.classify(&BigInt::from(start)),
        }
    }
}

/// Single owner of all sweep-wide mutable state.
#[derive(Debug)]
pub struct Aggregator {
    family: Family,
    lo: i64,
    hi: i64,
    total: u64,
    cap: u64,
    fingerprint: FingerprintMode,
    keep_examples: bool,
    report_cycles: bool,
    counts: LabelCounts,
    hits: HitCounts,
    examples: Examples,
    registry: CycleRegistry,
    renormalizations: u64,
    received: u64,
}

impl Aggregator {
    /// Empty aggregator for `config`.
    pub fn new(config: &SweepConfig) -> Self {
        Self {
            family: config.family,
            lo: config.lo,
            hi: config.hi,
            total: config.len(),
            cap: config.cap,
            fingerprint: config.fingerprint,
            keep_examples: config.examples,
            report_cycles: config.report_cycles,
            counts: LabelCounts::default(),
            hits: HitCounts::default(),
            examples: Examples::default(),
            registry: CycleRegistry::new(config.max_samples_per_cycle),
            renormalizations: 0,
            received: 0,
        }
    }

    /// Fold one record in.
    pub fn absorb(&mut self, record: Record) {
        let Record { start, outcome } = record;
        self.received += 1;
        self.counts.bump(outcome.label);
        self.hits.bump(outcome.hit_one);
        self.renormalizations += outcome.renormalizations;

        if self.keep_examples {
            if let Some(cycle) = &outcome.cycle {
                self.examples.offer(outcome.label, || Example {
                    start,
                    cycle: cycle.clone(),
                });
            }
        }

        if !self.report_cycles {
            return;
        }
        if let (Some(fp), Some(cycle)) = (outcome.fingerprint, outcome.cycle) {
            if self.registry.get(&fp).is_none() {
                tracing::debug!(
                    family = %self.family,
                    start,
                    len = cycle.len(),
                    fingerprint = %fp,
                    "new unknown cycle"
                );
            }
            self.registry.record(fp, start, cycle);
        }
    }

    /// Records absorbed so far.
    #[inline]
    pub fn received(&self) -> u64 {
        self.received
    }

    /// Current label counts.
    #[inline]
    pub fn counts(&self) -> &LabelCounts {
        &self.counts
    }

    /// Current unknown-cycle registry.
    #[inline]
    pub fn registry(&self) -> &CycleRegistry {
        &self.registry
    }

    /// Close the sweep and produce its report.
    pub fn finish(self, elapsed: Duration) -> SweepReport {
        let cycles = self
            .registry
            .into_ranked()
            .into_iter()
            .map(|(fingerprint, entry)| CycleSummary {
                fingerprint,
                len: entry.len,
                count: entry.count,
                samples: entry.samples,
                cycle: entry.cycle,
            })
            .collect();
        SweepReport {
            family: self.family,
            lo: self.lo,
            hi: self.hi,
            total: self.total,
            cap: self.cap,
            fingerprint: self.fingerprint,
            abs1_definition: self.family.abs1_definition(),
            counts: self.counts,
            hits: self.hits,
            examples: self.keep_examples.then_some(self.examples),
            cycles,
            renormalizations: self.renormalizations,
            elapsed,
        }
    }
}

/// A validated sweep, ready to run.
#[derive(Debug, Clone)]
pub struct Sweep {
    config: SweepConfig,
    classifier: Classifier,
    workers: usize,
}

impl Sweep {
    /// Validate `config` and resolve its classifier and worker count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyRange`], [`Error::RangeTooWide`] or
    /// [`Error::ZeroCap`] for an invalid configuration.
    pub fn new(config: SweepConfig) -> Result<Self> {
        config.validate()?;
        let classifier = config.classifier();
        let workers = config.effective_workers();
        if workers != config.workers {
            tracing::debug!(
                requested = config.workers,
                workers,
                "worker count clamped to available parallelism"
            );
        }
        Ok(Self {
            config,
            classifier,
            workers,
        })
    }

    /// The configuration being swept.
    #[inline]
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Worker count after clamping.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Classify the whole range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pool`] if the worker pool cannot be started and
    /// [`Error::Disconnected`] if results stop arriving before the range is
    /// exhausted.
    pub fn run(&self) -> Result<SweepReport> {
        let c = &self.config;
        tracing::info!(
            family = %c.family,
            lo = c.lo,
            hi = c.hi,
            cap = c.cap,
            workers = self.workers,
            "sweep started"
        );

        let started = Instant::now();
        let mut agg = Aggregator::new(c);
        if self.workers <= 1 {
            self.run_sequential(&mut agg);
        } else {
            self.run_parallel(&mut agg)?;
        }
        let report = agg.finish(started.elapsed());

        tracing::info!(
            family = %report.family,
            abs1 = report.counts.abs1,
            non_abs1 = report.counts.non_abs1,
            cap = report.counts.cap,
            unknown_cycles = report.cycles.len(),
            renormalizations = report.renormalizations,
            elapsed = ?report.elapsed,
            "sweep finished"
        );
        Ok(report)
    }

    fn run_sequential(&self, agg: &mut Aggregator) {
        for start in self.config.lo..=self.config.hi {
            agg.absorb(Record::classify(&self.classifier, start));
        }
    }

    fn run_parallel(&self, agg: &mut Aggregator) -> Result<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("collatz-worker-{i}"))
            .build()?;
        tracing::debug!(workers = self.workers, "worker pool ready");

        let expected = self.config.len();
        let (lo, hi) = (self.config.lo, self.config.hi);
        let classifier = self.classifier;
        let (tx, rx) = mpsc::sync_channel::<Record>(CHANNEL_DEPTH);

        std::thread::scope(|scope| {
            let producer = scope.spawn(move || {
                pool.install(|| {
                    (lo..=hi)
                        .into_par_iter()
                        .try_for_each_with(tx, |tx, start| {
                            tx.send(Record::classify(&classifier, start))
                        })
                })
            });

            // Ends once every worker's sender is dropped.
            for record in rx {
                agg.absorb(record);
            }

            match producer.join() {
                Ok(Ok(())) => {}
                Ok(Err(_)) => {
                    return Err(Error::Disconnected {
                        received: agg.received(),
                        expected,
                    })
                }
                Err(payload) => std::panic::resume_unwind(payload),
            }
            if agg.received() != expected {
                return Err(Error::Disconnected {
                    received: agg.received(),
                    expected,
                });
            }
            Ok(())
        })
    }
}

/// Validate `config` and sweep its range.
///
/// # Errors
///
/// See [`Sweep::new`] and [`Sweep::run`].
pub fn run_sweep(config: &SweepConfig) -> Result<SweepReport> {
    Sweep::new(config.clone())?.run()
}
