//! Collatz Family - accelerated Wall/Bridge classifier.
//!
//! Classifies integer starting values under the four accelerated
//! Collatz-like operator families `W+1`, `W-1`, `B+1` and `B-1`, and
//! aggregates the unknown closed cycles a range sweep runs into.
//!
//! # Dynamics
//!
//! ```text
//! Shape  = Wall   : even n -> n / 2
//!          Bridge : even n -> n / -2
//! Sign   = +1 / -1: odd  n -> 3n + sign
//!
//! Accelerated step (odd -> odd):
//!   O±(m) = (3m ± 1) / 2^v2(3m ± 1)          O+(0) = +1, O-(0) = -1
//!   Bridge additionally negates when v2(3m ± 1) is odd.
//! ```
//!
//! Zero is treated as odd (the odd-zero convention). All arithmetic is
//! exact: trajectory values are [`BigInt`](num_bigint::BigInt).
//!
//! # Labels
//!
//! | Label | Meaning |
//! |-------|---------|
//! | `ABS1` | closed on `[1]` or `[-1]` in a domain-stable configuration |
//! | `NON-ABS1` | closed on any other cycle |
//! | `CAP` | no closure within the step cap |
//!
//! # Example: single trajectory
//!
//! ```
//! use collatz_family::{Classifier, Family, Label};
//! use num_bigint::BigInt;
//!
//! let family: Family = "W+1".parse().unwrap();
//! let classifier = Classifier::new(family, 200);
//!
//! let outcome = classifier.classify(&BigInt::from(27));
//! assert_eq!(outcome.label, Label::AbsoluteOneLoop);
//! assert!(outcome.hit_one);
//!
//! // Negative starts under W+1 settle on the mirrored cycles instead.
//! let outcome = classifier.classify(&BigInt::from(-5));
//! assert_eq!(outcome.label, Label::OtherClosedCycle);
//! ```
//!
//! # Example: range sweep
//!
//! ```
//! use collatz_family::{run_sweep, SweepConfig};
//!
//! let config = SweepConfig {
//!     family: "B-1".parse().unwrap(),
//!     lo: -50,
//!     hi: 50,
//!     cap: 200,
//!     workers: 1,
//!     ..SweepConfig::default()
//! };
//! let report = run_sweep(&config).unwrap();
//! assert_eq!(report.counts.abs1, 101);
//! assert!(report.cycles.is_empty());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

// 2-adic valuation and the accelerated odd-step operators
pub mod arith;

// Operator family tags (shape x sign)
pub mod family;

// Initial-value normalizer and per-family step functions
pub mod step;

// ABS1 domain gating and known trivial cycles
pub mod gating;

// Rotation-invariant cycle fingerprints
pub mod fingerprint;

// Single-trajectory walker
pub mod classify;

// Deduplicated unknown-cycle registry
pub mod registry;

// Sweep configuration (serde / TOML)
pub mod config;

// Range sweep and result aggregation
pub mod sweep;

// Aggregated sweep result record
pub mod report;

mod error;

pub use arith::{accelerated_step_negative, accelerated_step_positive, odd_part, valuation2};
pub use classify::{Classifier, Label, Outcome, Trajectory};
pub use config::SweepConfig;
pub use error::{Error, Result};
pub use family::{Family, OddSign, Shape};
pub use fingerprint::{canonicalize, Fingerprint, FingerprintMode};
pub use gating::{is_canonical_attractor, is_known_trivial_cycle};
pub use registry::{CycleEntry, CycleRegistry};
pub use report::{Bracketed, CycleSummary, Example, Examples, HitCounts, LabelCounts, SweepReport};
pub use step::{normalize_initial, step, StepFn};
pub use sweep::{run_sweep, Aggregator, Record, Sweep};
