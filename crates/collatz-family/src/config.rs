//! Sweep configuration.
//!
//! Loaded from TOML or built in code. Every field has a default, so a file
//! only needs the keys it changes:
//!
//! ```toml
//! family = "W+1"
//! lo = -200
//! hi = 200
//! cap = 200
//! workers = 4
//! fingerprint = "absolute"
//! ```
//!
//! Malformed family tags fail here, before any sweep starts.
//!
//! # Examples
//!
//! ```
//! use collatz_family::{Family, FingerprintMode, SweepConfig};
//!
//! let config = SweepConfig::from_toml_str("family = \"W-1\"\nlo = 1\nhi = 99").unwrap();
//! assert_eq!(config.family, Family::W_MINUS);
//! assert_eq!(config.cap, 1000);
//! assert_eq!(config.fingerprint, FingerprintMode::Signed);
//!
//! assert!(SweepConfig::from_toml_str("family = \"Q+1\"").is_err());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::Classifier;
use crate::error::{Error, Result};
use crate::family::Family;
use crate::fingerprint::FingerprintMode;

/// Parameters of one range sweep. Immutable once the sweep starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// Operator family.
    pub family: Family,
    /// Inclusive lower bound.
    pub lo: i64,
    /// Inclusive upper bound.
    pub hi: i64,
    /// Maximum accelerated steps per starting value.
    pub cap: u64,
    /// Keep the first example cycle per closed label.
    pub examples: bool,
    /// Aggregate unknown closed cycles.
    pub report_cycles: bool,
    /// Starting values kept per unknown cycle.
    pub max_samples_per_cycle: usize,
    /// Fingerprint comparison space.
    pub fingerprint: FingerprintMode,
    /// Requested degree of parallelism; 1 runs sequentially.
    pub workers: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            family: Family::B_PLUS,
            lo: -100_000,
            hi: 100_000,
            cap: 1000,
            examples: true,
            report_cycles: true,
            max_samples_per_cycle: 3,
            fingerprint: FingerprintMode::Signed,
            workers: 4,
        }
    }
}

impl SweepConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] for malformed TOML, unknown keys or an
    /// unrecognized family tag.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigIo`] when the file cannot be read, otherwise
    /// the same errors as [`SweepConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check the range and cap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyRange`] when `lo > hi`,
    /// [`Error::RangeTooWide`] when the range cannot be counted in a `u64`
    /// and [`Error::ZeroCap`] when `cap == 0`.
    pub fn validate(&self) -> Result<()> {
        if self.lo > self.hi {
            return Err(Error::EmptyRange {
                lo: self.lo,
                hi: self.hi,
            });
        }
        if self.width() > u128::from(u64::MAX) {
            return Err(Error::RangeTooWide {
                lo: self.lo,
                hi: self.hi,
            });
        }
        if self.cap == 0 {
            return Err(Error::ZeroCap);
        }
        Ok(())
    }

    /// Number of starting values in `[lo, hi]` (0 when the range is empty).
    ///
    /// Saturates at `u64::MAX` for the one range too wide to count, which
    /// [`SweepConfig::validate`] rejects.
    pub fn len(&self) -> u64 {
        u64::try_from(self.width()).unwrap_or(u64::MAX)
    }

    fn width(&self) -> u128 {
        if self.lo > self.hi {
            return 0;
        }
        (i128::from(self.hi) - i128::from(self.lo) + 1).unsigned_abs()
    }

    /// True when `[lo, hi]` is empty.
    pub fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    /// Worker count actually used: the request clamped to
    /// `[1, available_parallelism]`.
    pub fn effective_workers(&self) -> usize {
        let cores = std::thread::available_parallelism().map_or(1, usize::from);
        self.workers.clamp(1, cores.max(1))
    }

    /// Classifier matching this configuration.
    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.family, self.cap)
            .with_examples(self.examples)
            .with_unknown_cycles(self.report_cycles)
            .with_fingerprint(self.fingerprint)
    }
}
