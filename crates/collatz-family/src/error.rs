//! Error types for configuration and sweep setup.
//!
//! Classification itself never fails: a trajectory that does not close is
//! labeled `CAP`, not reported as an error.

use std::path::PathBuf;

/// Errors raised while building or running a sweep.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The operator family tag is not one of `W+1`, `W-1`, `B+1`, `B-1`.
    #[error("unrecognized operator family `{0}` (expected one of W+1, W-1, B+1, B-1)")]
    UnknownFamily(String),

    /// The inclusive range is empty.
    #[error("empty range: lo ({lo}) is greater than hi ({hi})")]
    EmptyRange {
        /// Lower bound.
        lo: i64,
        /// Upper bound.
        hi: i64,
    },

    /// The range holds more starting values than a `u64` can count. Only
    /// the full `[i64::MIN, i64::MAX]` range does.
    #[error("range [{lo}, {hi}] holds more than u64::MAX starting values")]
    RangeTooWide {
        /// Lower bound.
        lo: i64,
        /// Upper bound.
        hi: i64,
    },

    /// The step cap must be at least 1.
    #[error("step cap must be positive")]
    ZeroCap,

    /// A sweep configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigIo {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A sweep configuration could not be parsed.
    #[error("invalid sweep config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The worker pool could not be started.
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    /// The result channel closed before every starting value was classified.
    #[error("result channel disconnected after {received} of {expected} results")]
    Disconnected {
        /// Results aggregated before the channel closed.
        received: u64,
        /// Results the range should have produced.
        expected: u64,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
