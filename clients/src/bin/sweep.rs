//! `collatz-sweep` classifies every starting value in a range and prints the
//! aggregated report.
//!
//! Settings come from an optional TOML file (`--config`); any flag given on
//! the command line overrides the file. Without either, the built-in
//! defaults apply (`B+1` over `[-100000, 100000]`, cap 1000, 4 workers).
//!
//! **Usage:**
//! ```text
//! collatz-sweep [--config <file>] [--family <tag>] [--lo <n>] [--hi <n>] [--cap <n>]
//!               [--workers <n> | --sequential] [--abs] [--json]
//! ```
//!
//! Logs go to stderr (`RUST_LOG` overrides the default `info` level); the
//! report goes to stdout.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use collatz_family::{run_sweep, Family, FingerprintMode, SweepConfig};
use tracing_subscriber::EnvFilter;

/// Sweep a range of starting values under one operator family.
#[derive(Parser)]
#[command(
    name = "collatz-sweep",
    about = "Classify a range of starting values under an accelerated Collatz family"
)]
struct Args {
    /// TOML sweep configuration; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Operator family tag: W+1, W-1, B+1 or B-1.
    #[arg(long, short = 't', value_parser = parse_family)]
    family: Option<Family>,

    /// Inclusive lower bound.
    #[arg(long, allow_negative_numbers = true)]
    lo: Option<i64>,

    /// Inclusive upper bound.
    #[arg(long, allow_negative_numbers = true)]
    hi: Option<i64>,

    /// Maximum accelerated steps per starting value.
    #[arg(long)]
    cap: Option<u64>,

    /// Worker threads (clamped to the available cores).
    #[arg(long, short = 'j')]
    workers: Option<usize>,

    /// Classify on the calling thread only.
    #[arg(long, conflicts_with = "workers")]
    sequential: bool,

    /// Do not keep example cycles.
    #[arg(long)]
    no_examples: bool,

    /// Do not aggregate unknown cycles.
    #[arg(long)]
    no_cycles: bool,

    /// Sample starting values kept per unknown cycle.
    #[arg(long)]
    samples: Option<usize>,

    /// Fingerprint cycles by absolute value, merging mirror images.
    #[arg(long)]
    abs: bool,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn into_config(self) -> Result<SweepConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let config = SweepConfig::load(path)
                    .with_context(|| format!("loading {}", path.display()))?;
                tracing::info!(path = %path.display(), "loaded sweep config");
                config
            }
            None => SweepConfig::default(),
        };

        if let Some(family) = self.family {
            config.family = family;
        }
        if let Some(lo) = self.lo {
            config.lo = lo;
        }
        if let Some(hi) = self.hi {
            config.hi = hi;
        }
        if let Some(cap) = self.cap {
            config.cap = cap;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if self.sequential {
            config.workers = 1;
        }
        if self.no_examples {
            config.examples = false;
        }
        if self.no_cycles {
            config.report_cycles = false;
        }
        if let Some(samples) = self.samples {
            config.max_samples_per_cycle = samples;
        }
        if self.abs {
            config.fingerprint = FingerprintMode::Absolute;
        }
        Ok(config)
    }
}

fn parse_family(s: &str) -> Result<Family, String> {
    s.parse().map_err(|e: collatz_family::Error| e.to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let json = args.json;
    let config = args.into_config()?;

    let report = run_sweep(&config)
        .with_context(|| format!("sweeping {} over [{}, {}]", config.family, config.lo, config.hi))?;

    if json {
        let out = serde_json::to_string_pretty(&report).context("serializing report")?;
        println!("{out}");
    } else {
        print!("{report}");
    }
    Ok(())
}
