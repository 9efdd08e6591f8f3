//! `collatz-trace` walks a single starting value and prints its full
//! odd-phase trajectory, the closing cycle and its label.
//!
//! **Usage:**
//! ```text
//! collatz-trace <start> [--family <tag>] [--cap <n>] [--json]
//! ```
//!
//! The starting value may be arbitrarily large.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use anyhow::{ensure, Context, Result};
use clap::Parser;
use collatz_family::{canonicalize, Bracketed, Classifier, Family, FingerprintMode, Trajectory};
use num_bigint::BigInt;
use tracing_subscriber::EnvFilter;

/// Trace one trajectory.
#[derive(Parser)]
#[command(
    name = "collatz-trace",
    about = "Trace one starting value under an accelerated Collatz family"
)]
struct Args {
    /// Starting value.
    #[arg(allow_negative_numbers = true)]
    start: BigInt,

    /// Operator family tag: W+1, W-1, B+1 or B-1.
    #[arg(long, short = 't', value_parser = parse_family, default_value = "W+1")]
    family: Family,

    /// Maximum accelerated steps.
    #[arg(long, default_value_t = 1000)]
    cap: u64,

    /// Print the trajectory as JSON instead of text.
    #[arg(long)]
    json: bool,
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

fn decimal(values: &[BigInt]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn to_json(family: Family, t: &Trajectory) -> serde_json::Value {
    let cycle = t.cycle();
    serde_json::json!({
        "family": family.to_string(),
        "start": t.start.to_string(),
        "label": t.label.tag(),
        "hit_one": t.hit_one,
        "steps": t.steps,
        "renormalizations": t.renormalizations,
        "tail": decimal(t.tail()),
        "cycle": cycle.map(decimal),
        "fingerprint": cycle.map(|c| decimal(canonicalize(c, FingerprintMode::Signed).values())),
    })
}

fn print_text(family: Family, t: &Trajectory) {
    println!("=== Collatz Family Trace ===");
    println!("Type        : {family}");
    println!("Start       : {}", t.start);
    println!("Steps       : {}", t.steps);
    println!("Label       : {}", t.label);
    println!("Hit-1       : {}", if t.hit_one { "YES" } else { "NO" });
    println!("Tail        : {}  (len={})", Bracketed(t.tail()), t.tail().len());
    match t.cycle() {
        Some(cycle) => {
            println!("Cycle       : {}  (len={})", Bracketed(cycle), cycle.len());
            println!(
                "Fingerprint : {}",
                canonicalize(cycle, FingerprintMode::Signed)
            );
        }
        None => println!("Cycle       : none within cap"),
    }
    if t.renormalizations > 0 {
        println!("Renormalized: {}", t.renormalizations);
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    ensure!(args.cap > 0, "step cap must be positive");

    let classifier = Classifier::new(args.family, args.cap);
    let trajectory = classifier.trace(&args.start);
    tracing::debug!(
        family = %args.family,
        start = %args.start,
        steps = trajectory.steps,
        "trace finished"
    );

    if args.json {
        let out = serde_json::to_string_pretty(&to_json(args.family, &trajectory))
            .context("serializing trajectory")?;
        println!("{out}");
    } else {
        print_text(args.family, &trajectory);
    }
    Ok(())
}
