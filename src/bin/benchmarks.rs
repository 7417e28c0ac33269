//! Runs the full CSV benchmark sweep.
//!
//! Usage: `benchmarks [output-dir]` (defaults to `bench-results/`).

use std::{env, path::PathBuf, process};

use ordset::harness::{Harness, Range};

fn main() {
    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("bench-results"));
    let range = Range::new(1_000, 100_000, 16).log_scale().folds(3);

    let harness = Harness::new();
    if let Err(err) = harness.run(&out_dir, &range) {
        eprintln!("benchmark run failed: {err}");
        process::exit(1);
    }
    println!("results written to {}", out_dir.display());
}
