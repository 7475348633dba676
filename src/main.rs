//! Command-line driver for the benchmark combination pipeline.
//!
//! For every `--prefix`, merges that system's benchmark series with its
//! per-node resource samples and writes `<prefix>final.csv`; then compares
//! all systems side by side into the `--output` file. The run is fail-fast:
//! the first error aborts everything.

use anyhow::{Context, Result};
use benchmerge::combine::combine;
use benchmerge::combine::metrics::default_groups;
use benchmerge::compare::{compare, System};
use benchmerge::error::BenchmergeError;
use benchmerge::loader::{load_multiple, load_single};
use benchmerge::paths::{system_suffix, SystemPaths};
use benchmerge::table::Table;
use clap::Parser;
use log::info;
use std::path::PathBuf;

/// Column semantics of a benchmark time-series file.
const BENCH_COLUMNS: [&str; 3] = ["unix_ts", "avg_latency_ms", "throughput"];

/// Column semantics of one node's resource sample file.
const NODE_COLUMNS: [&str; 3] = ["unix_ts", "cpu", "memory_mb"];

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Combine benchmark and resource-usage CSVs across tested systems"
)]
struct Args {
    /// Path prefix of one tested system's artifacts; repeat per system
    #[arg(long = "prefix", required = true)]
    prefixes: Vec<String>,

    /// Output path for the cross-system comparison table
    #[arg(long, default_value = "compared.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut systems = Vec::with_capacity(args.prefixes.len());
    for prefix in &args.prefixes {
        let table = combine_system(prefix)
            .with_context(|| format!("Failed to combine system '{prefix}'"))?;
        systems.push(System {
            suffix: system_suffix(prefix),
            table,
        });
    }

    let compared = compare(&systems)?;
    compared.write_csv(&args.output)?;
    info!("Saved comparison table to {}", args.output.display());
    Ok(())
}

/// Merges one system's benchmark series with its node samples and persists
/// the merged table to the conventional `final` path.
fn combine_system(prefix: &str) -> Result<Table, BenchmergeError> {
    let paths = SystemPaths::from_prefix(prefix)?;
    info!("Combining {:?}", paths.nodes);

    let resources = load_multiple(&NODE_COLUMNS, &paths.nodes)?;
    let bench = load_single(&BENCH_COLUMNS, &paths.timeseries)?;
    let merged = combine(&bench, &resources, &default_groups())?;
    merged.write_csv(&paths.merged)?;
    info!("Saved merged table to {}", paths.merged.display());
    Ok(merged)
}
