//! Filesystem layout conventions for benchmark artifacts.
//!
//! Each tested system groups its files under a shared path prefix:
//! `<prefix>timeseries.csv` holds the benchmark series, one
//! `<prefix>server-<n>.csv` per worker node holds that node's resource
//! samples, and `<prefix>final.csv` receives the merged table. These are
//! conventions, not a wire protocol; callers may substitute any scheme.

use glob::glob;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving a system's artifact paths.
#[derive(Error, Debug)]
pub enum PathsError {
    #[error("Invalid node file pattern '{pattern}': {source}")]
    PatternError {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Unreadable node file path: {0}")]
    GlobError(#[from] glob::GlobError),

    #[error("No node files match '{0}'")]
    NoNodeFiles(String),
}

/// Artifact paths of one tested system, derived from its path prefix.
#[derive(Clone, Debug)]
pub struct SystemPaths {
    /// Benchmark time-series input
    pub timeseries: PathBuf,
    /// Per-node resource sample inputs, in node order
    pub nodes: Vec<PathBuf>,
    /// Merged per-system output
    pub merged: PathBuf,
}

impl SystemPaths {
    /// Derives the conventional artifact paths for `prefix`. Node files are
    /// every existing `<prefix>server-*.csv`, sorted by name.
    pub fn from_prefix(prefix: &str) -> Result<Self, PathsError> {
        let pattern = format!("{prefix}server-*.csv");
        let mut nodes = glob(&pattern)
            .map_err(|source| PathsError::PatternError {
                pattern: pattern.clone(),
                source,
            })?
            .collect::<Result<Vec<PathBuf>, _>>()?;
        nodes.sort();
        if nodes.is_empty() {
            return Err(PathsError::NoNodeFiles(pattern));
        }
        Ok(Self {
            timeseries: PathBuf::from(format!("{prefix}timeseries.csv")),
            nodes,
            merged: PathBuf::from(format!("{prefix}final.csv")),
        })
    }
}

/// Derives the human-readable system suffix from a path prefix: the last
/// `-`-separated token of the final path component. `testdata/test-01-etcd-`
/// becomes `etcd`.
pub fn system_suffix(prefix: &str) -> String {
    let name = prefix
        .rsplit(|character| character == '/' || character == '\\')
        .next()
        .unwrap_or(prefix);
    let name = name.trim_end_matches('-');
    name.rsplit('-').next().unwrap_or(name).to_owned()
}
