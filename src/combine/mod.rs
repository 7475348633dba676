//! # Per-System Combination
//!
//! Aligns a benchmark time-series table with a multi-node resource-usage
//! table by timestamp and merges them into one table per tested system.
//!
//! The resource monitor starts polling before the benchmark begins, so its
//! table usually carries leading rows with no benchmark counterpart. The
//! combiner locates the resource row whose integer timestamp equals the
//! benchmark's first recorded timestamp, drops everything before it, and
//! from there merges row by row: benchmark fields, per-node resource fields,
//! then one cross-node average per [`metrics::MetricGroup`].

pub mod metrics;

use crate::combine::metrics::MetricGroup;
use crate::table::layout::ColumnLayout;
use crate::table::{Table, TableError};
use thiserror::Error;

/// Errors raised while combining a benchmark table with resource samples.
#[derive(Error, Debug)]
pub enum CombineError {
    /// A resource key field is not a valid integer timestamp
    #[error("Invalid timestamp '{value}' at resource row {row}")]
    TimestampError { row: usize, value: String },

    /// The benchmark table carries no time bounds to align against
    #[error("Benchmark table has no start timestamp")]
    MissingTimeBounds,

    /// No resource row matches the benchmark's start timestamp
    #[error("No resource row matches benchmark start timestamp {timestamp}")]
    NoAlignment { timestamp: i64 },

    /// A per-node metric field is not a valid number
    #[error("Invalid value '{value}' in column '{column}' at resource row {row}")]
    MetricError {
        row: usize,
        column: String,
        value: String,
    },

    /// The aligned resource table is shorter than the benchmark table
    #[error("Resource table has {found} rows after alignment, benchmark has {needed}")]
    InsufficientRows { needed: usize, found: usize },

    #[error("{0}")]
    TableError(#[from] TableError),
}

/// Merges a benchmark table with a multi-node resource table.
///
/// The merged table starts with the benchmark columns unchanged, continues
/// with every resource column except the shared key, and ends with one
/// average column per metric group. Its row count equals the benchmark's;
/// resource rows beyond that range are ignored, since the monitor keeps
/// polling after the benchmark finishes.
pub fn combine(
    bench: &Table,
    resources: &Table,
    groups: &[MetricGroup],
) -> Result<Table, CombineError> {
    let start = bench.min_timestamp.ok_or(CombineError::MissingTimeBounds)?;
    let offset = alignment_offset(resources, start)?;
    let resource_rows = &resources.rows()[offset..];
    if resource_rows.len() < bench.row_count() {
        return Err(CombineError::InsufficientRows {
            needed: bench.row_count(),
            found: resource_rows.len(),
        });
    }

    let mut layout = ColumnLayout::new();
    layout.extend(bench.column_names().iter().map(String::as_str))?;
    layout.extend(resources.column_names()[1..].iter().map(String::as_str))?;
    for group in groups {
        layout.push(&group.output)?;
    }

    // Per-group positions of the contributing columns within a resource row.
    let group_columns: Vec<Vec<usize>> = groups
        .iter()
        .map(|group| {
            resources
                .column_names()
                .iter()
                .enumerate()
                .skip(1)
                .filter(|(_, name)| group.matches(name))
                .map(|(index, _)| index)
                .collect()
        })
        .collect();

    let mut merged = Table::from_layout(layout);
    merged.min_timestamp = bench.min_timestamp;
    merged.max_timestamp = bench.max_timestamp;
    for (index, bench_row) in bench.rows().iter().enumerate() {
        let resource_row = &resource_rows[index];
        let mut row = bench_row.clone();
        row.extend(resource_row[1..].iter().cloned());
        for columns in &group_columns {
            row.push(average(resources, resource_row, offset + index, columns)?);
        }
        merged.push_row(row)?;
    }
    Ok(merged)
}

/// Finds the index of the first resource row whose key column equals the
/// benchmark's start timestamp.
fn alignment_offset(resources: &Table, start: i64) -> Result<usize, CombineError> {
    for (index, row) in resources.rows().iter().enumerate() {
        let value = row.first().map(String::as_str).unwrap_or("");
        let timestamp: i64 = value.parse().map_err(|_| CombineError::TimestampError {
            row: index,
            value: value.to_owned(),
        })?;
        if timestamp == start {
            return Ok(index);
        }
    }
    Err(CombineError::NoAlignment { timestamp: start })
}

/// Folds one row's contributing columns into a two-decimal arithmetic mean.
fn average(
    resources: &Table,
    row: &[String],
    row_index: usize,
    columns: &[usize],
) -> Result<String, CombineError> {
    let mut total = 0.0;
    for &column in columns {
        let value: f64 = row[column].parse().map_err(|_| CombineError::MetricError {
            row: row_index,
            column: resources.column_names()[column].clone(),
            value: row[column].clone(),
        })?;
        total += value;
    }
    // A group with no contributing columns averages to zero.
    let sources = columns.len().max(1);
    Ok(format!("{:.2}", total / sources as f64))
}
