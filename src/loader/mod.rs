//! # CSV Loading
//!
//! Parses headerless delimited files into [`Table`] values. The files carry
//! no reliable header row, so the caller supplies the column semantics as an
//! ordered list of names (position = index). [`load_single`] reads one file
//! verbatim; [`load_multiple`] reads one same-shape file per worker node and
//! merges them into a single wide table, keeping the shared key column once
//! and renaming every node's data columns by source ordinal.

use crate::table::layout::ColumnLayout;
use crate::table::{Table, TableError};
use csv::ReaderBuilder;
use std::path::Path;
use thiserror::Error;

/// Errors raised while parsing delimited input files.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened
    #[error("Failed to open '{path}': {source}")]
    OpenError { path: String, source: csv::Error },

    /// A record could not be read or decoded
    #[error("Failed to read '{path}': {source}")]
    ReadError { path: String, source: csv::Error },

    /// A record's field count does not match the column specification
    #[error("Row {row} of '{path}' has {found} fields, expected {expected}")]
    FieldCount {
        path: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Node files expected to merge by position have different row counts
    #[error("'{path}' has {found} rows but '{first}' has {expected}")]
    RowCount {
        path: String,
        first: String,
        expected: usize,
        found: usize,
    },

    /// No input files were given
    #[error("No input files to load")]
    NoInput,

    #[error("{0}")]
    TableError(#[from] TableError),
}

/// Reads one delimited file into a table whose columns mirror `spec`.
///
/// Every record must have exactly `spec.len()` fields; cell values are kept
/// as raw strings in file order. When the key column (index 0) of the first
/// and last records parses as an integer timestamp, the table's time bounds
/// are set from them.
pub fn load_single<P: AsRef<Path>>(spec: &[&str], path: P) -> Result<Table, LoadError> {
    let rows = read_records(spec.len(), path.as_ref())?;

    let mut layout = ColumnLayout::new();
    layout.extend(spec.iter().copied())?;

    let mut table = Table::from_layout(layout);
    table.min_timestamp = key_timestamp(rows.first());
    table.max_timestamp = key_timestamp(rows.last());
    for row in rows {
        table.push_row(row)?;
    }
    Ok(table)
}

/// Reads N files sharing the same column semantics and merges them into one
/// wide table.
///
/// The key column (index 0) appears once, from the first file, under its
/// spec name. File `i` contributes its remaining columns renamed
/// `<name>_<i+1>`, so per-node metric columns stay discoverable by prefix.
/// Rows merge by position; all files must have the same row count.
pub fn load_multiple<P: AsRef<Path>>(spec: &[&str], paths: &[P]) -> Result<Table, LoadError> {
    let first = paths.first().ok_or(LoadError::NoInput)?;
    let first_path = first.as_ref().display().to_string();

    let mut layout = ColumnLayout::new();
    layout.push(spec[0])?;

    let mut merged: Vec<Vec<String>> = Vec::new();
    for (ordinal, path) in paths.iter().enumerate() {
        let rows = read_records(spec.len(), path.as_ref())?;
        if ordinal == 0 {
            merged = rows.iter().map(|row| vec![row[0].clone()]).collect();
        } else if rows.len() != merged.len() {
            return Err(LoadError::RowCount {
                path: path.as_ref().display().to_string(),
                first: first_path,
                expected: merged.len(),
                found: rows.len(),
            });
        }
        for name in &spec[1..] {
            layout.push(&format!("{}_{}", name, ordinal + 1))?;
        }
        for (row, source) in merged.iter_mut().zip(&rows) {
            row.extend(source[1..].iter().cloned());
        }
    }

    let mut table = Table::from_layout(layout);
    for row in merged {
        table.push_row(row)?;
    }
    Ok(table)
}

/// Reads all records of a headerless delimited file, checking each record's
/// field count against the column specification.
fn read_records(expected: usize, path: &Path) -> Result<Vec<Vec<String>>, LoadError> {
    let path_text = path.display().to_string();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| LoadError::OpenError {
            path: path_text.clone(),
            source,
        })?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|source| LoadError::ReadError {
            path: path_text.clone(),
            source,
        })?;
        if record.len() != expected {
            return Err(LoadError::FieldCount {
                path: path_text,
                row: index,
                expected,
                found: record.len(),
            });
        }
        rows.push(record.iter().map(str::to_owned).collect());
    }
    Ok(rows)
}

/// Parses the key column of a record as an integer timestamp, if possible.
fn key_timestamp(row: Option<&Vec<String>>) -> Option<i64> {
    row.and_then(|cells| cells.first())
        .and_then(|cell| cell.parse().ok())
}
