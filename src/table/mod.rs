//! # Tabular Data Model
//!
//! This module provides the [`Table`] type shared by every pipeline stage:
//! an ordered, named container of string cell values, together with the
//! [`layout::ColumnLayout`] builder that allocates column indices.
//!
//! Column names and their zero-based indices form a bijection that is only
//! ever produced by the layout builder and never mutated afterwards, so the
//! name map and the index-ordered name list cannot drift apart.

pub mod layout;

use crate::table::layout::ColumnLayout;
use csv::WriterBuilder;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors related to table construction and serialization.
#[derive(Error, Debug)]
pub enum TableError {
    /// A column name was registered twice
    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),

    /// A row does not span the table's full column set
    #[error("Row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The output file could not be created or written
    #[error("Failed to write '{path}': {source}")]
    WriteError { path: String, source: csv::Error },
}

/// An ordered, named table of string cells.
///
/// Created empty from a [`ColumnLayout`], populated once through
/// [`Table::push_row`], and serialized with [`Table::write_csv`]; there are
/// no update or delete operations. Ownership is single-threaded and
/// single-owner throughout the pipeline.
#[derive(Clone, Debug, Default)]
pub struct Table {
    /// Column name to zero-based index
    columns: HashMap<String, usize>,
    /// Column names in index order
    column_order: Vec<String>,
    /// Row-major cell values; every row spans the full column set
    rows: Vec<Vec<String>>,
    /// Earliest timestamp covered by the rows, when the producer knows it
    pub min_timestamp: Option<i64>,
    /// Latest timestamp covered by the rows, when the producer knows it
    pub max_timestamp: Option<i64>,
}

impl Table {
    /// Creates an empty table whose columns are the ones allocated in `layout`.
    pub fn from_layout(layout: ColumnLayout) -> Self {
        let (columns, column_order) = layout.into_parts();
        Self {
            columns,
            column_order,
            rows: Vec::new(),
            min_timestamp: None,
            max_timestamp: None,
        }
    }

    /// Returns the index registered for `name`, if any.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    /// Column names in index order.
    pub fn column_names(&self) -> &[String] {
        &self.column_order
    }

    pub fn column_count(&self) -> usize {
        self.column_order.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All rows, in insertion order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Appends a row spanning the full column set.
    pub fn push_row(&mut self, row: Vec<String>) -> Result<(), TableError> {
        if row.len() != self.column_count() {
            return Err(TableError::RowWidth {
                row: self.rows.len(),
                expected: self.column_count(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Serializes the table as delimited text: one header record with the
    /// column names in index order, then every row.
    ///
    /// The records are written to a staging file next to `path` and renamed
    /// into place, so a failed write never leaves a partial file under the
    /// target name.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        let path = path.as_ref();
        let staging = path.with_extension("tmp");
        let result = self
            .write_records(&staging)
            .and_then(|_| fs::rename(&staging, path).map_err(csv::Error::from));
        if result.is_err() {
            let _ = fs::remove_file(&staging);
        }
        result.map_err(|source| TableError::WriteError {
            path: path.display().to_string(),
            source,
        })
    }

    fn write_records(&self, path: &Path) -> Result<(), csv::Error> {
        let mut writer = WriterBuilder::new().from_path(path)?;
        writer.write_record(&self.column_order)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    fn three_columns() -> ColumnLayout {
        let mut layout = ColumnLayout::new();
        layout.push("unix_ts").unwrap();
        layout.push("avg_latency_ms").unwrap();
        layout.push("throughput").unwrap();
        layout
    }

    #[test]
    fn columns_stay_bijective() {
        let table = Table::from_layout(three_columns());

        assert_eq!(table.column_count(), 3);
        for (index, name) in table.column_names().iter().enumerate() {
            assert_eq!(table.column_index(name), Some(index));
        }
    }

    #[test]
    fn push_row_enforces_width() {
        let mut table = Table::from_layout(three_columns());

        assert!(table.push_row(row(&["1000", "5.0", "100"])).is_ok());
        let error = table.push_row(row(&["1001", "5.5"])).unwrap_err();
        assert!(matches!(
            error,
            TableError::RowWidth {
                row: 1,
                expected: 3,
                found: 2,
            }
        ));
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn write_csv_round_trips() {
        let mut table = Table::from_layout(three_columns());
        table.push_row(row(&["1000", "5.0", "100"])).unwrap();
        table.push_row(row(&["1001", "5.5", "110"])).unwrap();

        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("final.csv");
        table.write_csv(&path).unwrap();
        assert!(!directory.path().join("final.tmp").exists());

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .unwrap();
        let records: Vec<Vec<String>> = reader
            .records()
            .map(|record| record.unwrap().iter().map(str::to_owned).collect())
            .collect();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0], row(&["unix_ts", "avg_latency_ms", "throughput"]));
        assert_eq!(records[1], row(&["1000", "5.0", "100"]));
        assert_eq!(records[2], row(&["1001", "5.5", "110"]));
    }

    #[test]
    fn write_csv_rejects_bad_path() {
        let table = Table::from_layout(three_columns());
        let result = table.write_csv("no-such-directory/final.csv");
        assert!(matches!(result, Err(TableError::WriteError { .. })));
    }
}
