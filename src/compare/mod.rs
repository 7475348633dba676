//! # Cross-System Comparison
//!
//! Interleaves the key metrics of several per-system merged tables into one
//! wide comparison table. Alignment here is purely positional (row index to
//! row index), unlike the combiner's timestamp alignment: every merged
//! table is assumed to already share the same sampling cadence. Callers own
//! that precondition; it is not validated here.

use crate::table::layout::ColumnLayout;
use crate::table::{Table, TableError};
use thiserror::Error;

/// The metric columns every merged table contributes to the comparison.
pub const COMPARED_COLUMNS: [&str; 4] =
    ["avg_latency_ms", "throughput", "avg_cpu", "avg_memory_mb"];

/// Errors raised while building the comparison table.
#[derive(Error, Debug)]
pub enum CompareError {
    /// A system's merged table lacks one of the compared metric columns
    #[error("System '{suffix}' has no column '{column}'")]
    MissingColumn { suffix: String, column: String },

    #[error("{0}")]
    TableError(#[from] TableError),
}

/// One tested system's merged table together with the human-readable suffix
/// identifying it in the comparison table's column names.
#[derive(Clone, Debug)]
pub struct System {
    pub suffix: String,
    pub table: Table,
}

/// Builds the comparison table for an ordered sequence of systems.
///
/// Column 0 is `second`, a synthetic row sequence number; each system `i`
/// owns the four columns `<metric>_<suffix>` at indices `4*i+1..=4*i+4`.
/// The row count is the maximum across systems. Rows are created full-width
/// and every system writes into its own column positions, so a system with
/// fewer rows leaves its cells empty on later rows without shifting any
/// other system's values.
pub fn compare(systems: &[System]) -> Result<Table, CompareError> {
    let mut layout = ColumnLayout::new();
    layout.push("second")?;

    // Source column index of each compared metric, per system.
    let mut sources: Vec<[usize; 4]> = Vec::with_capacity(systems.len());
    for system in systems {
        let mut indexes = [0usize; 4];
        for (slot, column) in COMPARED_COLUMNS.iter().enumerate() {
            layout.push(&format!("{}_{}", column, system.suffix))?;
            indexes[slot] =
                system
                    .table
                    .column_index(column)
                    .ok_or_else(|| CompareError::MissingColumn {
                        suffix: system.suffix.clone(),
                        column: (*column).to_owned(),
                    })?;
        }
        sources.push(indexes);
    }

    let width = layout.len();
    let size = systems
        .iter()
        .map(|system| system.table.row_count())
        .max()
        .unwrap_or(0);

    let mut rows: Vec<Vec<String>> = (0..size)
        .map(|second| {
            let mut row = vec![String::new(); width];
            row[0] = second.to_string();
            row
        })
        .collect();
    for (position, system) in systems.iter().enumerate() {
        let base = 4 * position + 1;
        for (row, source) in rows.iter_mut().zip(system.table.rows()) {
            for (slot, &index) in sources[position].iter().enumerate() {
                row[base + slot] = source[index].clone();
            }
        }
    }

    let mut compared = Table::from_layout(layout);
    for row in rows {
        compared.push_row(row)?;
    }
    Ok(compared)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merged_table(rows: &[[&str; 4]]) -> Table {
        let mut layout = ColumnLayout::new();
        layout.push("unix_ts").unwrap();
        layout.extend(COMPARED_COLUMNS).unwrap();
        let mut table = Table::from_layout(layout);
        for (second, row) in rows.iter().enumerate() {
            let mut cells = vec![(1000 + second).to_string()];
            cells.extend(row.iter().map(|cell| cell.to_string()));
            table.push_row(cells).unwrap();
        }
        table
    }

    fn system(suffix: &str, rows: &[[&str; 4]]) -> System {
        System {
            suffix: suffix.to_owned(),
            table: merged_table(rows),
        }
    }

    #[test]
    fn compare_interleaves_system_columns() {
        let systems = [
            system("etcd", &[["5.0", "100", "20.00", "620.00"]]),
            system("zk", &[["7.0", "80", "25.00", "700.00"]]),
        ];

        let compared = compare(&systems).unwrap();

        assert_eq!(
            compared.column_names(),
            &[
                "second",
                "avg_latency_ms_etcd",
                "throughput_etcd",
                "avg_cpu_etcd",
                "avg_memory_mb_etcd",
                "avg_latency_ms_zk",
                "throughput_zk",
                "avg_cpu_zk",
                "avg_memory_mb_zk",
            ]
        );
        assert_eq!(compared.row_count(), 1);
        assert_eq!(
            compared.rows()[0],
            vec![
                "0", "5.0", "100", "20.00", "620.00", "7.0", "80", "25.00", "700.00",
            ]
        );
    }

    #[test]
    fn compare_sizes_to_longest_system() {
        let systems = [
            system(
                "etcd",
                &[
                    ["5.0", "100", "20.00", "620.00"],
                    ["5.5", "110", "22.00", "630.00"],
                ],
            ),
            system(
                "zk",
                &[
                    ["7.0", "80", "25.00", "700.00"],
                    ["7.5", "85", "26.00", "710.00"],
                    ["8.0", "90", "27.00", "720.00"],
                ],
            ),
        ];

        let compared = compare(&systems).unwrap();

        assert_eq!(compared.row_count(), 3);
        // The shorter system's third row leaves its four cells empty.
        assert_eq!(
            compared.rows()[2],
            vec!["2", "", "", "", "", "8.0", "90", "27.00", "720.00"]
        );
    }

    #[test]
    fn compare_is_order_independent_for_short_systems() {
        let systems = [
            system("zk", &[["7.0", "80", "25.00", "700.00"]]),
            system(
                "etcd",
                &[
                    ["5.0", "100", "20.00", "620.00"],
                    ["5.5", "110", "22.00", "630.00"],
                ],
            ),
        ];

        let compared = compare(&systems).unwrap();

        // The later system's second row lands in its own columns even though
        // the earlier system has no row there.
        assert_eq!(
            compared.rows()[1],
            vec!["1", "", "", "", "", "5.5", "110", "22.00", "630.00"]
        );
    }

    #[test]
    fn compare_requires_metric_columns() {
        let mut layout = ColumnLayout::new();
        layout.push("unix_ts").unwrap();
        layout.push("avg_latency_ms").unwrap();
        let incomplete = System {
            suffix: "etcd".to_owned(),
            table: Table::from_layout(layout),
        };

        let error = compare(&[incomplete]).unwrap_err();
        assert!(matches!(
            error,
            CompareError::MissingColumn { suffix, column }
                if suffix == "etcd" && column == "throughput"
        ));
    }

    #[test]
    fn compare_of_nothing_is_empty() {
        let compared = compare(&[]).unwrap();
        assert_eq!(compared.column_names(), &["second"]);
        assert_eq!(compared.row_count(), 0);
    }

    #[test]
    fn full_pipeline_from_files() {
        use crate::combine::{combine, metrics::default_groups};
        use crate::loader::{load_multiple, load_single};
        use std::fs;

        let directory = tempfile::tempdir().unwrap();
        let path = |name: &str| directory.path().join(name);
        fs::write(path("timeseries.csv"), "1000,5.0,100\n1001,5.5,110\n").unwrap();
        fs::write(path("server-1.csv"), "0999,5,500\n1000,10,600\n1001,12,610\n").unwrap();
        fs::write(path("server-2.csv"), "0999,5,500\n1000,20,620\n1001,22,630\n").unwrap();
        fs::write(path("server-3.csv"), "0999,5,500\n1000,30,640\n1001,32,650\n").unwrap();

        let resources = load_multiple(
            &["unix_ts", "cpu", "memory_mb"],
            &[path("server-1.csv"), path("server-2.csv"), path("server-3.csv")],
        )
        .unwrap();
        let bench = load_single(
            &["unix_ts", "avg_latency_ms", "throughput"],
            path("timeseries.csv"),
        )
        .unwrap();
        let merged = combine(&bench, &resources, &default_groups()).unwrap();

        let compared = compare(&[System {
            suffix: "etcd".to_owned(),
            table: merged,
        }])
        .unwrap();
        compared.write_csv(path("compared.csv")).unwrap();

        let content = fs::read_to_string(path("compared.csv")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "second,avg_latency_ms_etcd,throughput_etcd,avg_cpu_etcd,avg_memory_mb_etcd",
                "0,5.0,100,20.00,620.00",
                "1,5.5,110,22.00,630.00",
            ]
        );
    }
}
