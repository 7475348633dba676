//! # Benchmerge
//!
//! Combines benchmark time-series results with per-process resource-usage
//! samples collected independently on several worker nodes, producing one
//! aligned table per tested system and one cross-system comparison table.
//!
//! ## Pipeline
//!
//! - [`loader`] parses headerless delimited files into [`table::Table`]
//!   values, merging per-node column namespaces into one wide table
//! - [`combine`] aligns a benchmark series with the multi-node resource
//!   table by timestamp and appends cross-node metric averages
//! - [`compare`] interleaves the key metrics of several merged tables into
//!   a single comparison table, aligned by row position
//! - [`paths`] derives the conventional artifact paths of a tested system
//!   from its path prefix
//!
//! The whole pipeline is a synchronous, fail-fast batch process over files
//! already materialized on disk: any error aborts the run, nothing is
//! retried, and no partial output is treated as valid.

pub mod combine;
pub mod compare;
pub mod error;
pub mod loader;
pub mod paths;
pub mod table;
