use thiserror::Error;

/// Main error type for the benchmerge pipeline.
/// Aggregates the per-module errors raised while combining one system's
/// artifacts or comparing systems side by side.
#[derive(Error, Debug)]
pub enum BenchmergeError {
    #[error("{0}")]
    TableError(#[from] crate::table::TableError),

    #[error("{0}")]
    LoadError(#[from] crate::loader::LoadError),

    #[error("{0}")]
    CombineError(#[from] crate::combine::CombineError),

    #[error("{0}")]
    CompareError(#[from] crate::compare::CompareError),

    #[error("{0}")]
    PathsError(#[from] crate::paths::PathsError),
}
