use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("{row}: KPI field '{field}' is not finite")]
    NonFiniteField { row: String, field: String },

    #[error("duplicate store '{store}' in the reporting period")]
    DuplicateStore { store: String },

    #[error("expected exactly one total region row, found {count}")]
    TotalRowCount { count: usize },

    #[error("dataset section '{section}' is empty")]
    EmptySection { section: &'static str },

    #[error("{row}: cluster '{actual}' does not match store record cluster '{expected}'")]
    ClusterMismatch {
        row: String,
        expected: String,
        actual: String,
    },

    #[error("store alias '{alias}' points at unknown store '{store}'")]
    UnknownAliasTarget { alias: String, store: String },

    #[error("quiz question {index}: {reason}")]
    InvalidQuestion { index: usize, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DashResult<T> = Result<T, DashError>;
