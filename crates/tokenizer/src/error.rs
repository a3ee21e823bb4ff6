//! Error types shared across the gramset crates.

use thiserror::Error;

/// Main error type for tokenization and cardinality computation.
#[derive(Error, Debug)]
pub enum GramsetError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unknown mean function name
    #[error("Unknown mean function: {0}")]
    UnknownMean(String),

    /// Population requested but no alphabet is resolvable
    #[error("Population size is unresolvable: no alphabet configured or inferable")]
    UnresolvablePopulation,

    /// A cardinality accessor was called before any token pair was tokenized
    #[error("No token pair has been tokenized yet")]
    NotTokenized,
}

/// Result type alias for gramset operations.
pub type Result<T> = std::result::Result<T, GramsetError>;
