//! Error types for derived-quantity estimation

use thiserror::Error;

/// Result type for estimator internals
pub type DerivationResult<T> = Result<T, DerivationError>;

/// Why a derived quantity could not be evaluated
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DerivationError {
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    #[error("{0} must be positive, got {1}")]
    NonPositive(&'static str, f64),

    #[error("non-finite {0}")]
    NonFinite(&'static str),
}
