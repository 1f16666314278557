//! Query compilation error types

use thiserror::Error;

/// Errors raised while building or compiling a report query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A builder argument was empty or otherwise unusable
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Start of a date range is after its end, or the range text is unreadable
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// Limit must be a non-negative integer
    #[error("invalid limit: {0} (must be non-negative)")]
    InvalidLimit(i64),

    /// A required field was never set before compile
    #[error("{0} required")]
    MissingField(&'static str),

    /// Two different metric filters were given the same id
    #[error("duplicate metric filter id: {0}")]
    DuplicateFilterId(String),

    /// Search criteria could not be composed into a clause
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl QueryError {
    /// Whether this error rejects caller input (as opposed to a malformed clause tree)
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Configuration(_))
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type for query operations
pub type Result<T> = std::result::Result<T, QueryError>;
