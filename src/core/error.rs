//! Typed error handling for the careview engine
//!
//! Two failure modes are surfaced to the consumer for display:
//!
//! - [`ViewError::InvalidCriteria`]: malformed filter input (inverted date
//!   range, inverted score range, zero page size). Rejected up front rather
//!   than silently producing an empty result.
//! - [`ViewError::Fetch`]: the remote record source failed. The store and all
//!   derived structures collapse to empty — consistency over availability.
//!
//! A missing reference resolver is deliberately *not* an error: the filter
//! composer treats the affected criterion as non-excluding until the
//! directory data arrives (see `FilterCriteria::matches`).

use thiserror::Error;
use uuid::Uuid;

/// The error type for all engine operations
#[derive(Debug, Error)]
pub enum ViewError {
    /// Caller supplied malformed filter or pagination criteria.
    #[error("invalid criteria for '{field}': {message}")]
    InvalidCriteria {
        field: &'static str,
        message: String,
    },

    /// The remote record source failed for the given scope.
    #[error("fetch failed for scope '{scope}': {message}")]
    Fetch { scope: Uuid, message: String },

    /// Configuration could not be loaded or failed validation.
    #[error("configuration: {0}")]
    Config(String),
}

impl ViewError {
    /// Shorthand for a criteria rejection
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ViewError::InvalidCriteria {
            field,
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ViewError {
    fn from(err: std::io::Error) -> Self {
        ViewError::Config(err.to_string())
    }
}

impl From<serde_yaml::Error> for ViewError {
    fn from(err: serde_yaml::Error) -> Self {
        ViewError::Config(err.to_string())
    }
}

/// A specialized Result type for careview operations
pub type ViewResult<T> = Result<T, ViewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_criteria_display() {
        let err = ViewError::invalid("date_range", "'to' is earlier than 'from'");
        assert!(err.to_string().contains("date_range"));
        assert!(err.to_string().contains("earlier"));
    }

    #[test]
    fn test_fetch_error_display() {
        let scope = Uuid::nil();
        let err = ViewError::Fetch {
            scope,
            message: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("connection refused"));
        assert!(err.to_string().contains(&scope.to_string()));
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<usize>("not a number").unwrap_err();
        let err: ViewError = yaml_err.into();
        assert!(matches!(err, ViewError::Config(_)));
    }
}
