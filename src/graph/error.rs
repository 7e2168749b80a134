use thiserror::Error;
use tracing::warn;

/// Error taxonomy for the layout engine.
///
/// Only malformed input fails a layout: an unparseable timestamp or a
/// duplicate commit hash. Missing parent references and absent branch names
/// are expected degenerate conditions and never surface here; the affected
/// edges are simply omitted.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Malformed timestamp on commit {hash}: {value}")]
    MalformedTimestamp { hash: String, value: String },

    #[error("Duplicate commit hash: {0}")]
    DuplicateHash(String),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl LayoutError {
    /// Create a malformed-timestamp error, logging the offending value.
    pub fn malformed_timestamp(hash: impl Into<String>, value: impl Into<String>) -> Self {
        let hash = hash.into();
        let value = value.into();
        warn!("Malformed timestamp on commit '{}': {}", hash, value);
        LayoutError::MalformedTimestamp { hash, value }
    }

    /// Data-quality errors can be resolved by dropping the affected commit
    /// (see `RepositoryData::partition_valid`); a recognizer-table failure
    /// cannot.
    pub fn is_data_quality(&self) -> bool {
        match self {
            LayoutError::MalformedTimestamp { .. } => true,
            LayoutError::DuplicateHash(_) => true,
            LayoutError::Regex(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LayoutError::MalformedTimestamp { .. } => ErrorSeverity::Medium,
            LayoutError::DuplicateHash(_) => ErrorSeverity::Medium,
            LayoutError::Regex(_) => ErrorSeverity::High,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_timestamp_is_data_quality() {
        let err = LayoutError::malformed_timestamp("abc", "not-a-date");
        assert!(err.is_data_quality());
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("abc"));
        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn test_duplicate_hash_display() {
        let err = LayoutError::DuplicateHash("deadbeef".to_string());
        assert!(err.is_data_quality());
        assert_eq!(err.to_string(), "Duplicate commit hash: deadbeef");
    }

    #[test]
    fn test_regex_error_is_not_recoverable_by_dropping() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = LayoutError::from(source);
        assert!(!err.is_data_quality());
        assert_eq!(err.severity(), ErrorSeverity::High);
    }
}
