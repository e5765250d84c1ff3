//! Cache error types.

use thiserror::Error;

/// Errors raised while building a cache
///
/// Lookups never fail: a missing key is reported as `None`, not as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for cache construction
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CacheError::InvalidCapacity(0).to_string(),
            "Invalid capacity: 0 (must be at least 1)"
        );
        assert_eq!(
            CacheError::InvalidConfig("CACHE_SIZE=abc".to_string()).to_string(),
            "Invalid configuration: CACHE_SIZE=abc"
        );
    }
}
