//! Error type definitions for lattice operations

use thiserror::Error as ThisError;

/// Primary error type returned across the public API
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed or inconsistent key material
    #[error("Invalid key: {context}: {message}")]
    InvalidKey {
        context: &'static str,
        message: String,
    },

    /// Invalid length error with context
    #[error("{context}: invalid length (expected {expected}, got {actual})")]
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Operands or plans that belong to incompatible ring configurations
    #[error("Configuration error in {context}: {message}")]
    Configuration {
        context: &'static str,
        message: String,
    },

    /// Input outside the mathematical domain of an operation
    #[error("Domain error in {context}: {message}")]
    Domain {
        context: &'static str,
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {context}: {message}")]
    SerializationError {
        context: &'static str,
        message: String,
    },

    /// Other error
    #[error("{context}: {message}")]
    Other {
        context: &'static str,
        message: String,
    },
}

/// Result type for public API operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// True for errors caused by mismatched ring configurations
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// True for errors caused by inputs outside an operation's domain
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        let err = Error::Domain {
            context: "inv_mod",
            message: "not invertible".to_string(),
        };
        assert!(err.is_domain());
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_display() {
        let err = Error::InvalidLength {
            context: "public key",
            expected: 544,
            actual: 12,
        };
        assert_eq!(
            err.to_string(),
            "public key: invalid length (expected 544, got 12)"
        );
    }
}
