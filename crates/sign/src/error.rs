//! Error types for the signature crate

use thiserror::Error as ThisError;

/// Errors that can occur during signature operations
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Public key whose shape does not match the parameter set
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Secret key whose shape does not match the parameter set
    #[error("Invalid secret key: {0}")]
    InvalidSecretKey(String),

    /// Invalid public key size
    #[error("Invalid key size: expected {expected}, got {actual}")]
    InvalidKeySize {
        /// Size required by the parameter set
        expected: usize,
        /// Size supplied
        actual: usize,
    },

    /// Invalid signature size
    #[error("Invalid signature size: expected {expected}, got {actual}")]
    InvalidSignatureSize {
        /// Size required by the parameter set
        expected: usize,
        /// Size supplied
        actual: usize,
    },

    /// Encoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Ring or transform configuration rejected by the algorithms layer
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input outside the domain of an algorithms-layer operation
    #[error("Domain error: {0}")]
    Domain(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

// Convert from algorithms::error::Error
impl From<solmae_algorithms::Error> for Error {
    fn from(err: solmae_algorithms::Error) -> Self {
        use solmae_algorithms::Error as AlgoError;

        match err {
            AlgoError::Configuration { .. } => Error::Configuration(err.to_string()),
            AlgoError::Domain { .. } => Error::Domain(err.to_string()),
            AlgoError::Length { .. } => Error::Encoding(err.to_string()),
        }
    }
}

// Convert to api::Error
impl From<Error> for solmae_api::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidPublicKey(msg) => solmae_api::Error::Configuration {
                context: "public key",
                message: msg,
            },
            Error::InvalidSecretKey(msg) => solmae_api::Error::InvalidKey {
                context: "secret key",
                message: msg,
            },
            Error::InvalidKeySize { expected, actual } => solmae_api::Error::InvalidLength {
                context: "public key",
                expected,
                actual,
            },
            Error::InvalidSignatureSize { expected, actual } => solmae_api::Error::InvalidLength {
                context: "signature",
                expected,
                actual,
            },
            Error::Encoding(s) => solmae_api::Error::SerializationError {
                context: "encoding",
                message: s,
            },
            Error::Deserialization(s) => solmae_api::Error::SerializationError {
                context: "deserialization",
                message: s,
            },
            Error::Configuration(s) => solmae_api::Error::Configuration {
                context: "sign",
                message: s,
            },
            Error::Domain(s) => solmae_api::Error::Domain {
                context: "sign",
                message: s,
            },
            Error::Internal(s) => solmae_api::Error::Other {
                context: "internal",
                message: s,
            },
        }
    }
}

/// Result type for signature operations
pub type Result<T> = core::result::Result<T, Error>;
