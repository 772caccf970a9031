//! Error handling for ring arithmetic, transforms and samplers

use std::borrow::Cow;

use solmae_api::Error as CoreError;
use thiserror::Error as ThisError;

/// The error type for lattice primitives
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Length validation error
    #[error("Invalid length for {context}: expected {expected}, got {actual}")]
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Operands, plans or tables built for different rings
    #[error("Configuration error in {context}: {reason}")]
    Configuration {
        /// Operation that detected the mismatch
        context: &'static str,
        /// Description of the mismatch
        reason: Cow<'static, str>,
    },

    /// Input outside the mathematical domain of an operation
    #[error("Domain error in {operation}: {reason}")]
    Domain {
        /// Operation that rejected its input
        operation: &'static str,
        /// Why the input is outside the domain
        reason: Cow<'static, str>,
    },
}

impl Error {
    /// Shorthand to create a Domain error
    pub fn domain<R: Into<Cow<'static, str>>>(operation: &'static str, reason: R) -> Self {
        Error::Domain {
            operation,
            reason: reason.into(),
        }
    }

    /// Shorthand to create a Configuration error
    pub fn config<R: Into<Cow<'static, str>>>(context: &'static str, reason: R) -> Self {
        Error::Configuration {
            context,
            reason: reason.into(),
        }
    }
}

/// Result type for lattice primitive operations
pub type Result<T> = core::result::Result<T, Error>;

impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Length {
                context,
                expected,
                actual,
            } => CoreError::InvalidLength {
                context,
                expected,
                actual,
            },
            Error::Configuration { context, reason } => CoreError::Configuration {
                context,
                message: reason.into_owned(),
            },
            Error::Domain { operation, reason } => CoreError::Domain {
                context: operation,
                message: reason.into_owned(),
            },
        }
    }
}

pub mod validate;
