//! Public API traits and types for the solmae library
//!
//! This crate provides the public API surface shared by every solmae crate:
//! the error type all lower-level errors convert into, and the trait a
//! signature scheme implements.

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};
pub use traits::Signature;

// Re-export trait modules for direct access
pub use traits::signature;
