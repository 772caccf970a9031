//! Trait definitions implemented by the scheme crates

pub mod signature;

pub use signature::Signature;
