//! Error handling for the solmae API

pub mod types;

pub use types::{Error, Result};
