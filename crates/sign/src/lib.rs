//! Lattice signature scheme
//!
//! This crate implements key generation, signing and verification for a
//! SOLMAE-style signature over `Z_q[x]/(x^n + 1)`, built on the ring,
//! transform and hashing layer of `solmae-algorithms`.

#![forbid(unsafe_code)]

pub mod error;
pub mod solmae;

pub use error::{Error, Result};
pub use solmae::{
    keygen, sign, verify, Solmae, Solmae256, Solmae512, SolmaePublicKey, SolmaeSecretKey,
    SolmaeSignature,
};
