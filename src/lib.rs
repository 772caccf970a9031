//! # solmae
//!
//! The arithmetic, transform and sampling core of a lattice signature over
//! `Z_q[x]/(x^n + 1)`, plus the signature protocol built on it.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! solmae = "0.3"
//! ```
//!
//! ## Features
//!
//! - `std` (default): OS entropy and the `Signature` trait implementation
//! - `sign` (default): key generation, signing and verification
//! - `serde`: serialization of ring contexts, polynomials, sampler
//!   parameters, public keys and signatures
//! - `full`: all features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`solmae-api`]: public error type and the `Signature` trait
//! - [`solmae-params`]: parameter sets
//! - [`solmae-algorithms`]: modular arithmetic, ring, NTT, CFFT, samplers,
//!   hashing, DRBG and codec
//! - [`solmae-sign`]: the signature protocol

// Core re-exports (always available)
pub use solmae_algorithms as algorithms;
pub use solmae_api as api;
pub use solmae_params as params;

// Feature-gated re-exports
#[cfg(feature = "sign")]
pub use solmae_sign as sign;

/// Common imports for solmae users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits
    pub use crate::api::Signature;

    // Ring and transforms
    pub use crate::algorithms::{CfftPlan, Complex, NttPlan, Polynomial, RingContext};

    // Samplers and randomness
    pub use crate::algorithms::{
        CdtTable, EntropySource, GaussianSampler, HmacDrbg, SampleParams, SamplerState,
        TrapdoorBasis,
    };

    // Parameter sets
    pub use crate::params::pqc::solmae::{Solmae256Params, Solmae512Params, SolmaeSchemeParams};

    #[cfg(feature = "sign")]
    pub use crate::sign::{Solmae256, Solmae512, SolmaePublicKey, SolmaeSecretKey, SolmaeSignature};
}
