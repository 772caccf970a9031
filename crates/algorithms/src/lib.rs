//! Algorithms behind the solmae lattice signature
//!
//! This crate provides the arithmetic and sampling layer of the scheme:
//!
//! - Modular arithmetic over `Z_m` with signed inputs
//! - The ring `Z_q[x]/(x^n + 1)` with an explicit, immutable ring context
//! - Number-theoretic and complex fast Fourier transforms
//! - Discrete (CDT, centred binomial, uniform) and continuous (Box-Muller,
//!   Peikert) samplers, plus the two-round trapdoor preimage sampler
//! - Domain-separated hashing, an HMAC-DRBG and a fixed-width codec
//!
//! Plans and tables are immutable once built and can be shared across
//! threads. Mutable sampler state always lives in values owned by the caller.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

pub mod modular;

// Ring arithmetic and transforms
pub mod poly;
pub use poly::fft::{CfftPlan, Complex};
pub use poly::ntt::NttPlan;
pub use poly::params::RingContext;
pub use poly::polynomial::Polynomial;
pub use poly::sampling::CdtTable;

// Samplers
pub mod lattice;
pub use lattice::{GaussianSampler, SampleParams, SamplerState, TrapdoorBasis};

// Collaborators
pub mod drbg;
pub use drbg::{EntropySource, HmacDrbg};

pub mod hash;
