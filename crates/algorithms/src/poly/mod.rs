//! Polynomial engine over `Z_q[x]/(x^n + 1)`
//!
//! Ring contexts, coefficient-form polynomials, the number-theoretic and
//! complex transforms, integer samplers and the coefficient codec.

pub mod fft;
pub mod ntt;
pub mod params;
pub mod polynomial;
pub mod sampling;
pub mod serialize;

/// Prelude for easy importing of common polynomial types.
pub mod prelude {
    pub use super::fft::{fft, ifft, CfftPlan, Complex};
    pub use super::ntt::{negacyclic_convolution, NttPlan};
    pub use super::params::RingContext;
    pub use super::polynomial::Polynomial;
    pub use super::sampling::{sample_cbd, CdtTable};
    pub use super::serialize::{compress, decompress};
}
