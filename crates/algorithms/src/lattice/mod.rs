//! Lattice samplers
//!
//! Box-Muller and Peikert samplers, the trapdoor preimage sampler, the
//! precomputed sampler state and Ring-LWE pair generation. The ring itself
//! lives in [`crate::poly`].

pub mod gaussian;
pub mod pairgen;
pub mod precomp;
pub mod trapdoor;

pub use gaussian::GaussianSampler;
pub use pairgen::{crown_pair, crown_sample, pairgen, pairgen_seeded, uniform_pair, uniform_poly};
pub use precomp::{SampleParams, SamplerState};
pub use trapdoor::{sample_preimage, Projection, TrapdoorBasis};
