//! Two-round trapdoor preimage sampler in the FFT domain
//!
//! Given a target `c = (c1, c2)` and a trapdoor basis, the second basis
//! direction is sampled first, its contribution is removed from the target,
//! and then the first direction is sampled against the updated target. The
//! result is the lattice vector `z1 * b1 + z2 * b2`.

use rand::RngCore;
use tracing::trace;

use super::gaussian::GaussianSampler;
use crate::error::{validate, Result};
use crate::poly::fft::{add_complex, hadamard_product, sub_complex, Complex};

/// Projection onto one Gram-Schmidt direction
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Projection {
    /// Acts on the first component only
    Single(Vec<Complex>),
    /// Acts on both components
    Pair(Vec<Complex>, Vec<Complex>),
}

impl Projection {
    /// `b1 ∘ c1 + b2 ∘ c2`, or `b ∘ c1` for a single projection
    pub fn apply(&self, c1: &[Complex], c2: &[Complex]) -> Result<Vec<Complex>> {
        match self {
            Self::Single(b) => hadamard_product(b, c1),
            Self::Pair(b1, b2) => add_complex(&hadamard_product(b1, c1)?, &hadamard_product(b2, c2)?),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Single(b) => b.len(),
            Self::Pair(b1, _) => b1.len(),
        }
    }
}

/// FFT-domain trapdoor consumed by [`sample_preimage`]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrapdoorBasis {
    /// Dimension of every vector below
    pub d: usize,
    /// First basis vector
    pub b1_fft: (Vec<Complex>, Vec<Complex>),
    /// Second basis vector
    pub b2_fft: (Vec<Complex>, Vec<Complex>),
    /// Second Gram-Schmidt vector
    pub b2_tilde_fft: (Vec<Complex>, Vec<Complex>),
    /// Projection used in the second round
    pub beta1_fft: Projection,
    /// Projection used in the first round
    pub beta2_fft: Projection,
    /// Widths of the second round
    pub sigma1: Vec<f64>,
    /// Widths of the first round
    pub sigma2: Vec<f64>,
}

impl TrapdoorBasis {
    /// Check that every component has dimension `d`
    pub fn check_shape(&self) -> Result<()> {
        let d = self.d;
        for (a, b) in [&self.b1_fft, &self.b2_fft, &self.b2_tilde_fft] {
            validate::same_size("TrapdoorBasis", a.len(), d)?;
            validate::same_size("TrapdoorBasis", b.len(), d)?;
        }
        validate::same_size("TrapdoorBasis", self.beta1_fft.len(), d)?;
        validate::same_size("TrapdoorBasis", self.beta2_fft.len(), d)?;
        validate::same_size("TrapdoorBasis", self.sigma1.len(), d)?;
        validate::same_size("TrapdoorBasis", self.sigma2.len(), d)
    }
}

fn scale_pair(z: &[i64], pair: &(Vec<Complex>, Vec<Complex>)) -> (Vec<Complex>, Vec<Complex>) {
    let za = z.iter().zip(&pair.0).map(|(&zi, &a)| a.scale(zi as f64)).collect();
    let zb = z.iter().zip(&pair.1).map(|(&zi, &b)| b.scale(zi as f64)).collect();
    (za, zb)
}

fn real_parts(v: &[Complex]) -> Vec<f64> {
    v.iter().map(|z| z.re).collect()
}

/// Sample a lattice vector close to `c_fft` using the trapdoor `basis`
pub fn sample_preimage<R: RngCore>(
    c_fft: (&[Complex], &[Complex]),
    basis: &TrapdoorBasis,
    eta: f64,
    sampler: &mut GaussianSampler<R>,
) -> Result<(Vec<Complex>, Vec<Complex>)> {
    basis.check_shape()?;
    let (c1, c2) = c_fft;
    validate::same_size("sample_preimage", c1.len(), basis.d)?;
    validate::same_size("sample_preimage", c2.len(), basis.d)?;

    let t2 = real_parts(&basis.beta2_fft.apply(c1, c2)?);
    let z2 = sampler.peikert(&t2, &basis.sigma2, eta)?;

    let (shift1, shift2) = scale_pair(&z2, &basis.b2_tilde_fft);
    let c1 = sub_complex(c1, &shift1)?;
    let c2 = sub_complex(c2, &shift2)?;

    let t1 = real_parts(&basis.beta1_fft.apply(&c1, &c2)?);
    let z1 = sampler.peikert(&t1, &basis.sigma1, eta)?;

    let (u1, u2) = scale_pair(&z1, &basis.b1_fft);
    let (w1, w2) = scale_pair(&z2, &basis.b2_fft);
    trace!("Trapdoor preimage sampled in dimension {}", basis.d);
    Ok((add_complex(&u1, &w1)?, add_complex(&u2, &w2)?))
}
