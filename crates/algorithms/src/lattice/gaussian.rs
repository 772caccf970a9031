//! Continuous and rounded Gaussian samplers
//!
//! A [`GaussianSampler`] owns its random source together with the spare
//! Box-Muller value, so independent samplers never share state.

use core::f64::consts::PI;

use rand::RngCore;
use tracing::trace;

use crate::error::{validate, Result};

/// 2^64 as a float
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// Smallest value returned by [`GaussianSampler::uniform01`]
pub const UNIFORM_FLOOR: f64 = 1.0 / TWO_POW_64;

/// Box-Muller sampler over an owned random source
#[derive(Debug)]
pub struct GaussianSampler<R> {
    rng: R,
    spare: Option<f64>,
}

impl<R: RngCore> GaussianSampler<R> {
    /// Wrap a random source
    pub fn new(rng: R) -> Self {
        Self { rng, spare: None }
    }

    /// Mutable access to the random source
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Release the random source, dropping any cached value
    pub fn into_inner(self) -> R {
        self.rng
    }

    /// Uniform value in `(0, 1)` from one 64-bit word
    pub fn uniform01(&mut self) -> f64 {
        let u = self.rng.next_u64();
        ((u as f64 + 0.5) / TWO_POW_64).max(UNIFORM_FLOOR)
    }

    /// `true` with probability `exp(log_p)`
    pub fn bernoulli_exp(&mut self, log_p: f64) -> bool {
        if log_p >= 0.0 {
            return true;
        }
        self.uniform01() <= log_p.exp()
    }

    /// Two independent standard normal values
    ///
    /// Always consumes two fresh words and leaves the cache untouched.
    pub fn normal_pair(&mut self) -> (f64, f64) {
        let u1 = self.uniform01();
        let u2 = self.uniform01();
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * PI * u2;
        (r * theta.cos(), r * theta.sin())
    }

    /// One standard normal value, reusing the second half of each pair
    pub fn standard_normal(&mut self) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }
        let (z0, z1) = self.normal_pair();
        self.spare = Some(z1);
        z0
    }

    /// Integer near `center` with spread `sigma`
    ///
    /// Rounds `center + sigma * N(0, 1)` to the nearest integer, halves
    /// away from zero.
    pub fn z_sample(&mut self, center: f64, sigma: f64) -> i64 {
        (center + sigma * self.standard_normal()).round() as i64
    }

    /// Per-coordinate sampler with centres `t` and widths `sigma`
    ///
    /// Coordinate `i` is perturbed by `sigma[i]` times a continuous normal,
    /// one Box-Muller pair serving two coordinates, and then rounded with
    /// [`z_sample`](Self::z_sample) at width `eta`.
    pub fn peikert(&mut self, t: &[f64], sigma: &[f64], eta: f64) -> Result<Vec<i64>> {
        validate::same_size("peikert", t.len(), sigma.len())?;
        let d = t.len();
        let mut out = Vec::with_capacity(d);
        let mut i = 0;
        while i < d {
            let (z0, z1) = self.normal_pair();
            out.push(self.z_sample(t[i] + sigma[i] * z0, eta));
            i += 1;
            if i < d {
                out.push(self.z_sample(t[i] + sigma[i] * z1, eta));
                i += 1;
            }
        }
        trace!("Peikert sample of dimension {} at eta={}", d, eta);
        Ok(out)
    }
}
