//! Precomputed sampler state
//!
//! [`SamplerState`] bundles everything a noise sampler needs for one ring:
//! the optional NTT and complex FFT plans, the CDT table and the entropy
//! source the draws come from.

use tracing::debug;

use super::gaussian::GaussianSampler;
use crate::drbg::EntropySource;
use crate::error::{validate, Result};
use crate::modular::reduce;
use crate::poly::fft::CfftPlan;
use crate::poly::ntt::NttPlan;
use crate::poly::params::RingContext;
use crate::poly::polynomial::Polynomial;
use crate::poly::sampling::{sample_cbd_random, CdtTable};
use solmae_params::pqc::solmae::SolmaeSchemeParams;

/// Default tail cut of the CDT, in standard deviations
pub const DEFAULT_TAILCUT: f64 = 10.0;

/// Default centred binomial parameter
pub const DEFAULT_ETA: u32 = 2;

/// Runtime configuration of a [`SamplerState`]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleParams {
    /// Ring degree
    pub n: usize,
    /// Modulus
    pub q: u32,
    /// Standard deviation of the CDT sampler
    pub sigma: f64,
    /// Tail cut of the CDT sampler
    pub tailcut: f64,
    /// Centred binomial parameter
    pub eta: u32,
    /// Build an NTT plan
    pub use_ntt: bool,
    /// Build a complex FFT plan
    pub use_fft: bool,
}

impl SampleParams {
    /// Parameters with default tail cut, eta and both plans enabled
    pub fn new(n: usize, q: u32, sigma: f64) -> Self {
        Self {
            n,
            q,
            sigma,
            tailcut: DEFAULT_TAILCUT,
            eta: DEFAULT_ETA,
            use_ntt: true,
            use_fft: true,
        }
    }

    /// Parameters matching a compile-time parameter set
    pub fn for_scheme<P: SolmaeSchemeParams>() -> Self {
        Self::new(P::N, P::Q, P::SIGMA)
            .with_tailcut(P::TAILCUT)
            .with_eta(P::ETA)
    }

    /// Set the tail cut
    pub fn with_tailcut(mut self, tailcut: f64) -> Self {
        self.tailcut = tailcut;
        self
    }

    /// Set eta
    pub fn with_eta(mut self, eta: u32) -> Self {
        self.eta = eta;
        self
    }

    /// Enable or disable the NTT plan
    pub fn with_ntt(mut self, use_ntt: bool) -> Self {
        self.use_ntt = use_ntt;
        self
    }

    /// Enable or disable the complex FFT plan
    pub fn with_fft(mut self, use_fft: bool) -> Self {
        self.use_fft = use_fft;
        self
    }
}

/// Plans, tables and entropy for sampling in one ring
#[derive(Debug)]
pub struct SamplerState {
    params: SampleParams,
    ctx: RingContext,
    ntt: Option<NttPlan>,
    cfft: Option<CfftPlan>,
    cdt: CdtTable,
    source: EntropySource,
}

impl SamplerState {
    /// Precompute everything `params` asks for, drawing from OS entropy
    #[cfg(feature = "std")]
    pub fn new(params: SampleParams) -> Result<Self> {
        Self::with_source(params, EntropySource::Os)
    }

    /// Precompute with an explicit entropy source
    pub fn with_source(params: SampleParams, source: EntropySource) -> Result<Self> {
        let ctx = RingContext::new(params.q, params.n)?;
        let ntt = if params.use_ntt {
            Some(NttPlan::new(ctx)?)
        } else {
            None
        };
        let cfft = if params.use_fft {
            Some(CfftPlan::new(params.n)?)
        } else {
            None
        };
        let cdt = CdtTable::build(params.sigma, params.tailcut)?;
        debug!(
            "Prepared sampler state for {} (ntt={}, fft={})",
            ctx,
            ntt.is_some(),
            cfft.is_some()
        );
        Ok(Self {
            params,
            ctx,
            ntt,
            cfft,
            cdt,
            source,
        })
    }

    /// Configuration this state was built from
    pub fn params(&self) -> &SampleParams {
        &self.params
    }

    /// Ring of the sampled polynomials
    pub fn context(&self) -> RingContext {
        self.ctx
    }

    /// NTT plan, when enabled
    pub fn ntt(&self) -> Option<&NttPlan> {
        self.ntt.as_ref()
    }

    /// Complex FFT plan, when enabled
    pub fn cfft(&self) -> Option<&CfftPlan> {
        self.cfft.as_ref()
    }

    /// CDT table
    pub fn cdt(&self) -> &CdtTable {
        &self.cdt
    }

    /// Switch to a deterministic source seeded with `seed`
    pub fn attach_drbg(&mut self, seed: &[u8]) {
        self.source = EntropySource::from_seed(seed);
    }

    /// Next 64-bit word from the current source
    pub fn next_u64(&mut self) -> u64 {
        rand::RngCore::next_u64(&mut self.source)
    }

    /// `n` signed CDT samples
    pub fn sample_noise_poly(&mut self) -> Vec<i64> {
        self.cdt.sample_vec(self.params.n, &mut self.source)
    }

    /// `n` CDT samples reduced into `[0, q)`
    pub fn sample_noise_poly_modq(&mut self) -> Vec<u32> {
        let q = self.params.q as u64;
        self.sample_noise_poly()
            .into_iter()
            .map(|x| reduce(x, q) as u32)
            .collect()
    }

    /// CDT noise as a ring element
    pub fn sample_noise_polynomial(&mut self) -> Polynomial {
        let coeffs = self.sample_noise_poly();
        Polynomial::from_coeffs(self.ctx, &coeffs)
    }

    /// `n` centred binomial samples with the configured eta
    pub fn sample_cbd_poly(&mut self) -> Result<Vec<i32>> {
        validate::domain(self.params.eta > 0, "sample_cbd_poly", "eta must be positive")?;
        sample_cbd_random(self.params.n, self.params.eta, &mut self.source)
    }

    /// Box-Muller sampler borrowing this state's entropy
    pub fn gaussian_sampler(&mut self) -> GaussianSampler<&mut EntropySource> {
        GaussianSampler::new(&mut self.source)
    }
}
