//! Constants for the SOLMAE signature core

/// Prime modulus shared by every parameter set (q - 1 = 2^12 * 3)
pub const SOLMAE_Q: u32 = 12289;

/// Byte length of every seed, of `tr` and of the challenge
pub const SOLMAE_SEED_BYTES: usize = 32;

/// Common trait for SOLMAE parameter sets
pub trait SolmaeSchemeParams: Send + Sync + 'static {
    /// Algorithm name
    const NAME: &'static str;

    // Ring parameters
    /// Polynomial degree, a power of two with 2N dividing Q - 1
    const N: usize;
    /// Prime modulus
    const Q: u32 = SOLMAE_Q;
    /// Number of low bits split off `t` and `w`; `(Q - 1) >> D_PARAM` must fit in a byte
    const D_PARAM: u32 = 6;

    // Module dimension
    /// Rows and columns of the public matrix A
    const K_DIM: usize;

    // Distributions
    /// Centered binomial parameter for s, e and y
    const ETA: u32 = 2;
    /// Standard deviation of the discrete Gaussian noise sampler
    const SIGMA: f64;
    /// Tail cut, in standard deviations, of the cumulative table
    const TAILCUT: f64 = 10.0;

    // Byte sizes
    /// Seed size for rho and for each small-polynomial seed
    const SEED_BYTES: usize = SOLMAE_SEED_BYTES;
    /// Hash output size for tr = H(pk)
    const TR_BYTES: usize = 32;
    /// Challenge size
    const CHALLENGE_BYTES: usize = 32;
    /// Bytes per coefficient of z in the transcript and the plain encoding
    const Z_COEFF_BYTES: usize = 2;
    /// Bits per coefficient of z in the compact encoding
    const Z_COMPACT_BITS: usize = 4;

    /// Public key size in bytes: rho followed by K_DIM rows of N high-bit bytes
    const PUBLIC_KEY_BYTES: usize = Self::SEED_BYTES + Self::K_DIM * Self::N;
    /// Signature size in bytes: c, then w1, then z
    const SIGNATURE_BYTES: usize = Self::CHALLENGE_BYTES
        + Self::K_DIM * Self::N
        + Self::K_DIM * Self::N * Self::Z_COEFF_BYTES;
    /// Compact signature size in bytes
    const COMPACT_SIGNATURE_BYTES: usize = Self::CHALLENGE_BYTES
        + Self::K_DIM * Self::N
        + Self::K_DIM * ((Self::N * Self::Z_COMPACT_BITS + 7) / 8);
}

/// SOLMAE parameters over Z_q[x]/(x^256 + 1)
pub struct Solmae256Params;

impl SolmaeSchemeParams for Solmae256Params {
    const NAME: &'static str = "SOLMAE-256";
    const N: usize = 256;
    const K_DIM: usize = 2;
    const SIGMA: f64 = 1.55;
}

/// SOLMAE parameters over Z_q[x]/(x^512 + 1)
pub struct Solmae512Params;

impl SolmaeSchemeParams for Solmae512Params {
    const NAME: &'static str = "SOLMAE-512";
    const N: usize = 512;
    const K_DIM: usize = 2;
    const SIGMA: f64 = 1.55;
}
