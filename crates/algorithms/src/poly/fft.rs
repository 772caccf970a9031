//! fft.rs - Complex FFT over C^n
//!
//! Radix-2 Cooley-Tukey with a bit-reversal shuffle, twiddles
//! `W[k] = exp(-2πik/n)` and `W^{-1}[k] = conj(W[k])`. The inverse transform
//! divides by n, so `ifft(fft(x))` reproduces `x` up to rounding.

use core::f64::consts::PI;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use tracing::debug;

use super::ntt::bitrev_permutation;
use crate::error::{validate, Result};

/// Default tolerance for [`is_close_vec`]
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Complex number in rectangular form
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Complex {
    /// Real part
    pub re: f64,
    /// Imaginary part
    pub im: f64,
}

impl Complex {
    /// Zero
    pub const ZERO: Complex = Complex::new(0.0, 0.0);
    /// One
    pub const ONE: Complex = Complex::new(1.0, 0.0);

    /// Build from parts
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Purely real value
    pub const fn from_real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    /// `exp(iθ)`
    pub fn exp_i(theta: f64) -> Self {
        Self::new(theta.cos(), theta.sin())
    }

    /// Complex conjugate
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// `|z|^2`
    pub fn norm_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// `|z|`
    pub fn abs(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Multiply by a real scalar
    pub fn scale(self, alpha: f64) -> Self {
        Self::new(self.re * alpha, self.im * alpha)
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::from_real(re)
    }
}

impl Add for Complex {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Neg for Complex {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.re, -self.im)
    }
}

impl Mul for Complex {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Mul<f64> for Complex {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl AddAssign for Complex {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Complex {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Complex {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// Forward and inverse twiddle tables of length n
pub fn precompute_twiddles(n: usize) -> Result<(Vec<Complex>, Vec<Complex>)> {
    validate::power_of_two("precompute_twiddles", n)?;
    let mut w = vec![Complex::ONE; n];
    let mut w_inv = vec![Complex::ONE; n];
    for k in 1..n {
        let angle = -2.0 * PI * k as f64 / n as f64;
        w[k] = Complex::exp_i(angle);
        w_inv[k] = w[k].conj();
    }
    Ok((w, w_inv))
}

#[inline]
fn bitrev_shuffle(a: &mut [Complex], perm: &[usize]) {
    for i in 0..a.len() {
        let j = perm[i];
        if j > i {
            a.swap(i, j);
        }
    }
}

fn butterflies(a: &mut [Complex], twiddles: &[Complex]) {
    let n = a.len();
    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let step = n / len;
        for start in (0..n).step_by(len) {
            let mut w = Complex::ONE;
            for j in 0..half {
                let u = a[start + j];
                let v = a[start + j + half] * w;
                a[start + j] = u + v;
                a[start + j + half] = u - v;
                w *= twiddles[step];
            }
        }
        len <<= 1;
    }
}

fn check_tables(operation: &'static str, n: usize, twiddles: &[Complex], bitrev: &[usize]) -> Result<()> {
    validate::power_of_two(operation, n)?;
    validate::length(operation, twiddles.len(), n)?;
    validate::length(operation, bitrev.len(), n)
}

/// Forward transform in place
pub fn fft_inplace(a: &mut [Complex], w: &[Complex], bitrev: &[usize]) -> Result<()> {
    check_tables("fft_inplace", a.len(), w, bitrev)?;
    bitrev_shuffle(a, bitrev);
    butterflies(a, w);
    Ok(())
}

/// Inverse transform in place, scaled by `1/n`
pub fn ifft_inplace(a: &mut [Complex], w_inv: &[Complex], bitrev: &[usize]) -> Result<()> {
    check_tables("ifft_inplace", a.len(), w_inv, bitrev)?;
    bitrev_shuffle(a, bitrev);
    butterflies(a, w_inv);
    let inv_n = 1.0 / a.len() as f64;
    for z in a.iter_mut() {
        *z = z.scale(inv_n);
    }
    Ok(())
}

/// Precomputed twiddles and permutation for transforms of one length
#[derive(Clone, Debug, PartialEq)]
pub struct CfftPlan {
    n: usize,
    w: Vec<Complex>,
    w_inv: Vec<Complex>,
    bitrev: Vec<usize>,
}

impl CfftPlan {
    /// Build the tables for length `n`, a power of two
    pub fn new(n: usize) -> Result<Self> {
        let (w, w_inv) = precompute_twiddles(n)?;
        let bitrev = bitrev_permutation(n)?;
        debug!("Built complex FFT plan for n={}", n);
        Ok(Self { n, w, w_inv, bitrev })
    }

    /// Transform length
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always false; plans have length at least 1
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Forward twiddles
    pub fn twiddles(&self) -> &[Complex] {
        &self.w
    }

    /// Inverse twiddles
    pub fn inverse_twiddles(&self) -> &[Complex] {
        &self.w_inv
    }

    /// Forward transform in place
    pub fn fft_inplace(&self, a: &mut [Complex]) -> Result<()> {
        fft_inplace(a, &self.w, &self.bitrev)
    }

    /// Inverse transform in place
    pub fn ifft_inplace(&self, a: &mut [Complex]) -> Result<()> {
        ifft_inplace(a, &self.w_inv, &self.bitrev)
    }

    /// Forward transform of a real vector
    pub fn fft_real(&self, x: &[f64]) -> Result<Vec<Complex>> {
        let mut a: Vec<Complex> = x.iter().map(|&t| Complex::from_real(t)).collect();
        self.fft_inplace(&mut a)?;
        Ok(a)
    }

    /// Inverse transform keeping only real parts
    pub fn ifft_to_real(&self, x: &[Complex]) -> Result<Vec<f64>> {
        let mut a = x.to_vec();
        self.ifft_inplace(&mut a)?;
        Ok(a.into_iter().map(|z| z.re).collect())
    }
}

/// Forward transform with freshly built tables
pub fn fft(x: &[Complex]) -> Result<Vec<Complex>> {
    let plan = CfftPlan::new(x.len())?;
    let mut a = x.to_vec();
    plan.fft_inplace(&mut a)?;
    Ok(a)
}

/// Inverse transform with freshly built tables
pub fn ifft(x: &[Complex]) -> Result<Vec<Complex>> {
    let plan = CfftPlan::new(x.len())?;
    let mut a = x.to_vec();
    plan.ifft_inplace(&mut a)?;
    Ok(a)
}

/// Forward transform of a real vector
pub fn fft_real(x: &[f64]) -> Result<Vec<Complex>> {
    CfftPlan::new(x.len())?.fft_real(x)
}

/// Inverse transform keeping only real parts
pub fn ifft_to_real(x: &[Complex]) -> Result<Vec<f64>> {
    CfftPlan::new(x.len())?.ifft_to_real(x)
}

/// Element-wise product
pub fn hadamard_product(a: &[Complex], b: &[Complex]) -> Result<Vec<Complex>> {
    validate::same_size("hadamard_product", a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(&x, &y)| x * y).collect())
}

/// Element-wise sum
pub fn add_complex(a: &[Complex], b: &[Complex]) -> Result<Vec<Complex>> {
    validate::same_size("add_complex", a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(&x, &y)| x + y).collect())
}

/// Element-wise difference
pub fn sub_complex(a: &[Complex], b: &[Complex]) -> Result<Vec<Complex>> {
    validate::same_size("sub_complex", a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(&x, &y)| x - y).collect())
}

/// Multiply every element by `alpha`
pub fn scale_complex(x: &[Complex], alpha: Complex) -> Vec<Complex> {
    x.iter().map(|&z| alpha * z).collect()
}

/// Largest `|a[i] - b[i]|`, zero for empty inputs
pub fn max_abs_diff(a: &[Complex], b: &[Complex]) -> Result<f64> {
    validate::same_size("max_abs_diff", a.len(), b.len())?;
    Ok(a.iter()
        .zip(b)
        .map(|(&x, &y)| (x - y).abs())
        .fold(0.0, f64::max))
}

/// True when every element differs by at most `tol`
pub fn is_close_vec(a: &[Complex], b: &[Complex], tol: f64) -> Result<bool> {
    Ok(max_abs_diff(a, b)? <= tol)
}
