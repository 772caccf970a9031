//! polynomial.rs - Elements of Z_q[x]/(x^n + 1) with an explicit ring context

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use rand::{Rng, RngCore};
use zeroize::Zeroize;

use super::ntt::{negacyclic_convolution, NttPlan};
use super::params::RingContext;
use crate::error::{validate, Error, Result};
use crate::modular::{add_mod, centered, mul_mod, reduce, sub_mod};

/// A polynomial in the ring R_q = Z_q[x]/(x^n + 1)
///
/// Coefficients are stored reduced into `[0, q)`. Values are immutable:
/// every arithmetic operation returns a new polynomial. Two polynomials are
/// equal only when their contexts and coefficients both match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Zeroize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPolynomial"))]
pub struct Polynomial {
    #[zeroize(skip)]
    ctx: RingContext,
    coeffs: Vec<u32>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPolynomial {
    ctx: RingContext,
    coeffs: Vec<u32>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPolynomial> for Polynomial {
    type Error = Error;

    fn try_from(raw: RawPolynomial) -> Result<Self> {
        Self::from_reduced(raw.ctx, raw.coeffs)
    }
}

impl Polynomial {
    /// Build a polynomial from a signed coefficient list of any length
    ///
    /// Index `i >= n` wraps negacyclically: it contributes `(-1)^(i / n)`
    /// times its value to slot `i mod n`, so `x^n` behaves as `-1`. Short
    /// lists are padded with zeros.
    pub fn from_coeffs(ctx: RingContext, coeffs: &[i64]) -> Self {
        let (n, q) = (ctx.n(), ctx.q() as u64);
        let mut acc = vec![0u64; n];
        for (idx, &c) in coeffs.iter().enumerate() {
            if c == 0 {
                continue;
            }
            let slot = idx % n;
            acc[slot] = if (idx / n) % 2 == 0 {
                add_mod(acc[slot] as i64, c, q)
            } else {
                sub_mod(acc[slot] as i64, c, q)
            };
        }
        Self {
            ctx,
            coeffs: acc.into_iter().map(|c| c as u32).collect(),
        }
    }

    /// Wrap exactly `n` already reduced coefficients
    pub fn from_reduced(ctx: RingContext, coeffs: Vec<u32>) -> Result<Self> {
        validate::length("Polynomial::from_reduced", coeffs.len(), ctx.n())?;
        if let Some(bad) = coeffs.iter().find(|&&c| c >= ctx.q()) {
            return Err(Error::domain(
                "Polynomial::from_reduced",
                format!("coefficient {} is not below q = {}", bad, ctx.q()),
            ));
        }
        Ok(Self { ctx, coeffs })
    }

    /// The zero polynomial
    pub fn zero(ctx: RingContext) -> Self {
        Self {
            ctx,
            coeffs: vec![0; ctx.n()],
        }
    }

    /// The constant polynomial 1
    pub fn one(ctx: RingContext) -> Self {
        let mut coeffs = vec![0; ctx.n()];
        coeffs[0] = 1 % ctx.q();
        Self { ctx, coeffs }
    }

    /// Polynomial with coefficients uniform in `[0, q)`
    pub fn random<R: RngCore>(ctx: RingContext, rng: &mut R) -> Self {
        let q = ctx.q();
        let coeffs = (0..ctx.n()).map(|_| rng.gen_range(0..q)).collect();
        Self { ctx, coeffs }
    }

    /// Ring this polynomial lives in
    #[inline(always)]
    pub fn context(&self) -> RingContext {
        self.ctx
    }

    /// Coefficients in `[0, q)`, constant term first
    #[inline(always)]
    pub fn coeffs(&self) -> &[u32] {
        &self.coeffs
    }

    /// Owned copy of the coefficients
    pub fn to_vec(&self) -> Vec<u32> {
        self.coeffs.clone()
    }

    /// Coefficients lifted to `(-q/2, q/2]`
    pub fn centered(&self) -> Vec<i64> {
        let q = self.ctx.q() as u64;
        self.coeffs.iter().map(|&c| centered(c as i64, q)).collect()
    }

    /// Largest absolute centered coefficient
    pub fn infinity_norm(&self) -> u64 {
        self.centered()
            .into_iter()
            .map(i64::unsigned_abs)
            .max()
            .unwrap_or(0)
    }

    fn zip_with(
        &self,
        other: &Self,
        context: &'static str,
        op: impl Fn(i64, i64, u64) -> u64,
    ) -> Result<Self> {
        self.ctx.ensure_same(&other.ctx, context)?;
        let q = self.ctx.q() as u64;
        let coeffs = self
            .coeffs
            .iter()
            .zip(&other.coeffs)
            .map(|(&a, &b)| op(a as i64, b as i64, q) as u32)
            .collect();
        Ok(Self {
            ctx: self.ctx,
            coeffs,
        })
    }

    /// Coefficient-wise sum
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, "Polynomial::add", add_mod)
    }

    /// Coefficient-wise difference
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, "Polynomial::sub", sub_mod)
    }

    /// Additive inverse
    pub fn neg(&self) -> Self {
        let q = self.ctx.q() as u64;
        Self {
            ctx: self.ctx,
            coeffs: self.coeffs.iter().map(|&a| reduce(-(a as i64), q) as u32).collect(),
        }
    }

    /// Multiply every coefficient by `scalar` (reduced mod q first)
    pub fn scalar_mul(&self, scalar: i64) -> Self {
        let q = self.ctx.q() as u64;
        let s = reduce(scalar, q) as i64;
        Self {
            ctx: self.ctx,
            coeffs: self.coeffs.iter().map(|&a| mul_mod(a as i64, s, q) as u32).collect(),
        }
    }

    /// Schoolbook negacyclic product
    ///
    /// Terms of degree `i + j >= n` are subtracted into `i + j - n`.
    pub fn mul(&self, other: &Self) -> Result<Self> {
        self.ctx.ensure_same(&other.ctx, "Polynomial::mul")?;
        let (n, q) = (self.ctx.n(), self.ctx.q() as u64);
        let mut acc = vec![0u64; n];
        for (i, &a) in self.coeffs.iter().enumerate() {
            if a == 0 {
                continue;
            }
            for (j, &b) in other.coeffs.iter().enumerate() {
                if b == 0 {
                    continue;
                }
                let prod = mul_mod(a as i64, b as i64, q) as i64;
                let k = i + j;
                if k < n {
                    acc[k] = add_mod(acc[k] as i64, prod, q);
                } else {
                    acc[k - n] = sub_mod(acc[k - n] as i64, prod, q);
                }
            }
        }
        Ok(Self {
            ctx: self.ctx,
            coeffs: acc.into_iter().map(|c| c as u32).collect(),
        })
    }

    /// Negacyclic product through the NTT; identical to [`Polynomial::mul`]
    pub fn mul_ntt(&self, other: &Self, plan: &NttPlan) -> Result<Self> {
        self.ctx.ensure_same(&other.ctx, "Polynomial::mul_ntt")?;
        self.ctx.ensure_same(&plan.context(), "Polynomial::mul_ntt")?;
        let coeffs = negacyclic_convolution(&self.coeffs, &other.coeffs, plan)?;
        Ok(Self {
            ctx: self.ctx,
            coeffs,
        })
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (i, &c) in self.coeffs.iter().enumerate() {
            if c == 0 {
                continue;
            }
            if !first {
                f.write_str(" + ")?;
            }
            first = false;
            match i {
                0 => write!(f, "{}", c)?,
                1 => write!(f, "{}·X", c)?,
                _ => write!(f, "{}·X^{}", c, i)?,
            }
        }
        if first {
            f.write_str("0")?;
        }
        Ok(())
    }
}

impl Add for &Polynomial {
    type Output = Result<Polynomial>;

    fn add(self, other: Self) -> Self::Output {
        Polynomial::add(self, other)
    }
}

impl Sub for &Polynomial {
    type Output = Result<Polynomial>;

    fn sub(self, other: Self) -> Self::Output {
        Polynomial::sub(self, other)
    }
}

impl Mul for &Polynomial {
    type Output = Result<Polynomial>;

    fn mul(self, other: Self) -> Self::Output {
        Polynomial::mul(self, other)
    }
}

impl Mul<i64> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, scalar: i64) -> Self::Output {
        self.scalar_mul(scalar)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Self::Output {
        Polynomial::neg(self)
    }
}
