//! Public matrix expansion and matrix-vector products

use solmae_algorithms::hash::h_matrix_entry;
use solmae_algorithms::{NttPlan, Polynomial, RingContext};

use crate::error::{Error as SignError, Result};

/// Entry `(i, j)` of A: `2n` XOF bytes read as big-endian 16-bit words mod q
pub(crate) fn poly_from_rho(rho: &[u8], i: usize, j: usize, ctx: RingContext) -> Result<Polynomial> {
    let n = ctx.n();
    let q = ctx.q();
    let buf = h_matrix_entry(rho, i as u16, j as u16, 2 * n);
    let coeffs = buf
        .chunks_exact(2)
        .map(|pair| (((pair[0] as u32) << 8) | pair[1] as u32) % q)
        .collect();
    Ok(Polynomial::from_reduced(ctx, coeffs)?)
}

/// The `k x k` matrix A, row by row
pub(crate) fn expand_matrix_a(rho: &[u8], k: usize, ctx: RingContext) -> Result<Vec<Vec<Polynomial>>> {
    (0..k)
        .map(|i| (0..k).map(|j| poly_from_rho(rho, i, j, ctx)).collect())
        .collect()
}

/// `A · v` with every product taken in the NTT domain
///
/// Each entry of `v` is transformed once and each row is accumulated
/// pointwise before a single inverse transform.
pub(crate) fn matrix_vector_mul(
    a: &[Vec<Polynomial>],
    v: &[Polynomial],
    plan: &NttPlan,
) -> Result<Vec<Polynomial>> {
    let ctx = plan.context();
    let v_hat = v
        .iter()
        .map(|p| {
            ctx.ensure_same(&p.context(), "matrix_vector_mul")?;
            plan.forward_negacyclic(p.coeffs())
        })
        .collect::<solmae_algorithms::Result<Vec<_>>>()?;

    let mut out = Vec::with_capacity(a.len());
    for row in a {
        if row.len() != v_hat.len() {
            return Err(SignError::Internal(format!(
                "matrix row has {} entries, vector has {}",
                row.len(),
                v_hat.len()
            )));
        }
        let mut acc = vec![0u32; ctx.n()];
        for (entry, vj) in row.iter().zip(&v_hat) {
            let entry_hat = plan.forward_negacyclic(entry.coeffs())?;
            plan.pointwise_accumulate(&mut acc, &entry_hat, vj)?;
        }
        let coeffs = plan.inverse_negacyclic(acc)?;
        out.push(Polynomial::from_reduced(ctx, coeffs)?);
    }
    Ok(out)
}
