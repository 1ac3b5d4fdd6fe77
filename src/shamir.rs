use std::collections::BTreeSet;
use std::fmt::Display;

use bls12_381::Scalar;
use ff::Field;
use group::Group;
use rand::TryCryptoRng;

use crate::curve::scalar_from_index;
use crate::error::{ThresholdError, ThresholdResult};
use crate::randutil::random_scalar_with;

/// Polynomial over Fr with coefficients [c0, c1, ..., cd].
///
/// c0 is the shared secret, so the coefficients are never printed.
#[derive(Clone)]
pub struct Poly {
    coeffs: Vec<Scalar>,
}

impl Poly {
    /// Sample a random degree-`degree` polynomial with chosen constant term.
    pub fn sample_with_constant<R>(degree: usize, c0: Scalar, rng: &mut R) -> ThresholdResult<Poly>
    where
        R: TryCryptoRng + ?Sized,
        R::Error: Display,
    {
        let mut coeffs = Vec::with_capacity(degree + 1);
        coeffs.push(c0);
        for _ in 0..degree {
            coeffs.push(random_scalar_with(rng)?);
        }
        Ok(Poly { coeffs })
    }

    /// Horner evaluation, highest coefficient first.
    pub fn eval(&self, x: Scalar) -> Scalar {
        self.coeffs
            .iter()
            .rev()
            .fold(Scalar::ZERO, |acc, c| acc * x + c)
    }
}

/// Reject index 0 and repeated indices before any field arithmetic.
fn check_indices(xs: &[u32]) -> ThresholdResult<()> {
    let mut seen = BTreeSet::new();
    for &x in xs {
        if x == 0 {
            return Err(ThresholdError::ZeroIndex);
        }
        if !seen.insert(x) {
            return Err(ThresholdError::DuplicateIndex { index: x });
        }
    }
    Ok(())
}

/// Lagrange basis coefficients at zero: λ_i = Π_{j≠i} (0 - x_j) / (x_i - x_j).
pub fn lagrange_coeffs_at_zero(xs: &[u32]) -> ThresholdResult<Vec<Scalar>> {
    check_indices(xs)?;

    let points: Vec<Scalar> = xs.iter().map(|&x| scalar_from_index(x)).collect();
    let mut coeffs = Vec::with_capacity(points.len());
    for (i, xi) in points.iter().enumerate() {
        let mut num = Scalar::ONE;
        let mut den = Scalar::ONE;
        for (j, xj) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            num *= -xj;
            den *= xi - xj;
        }
        let inv: Option<Scalar> = den.invert().into();
        let inv = inv.ok_or(ThresholdError::DuplicateIndex { index: xs[i] })?;
        coeffs.push(num * inv);
    }
    Ok(coeffs)
}

/// Recover f(0) from points (x_i, f(x_i)) in any prime-order group over Fr.
///
/// Fewer samples than the polynomial degree + 1 still produce a value, just
/// not f(0).
pub fn interpolate_at_zero<G>(points: &[(u32, G)]) -> ThresholdResult<G>
where
    G: Group<Scalar = Scalar>,
{
    let xs: Vec<u32> = points.iter().map(|(x, _)| *x).collect();
    let lambdas = lagrange_coeffs_at_zero(&xs)?;
    Ok(points
        .iter()
        .zip(lambdas)
        .fold(G::identity(), |acc, ((_, p), l)| acc + *p * l))
}

/// Recover f(0) from scalar samples.
pub fn interpolate_scalar_at_zero(points: &[(u32, Scalar)]) -> ThresholdResult<Scalar> {
    let xs: Vec<u32> = points.iter().map(|(x, _)| *x).collect();
    let lambdas = lagrange_coeffs_at_zero(&xs)?;
    Ok(points
        .iter()
        .zip(lambdas)
        .fold(Scalar::ZERO, |acc, ((_, y), l)| acc + y * l))
}
