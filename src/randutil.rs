use core::fmt::Display;

use bls12_381::Scalar;
use ff::Field;
use rand::TryCryptoRng;

use crate::curve::{below_order, SCALAR_BYTES};
use crate::error::{ThresholdError, ThresholdResult};

/// Uniform scalar in `[0, r)` by rejection sampling raw bytes against `ORDER`.
///
/// Draws are never reduced modulo r, so there is no bias. r < 2^255, which
/// lets the top bit be cleared without changing the distribution below r.
pub fn random_scalar_with<R>(rng: &mut R) -> ThresholdResult<Scalar>
where
    R: TryCryptoRng + ?Sized,
    R::Error: Display,
{
    let mut bytes = [0u8; SCALAR_BYTES];
    loop {
        rng.try_fill_bytes(&mut bytes)
            .map_err(|err| ThresholdError::Randomness(err.to_string()))?;
        bytes[SCALAR_BYTES - 1] &= 0x7f;
        if below_order(&bytes) {
            return Option::<Scalar>::from(Scalar::from_bytes(&bytes))
                .ok_or(ThresholdError::InvalidScalar);
        }
    }
}

/// Uniform scalar in `[1, r)`.
pub fn random_nonzero_scalar_with<R>(rng: &mut R) -> ThresholdResult<Scalar>
where
    R: TryCryptoRng + ?Sized,
    R::Error: Display,
{
    loop {
        let s = random_scalar_with(rng)?;
        if !bool::from(s.is_zero()) {
            return Ok(s);
        }
    }
}
