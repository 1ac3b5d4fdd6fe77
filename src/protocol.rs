use bls12_381::{G1Affine, G1Projective, G2Affine};
use tracing::{debug, trace};

use crate::curve::{decode_g1, raw_sign, raw_verify};
use crate::error::ThresholdResult;
use crate::hash::resolve_dst;
use crate::shamir::interpolate_at_zero;
use crate::types::{
    PartialSignature, PublicKeyInput, SecretKeyInput, SecretKeyShareInput, Signature,
    SignatureInput,
};

/// Sign with a full secret key. `dst = None` selects [`crate::DEFAULT_DST`].
pub fn sign<'a>(
    secret: impl Into<SecretKeyInput<'a>>,
    message: &[u8],
    dst: Option<&[u8]>,
) -> ThresholdResult<Signature> {
    let dst = resolve_dst(dst)?;
    let sk = secret.into().resolve()?;
    Ok(Signature(raw_sign(&sk, message, dst)))
}

/// Sign with one share. The result carries the share's index.
///
/// The share may also be given as `(index, scalar bytes)`.
pub fn sign_partial<'a>(
    share: impl Into<SecretKeyShareInput<'a>>,
    message: &[u8],
    dst: Option<&[u8]>,
) -> ThresholdResult<PartialSignature> {
    let dst = resolve_dst(dst)?;
    let (index, share) = share.into().resolve()?;
    trace!(index, "partial signing");
    Ok(PartialSignature { index, signature: raw_sign(&share, message, dst) })
}

/// Combine partial signatures into the group signature by Lagrange
/// interpolation at zero.
///
/// Precondition, not checked here: at least `t` partials with distinct
/// indices, all from one sharing session and over the same message and DST.
/// Fewer than `t` partials still aggregate, but the result fails
/// [`verify`]. Order does not matter. Index 0 and repeated indices are
/// rejected before any arithmetic.
pub fn aggregate(partials: &[PartialSignature]) -> ThresholdResult<Signature> {
    let points: Vec<(u32, G1Projective)> = partials
        .iter()
        .map(|p| (p.index, G1Projective::from(p.signature)))
        .collect();
    let sig = interpolate_at_zero(&points)?;

    debug!(
        count = partials.len(),
        indices = ?points.iter().map(|(x, _)| *x).collect::<Vec<_>>(),
        "aggregated partial signatures"
    );
    Ok(Signature(G1Affine::from(sig)))
}

/// [`aggregate`] over raw `(index, compressed G1)` pairs.
pub fn aggregate_bytes(partials: &[(u32, &[u8])]) -> ThresholdResult<Signature> {
    let decoded = partials
        .iter()
        .map(|&(index, bytes)| Ok(PartialSignature { index, signature: decode_g1(bytes)? }))
        .collect::<ThresholdResult<Vec<_>>>()?;
    aggregate(&decoded)
}

/// Check a group or full-key signature.
///
/// Total over its inputs: malformed keys, signatures or DSTs give `false`.
pub fn verify<'k, 's>(
    public_key: impl Into<PublicKeyInput<'k>>,
    message: &[u8],
    signature: impl Into<SignatureInput<'s>>,
    dst: Option<&[u8]>,
) -> bool {
    check(public_key.into(), message, signature.into(), dst)
}

/// Check one contributor's partial signature against its public key share.
///
/// Same predicate as [`verify`]; the indices are not consulted.
pub fn verify_partial<'k, 's>(
    public_key_share: impl Into<PublicKeyInput<'k>>,
    message: &[u8],
    partial: impl Into<SignatureInput<'s>>,
    dst: Option<&[u8]>,
) -> bool {
    check(public_key_share.into(), message, partial.into(), dst)
}

fn check(pk: PublicKeyInput<'_>, message: &[u8], sig: SignatureInput<'_>, dst: Option<&[u8]>) -> bool {
    match resolve_inputs(pk, sig, dst) {
        Ok((pk, sig, dst)) => raw_verify(&sig, message, &pk, dst),
        Err(err) => {
            debug!(%err, "rejecting malformed verification input");
            false
        }
    }
}

fn resolve_inputs<'d>(
    pk: PublicKeyInput<'_>,
    sig: SignatureInput<'_>,
    dst: Option<&'d [u8]>,
) -> ThresholdResult<(G2Affine, G1Affine, &'d [u8])> {
    let dst = resolve_dst(dst)?;
    Ok((pk.resolve()?, sig.resolve()?, dst))
}
