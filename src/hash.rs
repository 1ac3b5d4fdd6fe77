use bls12_381::hash_to_curve::{ExpandMsgXmd, HashToCurve};
use bls12_381::G1Projective;
use sha2::Sha256;

use crate::error::{ThresholdError, ThresholdResult};

/// Ciphersuite tag of the basic minimal-signature-size BLS scheme.
pub const DEFAULT_DST: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";

/// expand_message_xmd encodes the DST length in a single byte.
pub const MAX_DST_LEN: usize = 255;

pub fn validate_dst(dst: &[u8]) -> ThresholdResult<()> {
    if dst.is_empty() || dst.len() > MAX_DST_LEN {
        return Err(ThresholdError::InvalidDst { length: dst.len() });
    }
    Ok(())
}

/// Pick the caller's DST, or the default when none was given.
pub fn resolve_dst(dst: Option<&[u8]>) -> ThresholdResult<&[u8]> {
    match dst {
        Some(dst) => {
            validate_dst(dst)?;
            Ok(dst)
        }
        None => Ok(DEFAULT_DST),
    }
}

/// Domain-separated hash-to-G1 (SSWU, random-oracle variant).
pub fn hash_to_g1(message: &[u8], dst: &[u8]) -> G1Projective {
    <G1Projective as HashToCurve<ExpandMsgXmd<Sha256>>>::hash_to_curve(message, dst)
}
