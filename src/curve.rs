//! Boundary to the BLS12-381 curve engine.
//!
//! Signatures live in G1 (48-byte compressed), public keys in G2 (96-byte
//! compressed), scalars are 32-byte little-endian canonical encodings.

use bls12_381::{pairing, G1Affine, G1Projective, G2Affine, G2Projective, Scalar};

use crate::error::{ThresholdError, ThresholdResult};
use crate::hash::hash_to_g1;

pub const SCALAR_BYTES: usize = 32;
pub const G1_BYTES: usize = 48;
pub const G2_BYTES: usize = 96;

/// Order r of the scalar field, little-endian (same layout as scalar encodings).
/// Random draws are compared against it before decoding.
///
/// r = 0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001
pub const ORDER: [u8; SCALAR_BYTES] = [
    0x01, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0xfe, 0x5b, 0xfe, 0xff, 0x02, 0xa4, 0xbd, 0x53,
    0x05, 0xd8, 0xa1, 0x09, 0x08, 0xd8, 0x39, 0x33, 0x48, 0x7d, 0x9d, 0x29, 0x53, 0xa7, 0xed, 0x73,
];

/// Whether little-endian `bytes` encode an integer below r.
pub fn below_order(bytes: &[u8; SCALAR_BYTES]) -> bool {
    for (b, r) in bytes.iter().rev().zip(ORDER.iter().rev()) {
        if b != r {
            return b < r;
        }
    }
    false
}

pub fn scalar_from_index(x: u32) -> Scalar {
    Scalar::from(u64::from(x))
}

pub fn encode_scalar(s: &Scalar) -> [u8; SCALAR_BYTES] {
    s.to_bytes()
}

/// Decode a canonical scalar (`< ORDER`). Zero is accepted here.
pub fn decode_scalar(bytes: &[u8]) -> ThresholdResult<Scalar> {
    let arr: &[u8; SCALAR_BYTES] = bytes.try_into().map_err(|_| ThresholdError::InvalidEncoding {
        kind: "scalar",
        expected: SCALAR_BYTES,
        actual: bytes.len(),
    })?;
    Option::from(Scalar::from_bytes(arr)).ok_or(ThresholdError::InvalidScalar)
}

pub fn encode_g1(p: &G1Affine) -> [u8; G1_BYTES] {
    p.to_compressed()
}

/// Decode a compressed G1 point; rejects off-curve and out-of-subgroup encodings.
pub fn decode_g1(bytes: &[u8]) -> ThresholdResult<G1Affine> {
    let arr: &[u8; G1_BYTES] = bytes.try_into().map_err(|_| ThresholdError::InvalidEncoding {
        kind: "G1",
        expected: G1_BYTES,
        actual: bytes.len(),
    })?;
    Option::from(G1Affine::from_compressed(arr)).ok_or(ThresholdError::InvalidPoint { kind: "G1" })
}

pub fn encode_g2(p: &G2Affine) -> [u8; G2_BYTES] {
    p.to_compressed()
}

/// Decode a compressed G2 point; rejects off-curve and out-of-subgroup encodings.
pub fn decode_g2(bytes: &[u8]) -> ThresholdResult<G2Affine> {
    let arr: &[u8; G2_BYTES] = bytes.try_into().map_err(|_| ThresholdError::InvalidEncoding {
        kind: "G2",
        expected: G2_BYTES,
        actual: bytes.len(),
    })?;
    Option::from(G2Affine::from_compressed(arr)).ok_or(ThresholdError::InvalidPoint { kind: "G2" })
}

/// g2 * k, the secret-to-public homomorphism.
pub fn g2_mul_generator(k: &Scalar) -> G2Affine {
    G2Affine::from(G2Projective::generator() * k)
}

pub fn point_mul(base: &G1Projective, k: &Scalar) -> G1Projective {
    base * k
}

/// BLS sign: H(message, dst) * sk.
pub fn raw_sign(sk: &Scalar, message: &[u8], dst: &[u8]) -> G1Affine {
    G1Affine::from(point_mul(&hash_to_g1(message, dst), sk))
}

/// BLS verify: e(sig, g2) == e(H(message, dst), pk).
///
/// The identity is never a valid key or signature.
pub fn raw_verify(sig: &G1Affine, message: &[u8], pk: &G2Affine, dst: &[u8]) -> bool {
    if bool::from(pk.is_identity()) || bool::from(sig.is_identity()) {
        return false;
    }
    let h = G1Affine::from(hash_to_g1(message, dst));
    pairing(sig, &G2Affine::generator()) == pairing(&h, pk)
}
