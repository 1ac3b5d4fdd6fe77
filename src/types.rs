use std::fmt;

use bls12_381::{G1Affine, G2Affine, Scalar};
use ff::Field;
use serde::{Deserialize, Serialize};

use crate::curve::{
    decode_g1, decode_g2, decode_scalar, encode_g1, encode_g2, encode_scalar, G1_BYTES, G2_BYTES,
    SCALAR_BYTES,
};
use crate::error::{ThresholdError, ThresholdResult};
use crate::serde_helpers::{g1_hex, g2_hex};

/// Non-zero scalar held by a single identity.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(pub(crate) Scalar);

impl SecretKey {
    pub fn from_bytes(bytes: &[u8]) -> ThresholdResult<Self> {
        nonzero(decode_scalar(bytes)?).map(SecretKey)
    }

    pub fn to_bytes(&self) -> [u8; SCALAR_BYTES] {
        encode_scalar(&self.0)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

/// g2 * sk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey(#[serde(with = "g2_hex")] pub(crate) G2Affine);

impl PublicKey {
    /// Decode a compressed G2 key. The identity is rejected.
    pub fn from_bytes(bytes: &[u8]) -> ThresholdResult<Self> {
        nonidentity_g2(decode_g2(bytes)?).map(PublicKey)
    }

    pub fn to_bytes(&self) -> [u8; G2_BYTES] {
        encode_g2(&self.0)
    }
}

/// One evaluation (index, P(index)) of a sharing polynomial.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKeyShare {
    pub(crate) index: u32,
    pub(crate) share: Scalar,
}

impl SecretKeyShare {
    pub fn from_bytes(index: u32, bytes: &[u8]) -> ThresholdResult<Self> {
        if index == 0 {
            return Err(ThresholdError::ZeroIndex);
        }
        Ok(SecretKeyShare { index, share: decode_scalar(bytes)? })
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn to_bytes(&self) -> [u8; SCALAR_BYTES] {
        encode_scalar(&self.share)
    }
}

impl fmt::Debug for SecretKeyShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKeyShare")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyShare {
    pub(crate) index: u32,
    #[serde(with = "g2_hex")]
    pub(crate) key: G2Affine,
}

impl PublicKeyShare {
    pub fn from_bytes(index: u32, bytes: &[u8]) -> ThresholdResult<Self> {
        if index == 0 {
            return Err(ThresholdError::ZeroIndex);
        }
        let key = nonidentity_g2(decode_g2(bytes)?)?;
        Ok(PublicKeyShare { index, key })
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn to_bytes(&self) -> [u8; G2_BYTES] {
        encode_g2(&self.key)
    }
}

/// A share-holder's signature on one message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialSignature {
    pub(crate) index: u32,
    #[serde(with = "g1_hex")]
    pub(crate) signature: G1Affine,
}

impl PartialSignature {
    pub fn from_bytes(index: u32, bytes: &[u8]) -> ThresholdResult<Self> {
        Ok(PartialSignature { index, signature: decode_g1(bytes)? })
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn to_bytes(&self) -> [u8; G1_BYTES] {
        encode_g1(&self.signature)
    }
}

/// Full-key or aggregated group signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(#[serde(with = "g1_hex")] pub(crate) G1Affine);

impl Signature {
    pub fn from_bytes(bytes: &[u8]) -> ThresholdResult<Self> {
        decode_g1(bytes).map(Signature)
    }

    pub fn to_bytes(&self) -> [u8; G1_BYTES] {
        encode_g1(&self.0)
    }
}

fn nonzero(s: Scalar) -> ThresholdResult<Scalar> {
    if bool::from(s.is_zero()) {
        return Err(ThresholdError::InvalidScalar);
    }
    Ok(s)
}

fn nonidentity_g2(p: G2Affine) -> ThresholdResult<G2Affine> {
    if bool::from(p.is_identity()) {
        return Err(ThresholdError::InvalidPoint { kind: "G2" });
    }
    Ok(p)
}

// =============================
// Inputs accepted as record or raw bytes
// =============================

/// A secret scalar given either as a key or as its 32-byte encoding.
#[derive(Clone, Copy)]
pub enum SecretKeyInput<'a> {
    Key(&'a SecretKey),
    Bytes(&'a [u8]),
}

impl SecretKeyInput<'_> {
    pub(crate) fn resolve(self) -> ThresholdResult<Scalar> {
        match self {
            SecretKeyInput::Key(key) => Ok(key.0),
            SecretKeyInput::Bytes(bytes) => nonzero(decode_scalar(bytes)?),
        }
    }
}

impl<'a> From<&'a SecretKey> for SecretKeyInput<'a> {
    fn from(key: &'a SecretKey) -> Self {
        SecretKeyInput::Key(key)
    }
}

impl<'a> From<&'a [u8]> for SecretKeyInput<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        SecretKeyInput::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for SecretKeyInput<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        SecretKeyInput::Bytes(bytes)
    }
}

/// A signing share given as a record or as `(index, 32-byte scalar)`.
#[derive(Clone, Copy)]
pub enum SecretKeyShareInput<'a> {
    Share(&'a SecretKeyShare),
    Bytes(u32, &'a [u8]),
}

impl SecretKeyShareInput<'_> {
    pub(crate) fn resolve(self) -> ThresholdResult<(u32, Scalar)> {
        match self {
            SecretKeyShareInput::Share(share) => Ok((share.index, share.share)),
            SecretKeyShareInput::Bytes(index, bytes) => {
                let share = SecretKeyShare::from_bytes(index, bytes)?;
                Ok((share.index, share.share))
            }
        }
    }
}

impl<'a> From<&'a SecretKeyShare> for SecretKeyShareInput<'a> {
    fn from(share: &'a SecretKeyShare) -> Self {
        SecretKeyShareInput::Share(share)
    }
}

impl<'a> From<(u32, &'a [u8])> for SecretKeyShareInput<'a> {
    fn from((index, bytes): (u32, &'a [u8])) -> Self {
        SecretKeyShareInput::Bytes(index, bytes)
    }
}

impl<'a, const N: usize> From<(u32, &'a [u8; N])> for SecretKeyShareInput<'a> {
    fn from((index, bytes): (u32, &'a [u8; N])) -> Self {
        SecretKeyShareInput::Bytes(index, bytes)
    }
}

/// A G2 verification key: the group key, one share's key, or raw bytes.
#[derive(Clone, Copy, Debug)]
pub enum PublicKeyInput<'a> {
    Key(&'a PublicKey),
    Share(&'a PublicKeyShare),
    Bytes(&'a [u8]),
}

impl PublicKeyInput<'_> {
    pub(crate) fn resolve(self) -> ThresholdResult<G2Affine> {
        match self {
            PublicKeyInput::Key(key) => Ok(key.0),
            PublicKeyInput::Share(share) => Ok(share.key),
            PublicKeyInput::Bytes(bytes) => nonidentity_g2(decode_g2(bytes)?),
        }
    }
}

impl<'a> From<&'a PublicKey> for PublicKeyInput<'a> {
    fn from(key: &'a PublicKey) -> Self {
        PublicKeyInput::Key(key)
    }
}

impl<'a> From<&'a PublicKeyShare> for PublicKeyInput<'a> {
    fn from(share: &'a PublicKeyShare) -> Self {
        PublicKeyInput::Share(share)
    }
}

impl<'a> From<&'a [u8]> for PublicKeyInput<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        PublicKeyInput::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for PublicKeyInput<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        PublicKeyInput::Bytes(bytes)
    }
}

/// A G1 signature: group signature, partial signature, or raw bytes.
#[derive(Clone, Copy, Debug)]
pub enum SignatureInput<'a> {
    Signature(&'a Signature),
    Partial(&'a PartialSignature),
    Bytes(&'a [u8]),
}

impl SignatureInput<'_> {
    pub(crate) fn resolve(self) -> ThresholdResult<G1Affine> {
        match self {
            SignatureInput::Signature(sig) => Ok(sig.0),
            SignatureInput::Partial(partial) => Ok(partial.signature),
            SignatureInput::Bytes(bytes) => decode_g1(bytes),
        }
    }
}

impl<'a> From<&'a Signature> for SignatureInput<'a> {
    fn from(sig: &'a Signature) -> Self {
        SignatureInput::Signature(sig)
    }
}

impl<'a> From<&'a PartialSignature> for SignatureInput<'a> {
    fn from(partial: &'a PartialSignature) -> Self {
        SignatureInput::Partial(partial)
    }
}

impl<'a> From<&'a [u8]> for SignatureInput<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        SignatureInput::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for SignatureInput<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        SignatureInput::Bytes(bytes)
    }
}
