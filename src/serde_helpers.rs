//! Serde support for curve points and byte strings.
//!
//! Compressed points exceed serde's 32-element array limit, so they travel
//! as lowercase hex strings. Deserialization runs the same subgroup checks
//! as `from_bytes`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

fn hex_bytes<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    hex::decode(text).map_err(D::Error::custom)
}

pub mod g1_hex {
    use super::*;
    use bls12_381::G1Affine;

    pub fn serialize<S>(point: &G1Affine, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(crate::curve::encode_g1(point)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<G1Affine, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes = hex_bytes(deserializer)?;
        crate::curve::decode_g1(&bytes).map_err(D::Error::custom)
    }
}

pub mod g2_hex {
    use super::*;
    use bls12_381::G2Affine;

    pub fn serialize<S>(point: &G2Affine, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(crate::curve::encode_g2(point)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<G2Affine, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes = hex_bytes(deserializer)?;
        let point = crate::curve::decode_g2(&bytes).map_err(D::Error::custom)?;
        if bool::from(point.is_identity()) {
            return Err(D::Error::custom("identity is not a valid public key"));
        }
        Ok(point)
    }
}

/// Domain separation tags as hex, validated on the way in.
pub mod dst_hex {
    use super::*;

    pub fn serialize<S>(dst: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(dst))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes = hex_bytes(deserializer)?;
        crate::hash::validate_dst(&bytes).map_err(D::Error::custom)?;
        Ok(bytes)
    }
}
