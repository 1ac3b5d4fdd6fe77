//! Sharing and signing configuration.
//!
//! A (t, n) threshold scheme requires at least t out of n share-holders to
//! cooperate in order to produce a valid group signature.

use serde::{Deserialize, Serialize};

use crate::error::{ThresholdError, ThresholdResult};
use crate::hash::{validate_dst, DEFAULT_DST};
use crate::serde_helpers::dst_hex;

/// Minimum threshold. t = 1 would hand the whole secret to every holder.
pub const MIN_THRESHOLD: usize = 2;

/// Validate sharing parameters before any sampling happens.
pub fn validate_threshold_params(t: usize, n: usize) -> ThresholdResult<()> {
    let invalid = |reason: &'static str| ThresholdError::InvalidParameters { threshold: t, shares: n, reason };

    if t < MIN_THRESHOLD {
        return Err(invalid("threshold must be at least 2"));
    }
    if t > n {
        return Err(invalid(
            "threshold cannot exceed the number of shares (are the arguments swapped?)",
        ));
    }
    if u32::try_from(n).is_err() {
        return Err(invalid("share indices must fit in 32 bits"));
    }
    Ok(())
}

/// Validated (t, n) pair.
///
/// ```
/// use threshold_bls::ThresholdConfig;
///
/// let config = ThresholdConfig::new(2, 3).expect("valid parameters");
/// assert_eq!(config.threshold(), 2);
/// assert_eq!(config.shares(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholdConfig", into = "RawThresholdConfig")]
pub struct ThresholdConfig {
    threshold: usize,
    shares: usize,
}

impl ThresholdConfig {
    pub fn new(threshold: usize, shares: usize) -> ThresholdResult<Self> {
        validate_threshold_params(threshold, shares)?;
        Ok(ThresholdConfig { threshold, shares })
    }

    /// Minimum number of partial signatures needed.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Total number of share-holders.
    pub fn shares(&self) -> usize {
        self.shares
    }
}

#[derive(Serialize, Deserialize)]
struct RawThresholdConfig {
    threshold: usize,
    shares: usize,
}

impl TryFrom<RawThresholdConfig> for ThresholdConfig {
    type Error = ThresholdError;

    fn try_from(raw: RawThresholdConfig) -> ThresholdResult<Self> {
        ThresholdConfig::new(raw.threshold, raw.shares)
    }
}

impl From<ThresholdConfig> for RawThresholdConfig {
    fn from(config: ThresholdConfig) -> Self {
        RawThresholdConfig { threshold: config.threshold, shares: config.shares }
    }
}

/// Signing settings shared by signers and verifiers of one application.
///
/// The same DST must be used on both sides; a mismatch makes every
/// signature fail verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningConfig {
    #[serde(with = "dst_hex", default = "default_dst")]
    dst: Vec<u8>,
}

fn default_dst() -> Vec<u8> {
    DEFAULT_DST.to_vec()
}

impl SigningConfig {
    pub fn new(dst: impl Into<Vec<u8>>) -> ThresholdResult<Self> {
        let dst = dst.into();
        validate_dst(&dst)?;
        Ok(SigningConfig { dst })
    }

    /// DST in the form the signing and verification functions take.
    pub fn dst(&self) -> Option<&[u8]> {
        Some(self.dst.as_slice())
    }
}

impl Default for SigningConfig {
    fn default() -> Self {
        SigningConfig { dst: default_dst() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_threshold_params() {
        assert!(validate_threshold_params(2, 2).is_ok());
        assert!(validate_threshold_params(2, 3).is_ok());
        assert!(validate_threshold_params(7, 100).is_ok());
    }

    #[test]
    fn invalid_threshold_params() {
        // t = 1 lets any single holder recover the secret
        assert!(matches!(
            validate_threshold_params(1, 3),
            Err(ThresholdError::InvalidParameters { threshold: 1, shares: 3, .. })
        ));
        assert!(validate_threshold_params(0, 0).is_err());

        // threshold exceeds shares
        assert!(validate_threshold_params(4, 3).is_err());
    }

    #[test]
    fn config_deserialization_validates() {
        let config: ThresholdConfig =
            serde_json::from_str(r#"{"threshold":3,"shares":5}"#).unwrap();
        assert_eq!(config, ThresholdConfig::new(3, 5).unwrap());
        assert_eq!(serde_json::to_string(&config).unwrap(), r#"{"threshold":3,"shares":5}"#);

        assert!(serde_json::from_str::<ThresholdConfig>(r#"{"threshold":5,"shares":3}"#).is_err());
    }

    #[test]
    fn signing_config_defaults_to_ciphersuite_dst() {
        assert_eq!(SigningConfig::default().dst(), Some(DEFAULT_DST));
        let parsed: SigningConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, SigningConfig::default());
    }

    #[test]
    fn signing_config_round_trips_custom_dst() {
        let config = SigningConfig::new(&b"wow-thats-funny"[..]).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, format!("{{\"dst\":\"{}\"}}", hex::encode(b"wow-thats-funny")));
        assert_eq!(serde_json::from_str::<SigningConfig>(&json).unwrap(), config);

        assert!(SigningConfig::new(Vec::new()).is_err());
        assert!(serde_json::from_str::<SigningConfig>(r#"{"dst":""}"#).is_err());
    }
}
