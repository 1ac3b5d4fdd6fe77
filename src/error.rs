use thiserror::Error;

/// Result type for threshold operations.
pub type ThresholdResult<T> = Result<T, ThresholdError>;

/// Errors reported by key generation, sharing, signing and aggregation.
///
/// Verification never produces one of these: it answers `false` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThresholdError {
    /// Invalid sharing parameters (t, n).
    #[error("invalid threshold parameters: t={threshold}, n={shares}: {reason}")]
    InvalidParameters {
        threshold: usize,
        shares: usize,
        reason: &'static str,
    },

    /// Index 0 belongs to the secret itself and cannot label a share.
    #[error("share index 0 is reserved for the secret")]
    ZeroIndex,

    /// Two inputs carry the same index, so a Lagrange denominator vanishes.
    #[error("duplicate share index {index}")]
    DuplicateIndex { index: u32 },

    #[error("no shares supplied")]
    NoShares,

    #[error("invalid {kind} encoding: expected {expected} bytes, got {actual}")]
    InvalidEncoding {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Bytes have the right length but are not a point of the prime-order subgroup.
    #[error("invalid {kind} point")]
    InvalidPoint { kind: &'static str },

    /// Bytes are not a canonical non-zero scalar.
    #[error("invalid scalar")]
    InvalidScalar,

    #[error("invalid domain separation tag: {length} bytes (must be 1..=255)")]
    InvalidDst { length: usize },

    #[error("key seed too short: {length} bytes (need at least 32)")]
    SeedTooShort { length: usize },

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// The random source failed. Fatal; callers should not retry blindly.
    #[error("random source failure: {0}")]
    Randomness(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = ThresholdError::InvalidParameters {
            threshold: 1,
            shares: 3,
            reason: "threshold must be at least 2",
        };
        assert_eq!(
            err.to_string(),
            "invalid threshold parameters: t=1, n=3: threshold must be at least 2"
        );
        assert_eq!(
            ThresholdError::DuplicateIndex { index: 4 }.to_string(),
            "duplicate share index 4"
        );
        assert_eq!(
            ThresholdError::InvalidEncoding { kind: "G1", expected: 48, actual: 3 }.to_string(),
            "invalid G1 encoding: expected 48 bytes, got 3"
        );
    }
}
