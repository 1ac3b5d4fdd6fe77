use std::fmt::Display;

use bls12_381::{G2Affine, G2Projective, Scalar};
use ff::Field;
use hkdf::Hkdf;
use rand::rngs::OsRng;
use rand::TryCryptoRng;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::{validate_threshold_params, ThresholdConfig};
use crate::curve::{g2_mul_generator, scalar_from_index};
use crate::error::{ThresholdError, ThresholdResult};
use crate::randutil::random_nonzero_scalar_with;
use crate::shamir::{interpolate_at_zero, interpolate_scalar_at_zero, Poly};
use crate::types::{PublicKey, PublicKeyShare, SecretKey, SecretKeyInput, SecretKeyShare};

const KEYGEN_SALT: &[u8] = b"BLS-SIG-KEYGEN-SALT-";
const KEYGEN_OKM_LEN: usize = 48;
const MIN_IKM_LEN: usize = 32;

impl SecretKey {
    /// Uniform key in `[1, r)` from the OS random source.
    pub fn generate() -> ThresholdResult<Self> {
        Self::generate_with(&mut OsRng)
    }

    pub fn generate_with<R>(rng: &mut R) -> ThresholdResult<Self>
    where
        R: TryCryptoRng + ?Sized,
        R::Error: Display,
    {
        random_nonzero_scalar_with(rng).map(SecretKey)
    }

    /// Deterministic key from input keying material (IETF BLS `KeyGen`).
    ///
    /// HKDF-SHA256 with a re-hashed salt, 48 bytes of output reduced mod r,
    /// repeated until the key is non-zero.
    pub fn from_seed(ikm: &[u8], key_info: &[u8]) -> ThresholdResult<Self> {
        if ikm.len() < MIN_IKM_LEN {
            return Err(ThresholdError::SeedTooShort { length: ikm.len() });
        }

        let mut ikm0 = Vec::with_capacity(ikm.len() + 1);
        ikm0.extend_from_slice(ikm);
        ikm0.push(0);

        let mut info = Vec::with_capacity(key_info.len() + 2);
        info.extend_from_slice(key_info);
        info.extend_from_slice(&(KEYGEN_OKM_LEN as u16).to_be_bytes());

        let mut salt = Sha256::digest(KEYGEN_SALT).to_vec();
        loop {
            let hk = Hkdf::<Sha256>::new(Some(salt.as_slice()), &ikm0);
            let mut okm = [0u8; KEYGEN_OKM_LEN];
            hk.expand(&info, &mut okm)
                .map_err(|err| ThresholdError::KeyDerivation(err.to_string()))?;

            // OS2IP is big-endian; from_bytes_wide wants little-endian.
            let mut wide = [0u8; 64];
            for (dst, src) in wide.iter_mut().zip(okm.iter().rev()) {
                *dst = *src;
            }
            let sk = Scalar::from_bytes_wide(&wide);
            if !bool::from(sk.is_zero()) {
                return Ok(SecretKey(sk));
            }
            salt = Sha256::digest(&salt).to_vec();
        }
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from(self)
    }
}

impl From<&SecretKey> for PublicKey {
    fn from(sk: &SecretKey) -> Self {
        PublicKey(g2_mul_generator(&sk.0))
    }
}

impl SecretKeyShare {
    pub fn public_key_share(&self) -> PublicKeyShare {
        PublicKeyShare::from(self)
    }
}

impl From<&SecretKeyShare> for PublicKeyShare {
    fn from(share: &SecretKeyShare) -> Self {
        PublicKeyShare { index: share.index, key: g2_mul_generator(&share.share) }
    }
}

/// Public key for a secret given as a key or as raw bytes.
pub fn public_key<'a>(secret: impl Into<SecretKeyInput<'a>>) -> ThresholdResult<PublicKey> {
    let sk = secret.into().resolve()?;
    Ok(PublicKey(g2_mul_generator(&sk)))
}

pub fn public_key_share(share: &SecretKeyShare) -> PublicKeyShare {
    PublicKeyShare::from(share)
}

pub fn public_key_shares(shares: &[SecretKeyShare]) -> Vec<PublicKeyShare> {
    shares.iter().map(PublicKeyShare::from).collect()
}

/// Split a secret into `n` shares, any `t` of which can sign for it.
///
/// Shares are indexed `1..=n`. Requires `2 <= t <= n`.
pub fn split<'a>(
    secret: impl Into<SecretKeyInput<'a>>,
    n: usize,
    t: usize,
) -> ThresholdResult<Vec<SecretKeyShare>> {
    split_with_rng(secret, n, t, &mut OsRng)
}

pub fn split_with_config<'a>(
    secret: impl Into<SecretKeyInput<'a>>,
    config: &ThresholdConfig,
) -> ThresholdResult<Vec<SecretKeyShare>> {
    split(secret, config.shares(), config.threshold())
}

pub fn split_with_rng<'a, R>(
    secret: impl Into<SecretKeyInput<'a>>,
    n: usize,
    t: usize,
    rng: &mut R,
) -> ThresholdResult<Vec<SecretKeyShare>>
where
    R: TryCryptoRng + ?Sized,
    R::Error: Display,
{
    validate_threshold_params(t, n)?;
    let secret = secret.into().resolve()?;

    // degree t-1: t points pin it down, t-1 reveal nothing about P(0)
    let poly = Poly::sample_with_constant(t - 1, secret, rng)?;

    // n fits in u32, checked by validate_threshold_params
    let shares: Vec<SecretKeyShare> = (1..=n as u32)
        .map(|index| SecretKeyShare { index, share: poly.eval(scalar_from_index(index)) })
        .collect();

    debug!(shares = n, threshold = t, "split secret");
    Ok(shares)
}

/// Reassemble the secret from `t` or more shares of one sharing session.
///
/// With fewer than `t` shares the result is an unrelated key.
pub fn recover_secret(shares: &[SecretKeyShare]) -> ThresholdResult<SecretKey> {
    if shares.is_empty() {
        return Err(ThresholdError::NoShares);
    }
    let points: Vec<(u32, Scalar)> = shares.iter().map(|s| (s.index, s.share)).collect();
    let secret = interpolate_scalar_at_zero(&points)?;
    debug!(count = shares.len(), "recovered secret from shares");
    if bool::from(secret.is_zero()) {
        return Err(ThresholdError::InvalidScalar);
    }
    Ok(SecretKey(secret))
}

/// Group public key from `t` or more public key shares.
pub fn recover_public_key(shares: &[PublicKeyShare]) -> ThresholdResult<PublicKey> {
    if shares.is_empty() {
        return Err(ThresholdError::NoShares);
    }
    let points: Vec<(u32, G2Projective)> =
        shares.iter().map(|s| (s.index, G2Projective::from(s.key))).collect();
    let key = G2Affine::from(interpolate_at_zero(&points)?);
    debug!(count = shares.len(), "recovered public key from shares");
    if bool::from(key.is_identity()) {
        return Err(ThresholdError::InvalidPoint { kind: "G2" });
    }
    Ok(PublicKey(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    use rand::rngs::StdRng;
    use rand::{SeedableRng, TryRngCore};

    #[derive(Debug)]
    struct SourceExhausted;

    impl fmt::Display for SourceExhausted {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("entropy source exhausted")
        }
    }

    /// Fails every draw and counts how often it was asked.
    #[derive(Default)]
    struct DeadRng {
        draws: usize,
    }

    impl TryRngCore for DeadRng {
        type Error = SourceExhausted;

        fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
            self.draws += 1;
            Err(SourceExhausted)
        }

        fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
            self.draws += 1;
            Err(SourceExhausted)
        }

        fn try_fill_bytes(&mut self, _dst: &mut [u8]) -> Result<(), Self::Error> {
            self.draws += 1;
            Err(SourceExhausted)
        }
    }

    impl TryCryptoRng for DeadRng {}

    #[test]
    fn bad_parameters_fail_before_sampling() {
        let sk = SecretKey(Scalar::from(42));
        for (n, t) in [(3, 1), (3, 0), (2, 3), (0, 2)] {
            let mut rng = DeadRng::default();
            assert!(matches!(
                split_with_rng(&sk, n, t, &mut rng),
                Err(ThresholdError::InvalidParameters { .. })
            ));
            assert_eq!(rng.draws, 0);
        }
    }

    #[test]
    fn random_source_failure_is_propagated() {
        let mut rng = DeadRng::default();
        assert_eq!(
            SecretKey::generate_with(&mut rng),
            Err(ThresholdError::Randomness("entropy source exhausted".into()))
        );
        assert_eq!(rng.draws, 1);

        let sk = SecretKey(Scalar::from(42));
        let mut rng = DeadRng::default();
        assert!(matches!(
            split_with_rng(&sk, 3, 2, &mut rng),
            Err(ThresholdError::Randomness(_))
        ));
        assert_eq!(rng.draws, 1);
    }

    #[test]
    fn shares_are_indexed_from_one() {
        let sk = SecretKey::generate().unwrap();
        let shares = split(&sk, 5, 3).unwrap();
        let indices: Vec<u32> = shares.iter().map(SecretKeyShare::index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn seeded_split_is_reproducible() {
        let sk = SecretKey::generate_with(&mut StdRng::seed_from_u64(1)).unwrap();
        let a = split_with_rng(&sk, 4, 2, &mut StdRng::seed_from_u64(2)).unwrap();
        let b = split_with_rng(&sk, 4, 2, &mut StdRng::seed_from_u64(2)).unwrap();
        let c = split_with_rng(&sk, 4, 2, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn shares_differ_from_the_secret() {
        let sk = SecretKey::generate().unwrap();
        for share in split(&sk, 4, 3).unwrap() {
            assert_ne!(share.share, sk.0);
        }
    }

    #[test]
    fn threshold_shares_recover_the_secret() {
        let sk = SecretKey::generate().unwrap();
        let shares = split(&sk, 5, 3).unwrap();
        assert_eq!(recover_secret(&shares[..3]).unwrap(), sk);
        assert_eq!(recover_secret(&shares[2..]).unwrap(), sk);
        assert_eq!(recover_secret(&shares).unwrap(), sk);
        assert_ne!(recover_secret(&shares[..2]).unwrap(), sk);
        assert_eq!(recover_secret(&[]), Err(ThresholdError::NoShares));
    }

    #[test]
    fn public_shares_recover_the_group_key() {
        let sk = SecretKey::generate().unwrap();
        let shares = split(&sk, 4, 2).unwrap();
        let public = public_key_shares(&shares);
        assert_eq!(public[1].index(), 2);
        assert_eq!(recover_public_key(&public[2..]).unwrap(), sk.public_key());
        assert_ne!(recover_public_key(&public[..1]).unwrap(), sk.public_key());
    }

    #[test]
    fn raw_secret_bytes_split_like_the_key() {
        let sk = SecretKey::generate().unwrap();
        let bytes = sk.to_bytes();
        let shares = split_with_rng(&bytes, 3, 2, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(recover_secret(&shares).unwrap(), sk);
        assert_eq!(public_key(&bytes).unwrap(), public_key(&sk).unwrap());
        assert!(split(&[0u8; 32], 3, 2).is_err());
    }

    #[test]
    fn seed_derivation_is_deterministic() {
        let ikm = [7u8; 32];
        let a = SecretKey::from_seed(&ikm, b"").unwrap();
        assert_eq!(a, SecretKey::from_seed(&ikm, b"").unwrap());
        assert_ne!(a, SecretKey::from_seed(&ikm, b"other purpose").unwrap());
        assert_ne!(a, SecretKey::from_seed(&[8u8; 32], b"").unwrap());
        assert_eq!(
            SecretKey::from_seed(&[7u8; 31], b""),
            Err(ThresholdError::SeedTooShort { length: 31 })
        );
    }

    #[test]
    fn config_drives_split() {
        let sk = SecretKey::generate().unwrap();
        let config = ThresholdConfig::new(3, 4).unwrap();
        let shares = split_with_config(&sk, &config).unwrap();
        assert_eq!(shares.len(), 4);
        assert_eq!(recover_secret(&shares[1..]).unwrap(), sk);
    }
}
