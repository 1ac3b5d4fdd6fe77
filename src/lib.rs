//! # Threshold BLS signatures over BLS12-381
//!
//! A secret key is split into `n` Shamir shares so that any `t` share-holders
//! can each sign a message independently and a coordinator can combine their
//! partial signatures into one group signature. The group signature is
//! byte-for-byte the signature the full key would have produced, so it
//! verifies against the ordinary group public key.
//!
//! Signatures live in G1 (48 bytes), public keys in G2 (96 bytes).
//! Deployments of threshold BLS over BN254 (drand-style) use a different
//! curve and ciphersuite, so their keys and signatures do not interoperate
//! with this crate.
//!
//! ```
//! use threshold_bls::{aggregate, sign_partial, split, verify, SecretKey};
//!
//! let sk = SecretKey::generate()?;
//! let pk = sk.public_key();
//!
//! let shares = split(&sk, 3, 2)?;
//! let partials = [
//!     sign_partial(&shares[0], b"hello world", None)?,
//!     sign_partial(&shares[2], b"hello world", None)?,
//! ];
//! let sig = aggregate(&partials)?;
//! assert!(verify(&pk, b"hello world", &sig, None));
//!
//! // one partial is not enough
//! let lone = aggregate(&partials[..1])?;
//! assert!(!verify(&pk, b"hello world", &lone, None));
//! # Ok::<(), threshold_bls::ThresholdError>(())
//! ```
//!
//! Aggregation does not know the threshold. Supplying fewer than `t`
//! partials is not an error; the resulting signature simply fails
//! verification.

#![deny(unsafe_code)]

pub mod config;
pub mod curve;
pub mod error;
pub mod hash;
pub mod keygen;
pub mod protocol;
pub mod randutil;
pub mod serde_helpers;
pub mod shamir;
pub mod types;

pub use config::{SigningConfig, ThresholdConfig};
pub use error::{ThresholdError, ThresholdResult};
pub use hash::DEFAULT_DST;
pub use keygen::{
    public_key, public_key_share, public_key_shares, recover_public_key, recover_secret, split,
    split_with_config, split_with_rng,
};
pub use protocol::{aggregate, aggregate_bytes, sign, sign_partial, verify, verify_partial};
pub use types::{
    PartialSignature, PublicKey, PublicKeyInput, PublicKeyShare, SecretKey, SecretKeyInput,
    SecretKeyShare, SecretKeyShareInput, Signature, SignatureInput,
};
