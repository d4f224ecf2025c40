//! This module defines [`PublicKey`] and [`verify_signature`], the pluggable
//! signature verification seam of the solo machine light client.

use ed25519_dalek::{Signature as Ed25519Signature, VerifyingKey as Ed25519VerifyingKey};
use k256::ecdsa::{
    signature::Verifier, Signature as Secp256k1Signature, VerifyingKey as Secp256k1VerifyingKey,
};
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};
use solomachine_utils::ensure;

use crate::error::SoloMachineError;

/// Algorithm tag byte for ed25519 keys in the canonical encoding.
const ED25519_TAG: u8 = 1;
/// Algorithm tag byte for secp256k1 keys in the canonical encoding.
const SECP256K1_TAG: u8 = 2;

/// A solo machine verification key, polymorphic over the supported
/// signature algorithms.
#[serde_as]
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PublicKey {
    /// A raw 32-byte ed25519 verification key
    Ed25519(#[serde_as(as = "Base64")] Vec<u8>),
    /// A SEC1-encoded secp256k1 verification key
    Secp256k1(#[serde_as(as = "Base64")] Vec<u8>),
}

impl PublicKey {
    /// Validates the structural well-formedness of the key.
    ///
    /// Only emptiness is checked here; byte-level validity is established by
    /// [`verify_signature`], where malformed keys are ordinary verification
    /// failures.
    ///
    /// # Errors
    /// Returns an error if the key bytes are empty.
    pub fn validate_basic(&self) -> Result<(), SoloMachineError> {
        let (Self::Ed25519(bytes) | Self::Secp256k1(bytes)) = self;
        ensure!(!bytes.is_empty(), SoloMachineError::EmptyPublicKey);
        Ok(())
    }

    /// Returns the canonical byte form of the key: a single algorithm tag
    /// byte followed by the raw key bytes. This form is folded into sign
    /// bytes, so it must be injective across algorithms.
    #[must_use]
    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        let (tag, bytes) = match self {
            Self::Ed25519(bytes) => (ED25519_TAG, bytes),
            Self::Secp256k1(bytes) => (SECP256K1_TAG, bytes),
        };

        let mut canonical = Vec::with_capacity(1 + bytes.len());
        canonical.push(tag);
        canonical.extend_from_slice(bytes);
        canonical
    }

    /// Decodes a key from its canonical byte form.
    ///
    /// # Errors
    /// Returns an error if the bytes are empty or carry an unknown
    /// algorithm tag.
    pub fn from_canonical_bytes(bytes: &[u8]) -> Result<Self, SoloMachineError> {
        let (tag, key_bytes) = bytes
            .split_first()
            .ok_or(SoloMachineError::EmptyPublicKey)?;

        match *tag {
            ED25519_TAG => Ok(Self::Ed25519(key_bytes.to_vec())),
            SECP256K1_TAG => Ok(Self::Secp256k1(key_bytes.to_vec())),
            tag => Err(SoloMachineError::UnsupportedPublicKey { tag }),
        }
    }
}

/// Verifies `signature` over `msg` against `public_key`.
///
/// Fails closed: malformed key or signature bytes are ordinary verification
/// failures, never panics.
///
/// # Errors
/// Returns [`SoloMachineError::SignatureVerification`] if the signature is
/// invalid for the given key and message.
pub fn verify_signature(
    public_key: &PublicKey,
    msg: &[u8],
    signature: &[u8],
) -> Result<(), SoloMachineError> {
    match public_key {
        PublicKey::Ed25519(key_bytes) => {
            let key_bytes: &[u8; 32] = key_bytes
                .as_slice()
                .try_into()
                .map_err(|_| SoloMachineError::SignatureVerification)?;
            let verifying_key = Ed25519VerifyingKey::from_bytes(key_bytes)
                .map_err(|_| SoloMachineError::SignatureVerification)?;

            let signature: &[u8; 64] = signature
                .try_into()
                .map_err(|_| SoloMachineError::SignatureVerification)?;

            verifying_key
                .verify_strict(msg, &Ed25519Signature::from_bytes(signature))
                .map_err(|_| SoloMachineError::SignatureVerification)
        }
        PublicKey::Secp256k1(key_bytes) => {
            let verifying_key = Secp256k1VerifyingKey::from_sec1_bytes(key_bytes)
                .map_err(|_| SoloMachineError::SignatureVerification)?;
            let signature = Secp256k1Signature::from_slice(signature)
                .map_err(|_| SoloMachineError::SignatureVerification)?;

            verifying_key
                .verify(msg, &signature)
                .map_err(|_| SoloMachineError::SignatureVerification)
        }
    }
}
