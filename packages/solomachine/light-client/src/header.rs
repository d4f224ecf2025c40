//! This module defines the client messages a solo machine can submit:
//! [`Header`], [`Misbehaviour`] and the [`ClientMessage`] sum type.

use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};
use solomachine_utils::ensure;

use crate::{client_state::validate_diversifier, error::SoloMachineError, signature::PublicKey};

/// A header update: rotates the client to a new public key and diversifier
/// at the exact current sequence.
#[serde_as]
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Header {
    /// The sequence this header is signed at; must equal the stored sequence
    #[serde(with = "solomachine_utils::serde::number_as_string")]
    pub sequence: u64,
    /// The timestamp declared by the signer
    #[serde(with = "solomachine_utils::serde::number_as_string")]
    pub timestamp: u64,
    /// The signature over the header sign bytes, by the current key
    #[serde_as(as = "Base64")]
    pub signature: Vec<u8>,
    /// The public key the client rotates to
    pub new_public_key: PublicKey,
    /// The diversifier the client rotates to
    pub new_diversifier: String,
}

impl Header {
    /// Validates the structural well-formedness of the header.
    ///
    /// # Errors
    /// Returns an error if the timestamp is zero, the signature is empty, or
    /// the new key or diversifier is malformed.
    pub fn validate_basic(&self) -> Result<(), SoloMachineError> {
        ensure!(self.timestamp != 0, SoloMachineError::ZeroTimestamp);
        ensure!(!self.signature.is_empty(), SoloMachineError::EmptySignature);
        self.new_public_key.validate_basic()?;
        validate_diversifier(&self.new_diversifier)
    }
}

/// A signature over a commitment payload, one half of a misbehaviour proof.
#[serde_as]
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct SignatureAndData {
    /// The signature over the sign bytes of `(path, data)`
    #[serde_as(as = "Base64")]
    pub signature: Vec<u8>,
    /// The commitment path signed over
    #[serde_as(as = "Base64")]
    pub path: Vec<u8>,
    /// The data signed over
    #[serde_as(as = "Base64")]
    pub data: Vec<u8>,
    /// The timestamp declared in the signed payload
    #[serde(with = "solomachine_utils::serde::number_as_string")]
    pub timestamp: u64,
}

impl SignatureAndData {
    /// Validates the structural well-formedness of the signed item.
    ///
    /// # Errors
    /// Returns an error if the signature or path is empty or the timestamp
    /// is zero.
    pub fn validate_basic(&self) -> Result<(), SoloMachineError> {
        ensure!(!self.signature.is_empty(), SoloMachineError::EmptySignature);
        ensure!(!self.path.is_empty(), SoloMachineError::EmptyPath);
        ensure!(self.timestamp != 0, SoloMachineError::ZeroTimestamp);
        Ok(())
    }
}

/// Evidence that the signer produced two conflicting signed payloads at the
/// same sequence.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Misbehaviour {
    /// The sequence both conflicting signatures are bound to
    #[serde(with = "solomachine_utils::serde::number_as_string")]
    pub sequence: u64,
    /// The first signed payload
    pub signature_one: SignatureAndData,
    /// The second, conflicting signed payload
    pub signature_two: SignatureAndData,
}

impl Misbehaviour {
    /// Validates the structural well-formedness of the evidence, including
    /// that the two payloads genuinely conflict.
    ///
    /// # Errors
    /// Returns an error if either signed item is malformed or the payloads
    /// are identical.
    pub fn validate_basic(&self) -> Result<(), SoloMachineError> {
        self.signature_one.validate_basic()?;
        self.signature_two.validate_basic()?;

        // Identical payloads prove nothing; the signer is allowed to sign
        // the same statement twice.
        ensure!(
            self.signature_one.path != self.signature_two.path
                || self.signature_one.data != self.signature_two.data,
            SoloMachineError::MisbehaviourPayloadsMatch
        );
        Ok(())
    }
}

/// The messages a solo machine client accepts. Exhaustively matched
/// everywhere, so adding a variant is a compile-time-checked change.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A header update rotating the client key
    Header(Header),
    /// Double-signing evidence
    Misbehaviour(Misbehaviour),
}
