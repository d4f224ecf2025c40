//! This module defines [`SoloMachineError`].

/// Error types for solo machine light client operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum SoloMachineError {
    /// The client is frozen and rejects all verification and updates
    #[error("client is frozen due to misbehaviour")]
    FrozenClient,

    /// The message sequence does not match the stored sequence
    #[error("sequence mismatch, expected {expected} but found {found}")]
    SequenceMismatch {
        /// The sequence currently stored in the client state
        expected: u64,
        /// The sequence carried by the message
        found: u64,
    },

    /// Signature verification failed
    #[error("signature verification failed")]
    SignatureVerification,

    /// Unknown algorithm tag in a canonical public key encoding
    #[error("unsupported public key type (tag {tag})")]
    UnsupportedPublicKey {
        /// The unrecognized algorithm tag byte
        tag: u8,
    },

    /// The public key bytes are empty
    #[error("public key cannot be empty")]
    EmptyPublicKey,

    /// The diversifier is non-empty but contains only whitespace
    #[error("diversifier cannot be blank")]
    InvalidDiversifier,

    /// A timestamp field is zero
    #[error("timestamp cannot be zero")]
    ZeroTimestamp,

    /// A signature field is empty
    #[error("signature cannot be empty")]
    EmptySignature,

    /// The commitment path is empty
    #[error("commitment path cannot be empty")]
    EmptyPath,

    /// The membership value is empty
    #[error("membership value cannot be empty")]
    EmptyValue,

    /// The proof bytes do not decode to timestamped signature data
    #[error("unable to decode signature proof")]
    ProofDecode,

    /// The proof public key does not match the consensus state public key
    #[error("proof public key does not match the consensus state public key")]
    ProofKeyMismatch,

    /// Both misbehaviour payloads are identical, so no conflict is proven
    #[error("misbehaviour signatures sign over identical payloads")]
    MisbehaviourPayloadsMatch,
}
