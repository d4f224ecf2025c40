//! This module provides [`verify_membership`] and [`verify_non_membership`]:
//! signed assertions that a value does or does not exist at a path, in lieu
//! of merkle inclusion proofs.

use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};
use solomachine_utils::ensure;

use crate::{
    client_state::ClientState,
    consensus_state::ConsensusState,
    error::SoloMachineError,
    sign_bytes::sign_bytes,
    signature::{verify_signature, PublicKey},
};

/// The evidence accompanying a membership or non-membership query: a plain
/// signature, not a merkle path. JSON-encoded on the wire.
#[serde_as]
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct TimestampedSignatureData {
    /// The signature over the commitment sign bytes
    #[serde_as(as = "Base64")]
    pub signature: Vec<u8>,
    /// The timestamp the signer declared when producing the proof
    #[serde(with = "solomachine_utils::serde::number_as_string")]
    pub timestamp: u64,
    /// The key the proof claims to be signed with; must match the consensus
    /// state key at the queried height
    pub public_key: PublicKey,
}

/// Verifies a signed assertion that `value` exists at `path`.
///
/// The sign bytes are recomputed over the *current* client sequence, so a
/// proof produced before an update can never be replayed after it.
///
/// # Errors
/// Returns an error if the client is frozen, the proof does not decode, the
/// proof key does not match the consensus state, or the signature is invalid.
pub fn verify_membership(
    client_state: &ClientState,
    consensus_state: &ConsensusState,
    proof: &[u8],
    path: &[u8],
    value: &[u8],
) -> Result<(), SoloMachineError> {
    ensure!(!value.is_empty(), SoloMachineError::EmptyValue);
    verify_signed_commitment(client_state, consensus_state, proof, path, value)
}

/// Verifies a signed assertion that *no* value exists at `path`. The signer
/// must explicitly attest absence; a solo machine has no merkle structure to
/// derive absence from.
///
/// # Errors
/// Returns an error under the same conditions as [`verify_membership`].
pub fn verify_non_membership(
    client_state: &ClientState,
    consensus_state: &ConsensusState,
    proof: &[u8],
    path: &[u8],
) -> Result<(), SoloMachineError> {
    // Absence is encoded as empty data in the sign bytes, which membership
    // proofs can never produce (their value must be non-empty).
    verify_signed_commitment(client_state, consensus_state, proof, path, &[])
}

fn verify_signed_commitment(
    client_state: &ClientState,
    consensus_state: &ConsensusState,
    proof: &[u8],
    path: &[u8],
    data: &[u8],
) -> Result<(), SoloMachineError> {
    ensure!(!client_state.is_frozen, SoloMachineError::FrozenClient);
    ensure!(!path.is_empty(), SoloMachineError::EmptyPath);

    let proof: TimestampedSignatureData =
        serde_json::from_slice(proof).map_err(|_| SoloMachineError::ProofDecode)?;

    ensure!(
        proof.public_key == consensus_state.public_key,
        SoloMachineError::ProofKeyMismatch
    );

    let commitment_sign_bytes = sign_bytes(
        client_state.sequence,
        proof.timestamp,
        &client_state.diversifier,
        path,
        data,
    );

    verify_signature(&proof.public_key, &commitment_sign_bytes, &proof.signature)
}
