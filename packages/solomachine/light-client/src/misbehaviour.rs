//! This module provides [`verify_misbehaviour`].

use solomachine_utils::ensure;

use crate::{
    client_state::ClientState,
    error::SoloMachineError,
    header::{Misbehaviour, SignatureAndData},
    sign_bytes::sign_bytes,
    signature::verify_signature,
};

/// Verifies double-signing evidence: both signed payloads must independently
/// verify against the current public key at the evidence sequence, and must
/// genuinely conflict.
///
/// # Errors
/// Returns an error if the client is frozen, either signature is invalid, or
/// the payloads do not conflict.
pub fn verify_misbehaviour(
    client_state: &ClientState,
    misbehaviour: &Misbehaviour,
) -> Result<(), SoloMachineError> {
    ensure!(!client_state.is_frozen, SoloMachineError::FrozenClient);
    misbehaviour.validate_basic()?;

    verify_signature_and_data(client_state, misbehaviour.sequence, &misbehaviour.signature_one)?;
    verify_signature_and_data(client_state, misbehaviour.sequence, &misbehaviour.signature_two)
}

fn verify_signature_and_data(
    client_state: &ClientState,
    sequence: u64,
    signature_and_data: &SignatureAndData,
) -> Result<(), SoloMachineError> {
    let bytes = sign_bytes(
        sequence,
        signature_and_data.timestamp,
        &client_state.diversifier,
        &signature_and_data.path,
        &signature_and_data.data,
    );

    verify_signature(&client_state.public_key, &bytes, &signature_and_data.signature)
}

#[cfg(test)]
mod tests {
    use super::verify_misbehaviour;
    use crate::{error::SoloMachineError, test_utils::TestSigner};

    #[test]
    fn test_conflicting_payloads_verify() {
        let signer = TestSigner::new(1, "diversifier-1");
        let client_state = signer.client_state(4);

        let evidence = signer.misbehaviour(&client_state, (b"/a", b"v1", 10), (b"/a", b"v2", 10));
        verify_misbehaviour(&client_state, &evidence).unwrap();
    }

    #[test]
    fn test_identical_payloads_rejected() {
        let signer = TestSigner::new(1, "diversifier-1");
        let client_state = signer.client_state(4);

        let evidence = signer.misbehaviour(&client_state, (b"/a", b"v1", 10), (b"/a", b"v1", 10));
        assert_eq!(
            verify_misbehaviour(&client_state, &evidence),
            Err(SoloMachineError::MisbehaviourPayloadsMatch)
        );
    }

    #[test]
    fn test_invalid_signature_rejected() {
        let signer = TestSigner::new(1, "diversifier-1");
        let client_state = signer.client_state(4);

        let mut evidence =
            signer.misbehaviour(&client_state, (b"/a", b"v1", 10), (b"/a", b"v2", 10));
        evidence.signature_two.signature[0] ^= 1;

        assert_eq!(
            verify_misbehaviour(&client_state, &evidence),
            Err(SoloMachineError::SignatureVerification)
        );
    }

    #[test]
    fn test_evidence_signed_by_unauthorized_key_rejected() {
        let signer = TestSigner::new(1, "diversifier-1");
        let imposter = TestSigner::new(2, "diversifier-1");
        let client_state = signer.client_state(4);

        let evidence = imposter.misbehaviour(
            &imposter.client_state(4),
            (b"/a", b"v1", 10),
            (b"/a", b"v2", 10),
        );
        assert_eq!(
            verify_misbehaviour(&client_state, &evidence),
            Err(SoloMachineError::SignatureVerification)
        );
    }

    #[test]
    fn test_frozen_client_rejects_evidence() {
        let signer = TestSigner::new(1, "diversifier-1");
        let mut client_state = signer.client_state(4);

        let evidence = signer.misbehaviour(&client_state, (b"/a", b"v1", 10), (b"/a", b"v2", 10));
        client_state.is_frozen = true;

        assert_eq!(
            verify_misbehaviour(&client_state, &evidence),
            Err(SoloMachineError::FrozenClient)
        );
    }
}
