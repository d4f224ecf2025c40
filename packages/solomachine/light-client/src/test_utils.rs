//! Deterministic signers and message builders for tests. Gated behind the
//! `test-utils` feature so downstream crates can exercise the full
//! sign-then-verify path without real key management.

use ed25519_dalek::{Signer, SigningKey};

use crate::{
    client_state::ClientState,
    consensus_state::ConsensusState,
    header::{Header, Misbehaviour, SignatureAndData},
    membership::TimestampedSignatureData,
    sign_bytes::{header_data_bytes, sign_bytes, SENTINEL_HEADER_PATH},
    signature::PublicKey,
};

/// A deterministic ed25519 signer acting as a solo machine.
pub struct TestSigner {
    signing_key: SigningKey,
    /// The diversifier this signer operates under
    pub diversifier: String,
}

impl TestSigner {
    /// Creates a signer with a key derived from `seed`.
    #[must_use]
    pub fn new(seed: u8, diversifier: &str) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&[seed; 32]),
            diversifier: diversifier.to_string(),
        }
    }

    /// Returns the signer's public key.
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        PublicKey::Ed25519(self.signing_key.verifying_key().to_bytes().to_vec())
    }

    /// Signs arbitrary bytes.
    #[must_use]
    pub fn sign(&self, msg: &[u8]) -> Vec<u8> {
        self.signing_key.sign(msg).to_bytes().to_vec()
    }

    /// Returns an active client state for this signer at `sequence`.
    #[must_use]
    pub fn client_state(&self, sequence: u64) -> ClientState {
        self.client_state_with_diversifier(sequence, &self.diversifier)
    }

    /// Returns a client state for this signer's key under an arbitrary
    /// diversifier.
    #[must_use]
    pub fn client_state_with_diversifier(&self, sequence: u64, diversifier: &str) -> ClientState {
        ClientState {
            sequence,
            is_frozen: false,
            public_key: self.public_key(),
            diversifier: diversifier.to_string(),
        }
    }

    /// Returns a consensus state snapshot for this signer's key.
    #[must_use]
    pub fn consensus_state(&self, timestamp: u64) -> ConsensusState {
        ConsensusState {
            public_key: self.public_key(),
            timestamp,
        }
    }

    /// Builds a header rotating `client_state` to `next`'s key and
    /// diversifier, signed by this signer at the client state's sequence.
    #[must_use]
    pub fn header(&self, client_state: &ClientState, next: &Self, timestamp: u64) -> Header {
        let data = header_data_bytes(&next.public_key(), &next.diversifier);
        let bytes = sign_bytes(
            client_state.sequence,
            timestamp,
            &client_state.diversifier,
            SENTINEL_HEADER_PATH.as_bytes(),
            &data,
        );

        Header {
            sequence: client_state.sequence,
            timestamp,
            signature: self.sign(&bytes),
            new_public_key: next.public_key(),
            new_diversifier: next.diversifier.clone(),
        }
    }

    /// Builds a signed commitment item at the client state's sequence.
    #[must_use]
    pub fn signature_and_data(
        &self,
        client_state: &ClientState,
        path: &[u8],
        data: &[u8],
        timestamp: u64,
    ) -> SignatureAndData {
        let bytes = sign_bytes(
            client_state.sequence,
            timestamp,
            &client_state.diversifier,
            path,
            data,
        );

        SignatureAndData {
            signature: self.sign(&bytes),
            path: path.to_vec(),
            data: data.to_vec(),
            timestamp,
        }
    }

    /// Builds double-signing evidence from two `(path, data, timestamp)`
    /// payloads signed at the client state's sequence.
    #[must_use]
    pub fn misbehaviour(
        &self,
        client_state: &ClientState,
        one: (&[u8], &[u8], u64),
        two: (&[u8], &[u8], u64),
    ) -> Misbehaviour {
        Misbehaviour {
            sequence: client_state.sequence,
            signature_one: self.signature_and_data(client_state, one.0, one.1, one.2),
            signature_two: self.signature_and_data(client_state, two.0, two.1, two.2),
        }
    }

    /// Builds a JSON-encoded membership proof for `value` at `path`.
    #[must_use]
    pub fn membership_proof(
        &self,
        client_state: &ClientState,
        timestamp: u64,
        path: &[u8],
        value: &[u8],
    ) -> Vec<u8> {
        self.commitment_proof(client_state, timestamp, path, value)
    }

    /// Builds a JSON-encoded non-membership proof for `path`.
    #[must_use]
    pub fn non_membership_proof(
        &self,
        client_state: &ClientState,
        timestamp: u64,
        path: &[u8],
    ) -> Vec<u8> {
        self.commitment_proof(client_state, timestamp, path, &[])
    }

    fn commitment_proof(
        &self,
        client_state: &ClientState,
        timestamp: u64,
        path: &[u8],
        data: &[u8],
    ) -> Vec<u8> {
        let bytes = sign_bytes(
            client_state.sequence,
            timestamp,
            &client_state.diversifier,
            path,
            data,
        );

        let proof = TimestampedSignatureData {
            signature: self.sign(&bytes),
            timestamp,
            public_key: self.public_key(),
        };

        serde_json::to_vec(&proof).expect("serializing a proof cannot fail")
    }
}
