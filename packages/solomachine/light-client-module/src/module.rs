//! This module defines [`LightClientModule`], the dispatcher translating
//! host calls into light client operations.

use cosmwasm_std::Storage;
use solomachine_light_client::{
    client_state::{ClientState, Status},
    consensus_state::ConsensusState,
    header::ClientMessage,
    height::Height,
    membership, update, verify,
};
use tracing::{debug, warn};

use crate::{
    client_id::validate_client_id,
    state::{get_client_state, get_consensus_state, store_client_state, store_consensus_state},
    ModuleError,
};

/// The solo machine light client module. Stateless: every operation is
/// handed the store for the current transaction and re-reads whatever it
/// needs, so the store is always the single source of truth.
#[derive(Clone, Copy, Debug, Default)]
pub struct LightClientModule;

#[allow(clippy::unused_self, clippy::trivially_copy_pass_by_ref)]
impl LightClientModule {
    /// Initializes a client: validates and persists the initial client state
    /// and its consensus state at the initial sequence. Called once per
    /// client identifier, before any other operation.
    ///
    /// # Errors
    /// Returns an error on an invalid client identifier, undecodable bytes,
    /// or structurally invalid states. Nothing is written on failure.
    pub fn initialize(
        &self,
        storage: &mut dyn Storage,
        client_id: &str,
        client_state_bz: &[u8],
        consensus_state_bz: &[u8],
    ) -> Result<(), ModuleError> {
        validate_client_id(client_id)?;

        let client_state: ClientState =
            serde_json::from_slice(client_state_bz).map_err(ModuleError::DecodeClientStateFailed)?;
        client_state.validate()?;

        let consensus_state: ConsensusState = serde_json::from_slice(consensus_state_bz)
            .map_err(ModuleError::DecodeConsensusStateFailed)?;
        consensus_state.validate_basic()?;

        store_client_state(storage, client_id, &client_state)?;
        store_consensus_state(
            storage,
            client_id,
            &client_state.latest_height(),
            &consensus_state,
        )?;

        debug!(client_id, sequence = client_state.sequence, "initialized solo machine client");
        Ok(())
    }

    /// Verifies a client message (header or misbehaviour) against the stored
    /// client state. Calls to [`Self::check_for_misbehaviour`],
    /// [`Self::update_state`] and [`Self::update_state_on_misbehaviour`]
    /// assume this has succeeded.
    ///
    /// # Errors
    /// Returns an error if the client state is missing or the message fails
    /// verification.
    pub fn verify_client_message(
        &self,
        storage: &dyn Storage,
        client_id: &str,
        message: &ClientMessage,
    ) -> Result<(), ModuleError> {
        validate_client_id(client_id)?;
        let client_state = get_client_state(storage, client_id)?;

        verify::verify_client_message(&client_state, message)?;
        Ok(())
    }

    /// Returns whether a previously verified message constitutes
    /// misbehaviour.
    ///
    /// # Errors
    /// Returns an invariant violation if the client state is missing, since
    /// the caller contractually verified the message against it already.
    pub fn check_for_misbehaviour(
        &self,
        storage: &dyn Storage,
        client_id: &str,
        message: &ClientMessage,
    ) -> Result<bool, ModuleError> {
        Self::expect_client_state(storage, client_id)?;
        Ok(verify::check_for_misbehaviour(message))
    }

    /// Freezes the client in response to verified misbehaviour. Terminal:
    /// the client rejects every subsequent verification and update.
    ///
    /// # Errors
    /// Returns an invariant violation if the client state is missing.
    pub fn update_state_on_misbehaviour(
        &self,
        storage: &mut dyn Storage,
        client_id: &str,
        _message: &ClientMessage,
    ) -> Result<(), ModuleError> {
        let mut client_state = Self::expect_client_state(storage, client_id)?;
        client_state.is_frozen = true;
        store_client_state(storage, client_id, &client_state)?;

        warn!(client_id, "froze solo machine client on misbehaviour");
        Ok(())
    }

    /// Applies a previously verified header: rotates the key and
    /// diversifier, advances the sequence, and stores the new consensus
    /// state. Returns the single newly created height.
    ///
    /// Replays fail at verification because the stored sequence no longer
    /// matches; this operation is therefore not idempotent.
    ///
    /// # Errors
    /// Returns an invariant violation if the client state is missing or the
    /// message is not a header.
    pub fn update_state(
        &self,
        storage: &mut dyn Storage,
        client_id: &str,
        message: &ClientMessage,
    ) -> Result<Vec<Height>, ModuleError> {
        let client_state = Self::expect_client_state(storage, client_id)?;

        let ClientMessage::Header(header) = message else {
            return Err(ModuleError::InvariantViolation(format!(
                "update state for client {client_id} requires a verified header"
            )));
        };

        let (height, new_client_state, new_consensus_state) =
            update::update_client_state(&client_state, header);

        store_client_state(storage, client_id, &new_client_state)?;
        store_consensus_state(storage, client_id, &height, &new_consensus_state)?;

        debug!(client_id, %height, "updated solo machine client");
        Ok(vec![height])
    }

    /// Verifies a signed assertion that `value` exists at `path`.
    ///
    /// The delay period arguments exist for interface parity with
    /// merkle-proof clients and enforce no additional wait here: the
    /// signer's own liveness is the trust assumption, and the signature is
    /// freshly produced per call.
    ///
    /// # Errors
    /// Returns an error if the client is frozen, state is missing, or the
    /// proof fails verification.
    #[allow(clippy::too_many_arguments)]
    pub fn verify_membership(
        &self,
        storage: &dyn Storage,
        client_id: &str,
        height: &Height,
        _delay_time_period: u64,
        _delay_block_period: u64,
        proof: &[u8],
        path: &[u8],
        value: &[u8],
    ) -> Result<(), ModuleError> {
        validate_client_id(client_id)?;
        let client_state = get_client_state(storage, client_id)?;
        let consensus_state = get_consensus_state(storage, client_id, height)?;

        membership::verify_membership(&client_state, &consensus_state, proof, path, value)?;
        Ok(())
    }

    /// Verifies a signed assertion that no value exists at `path`. See
    /// [`Self::verify_membership`] for the delay period arguments.
    ///
    /// # Errors
    /// Returns an error under the same conditions as
    /// [`Self::verify_membership`].
    #[allow(clippy::too_many_arguments)]
    pub fn verify_non_membership(
        &self,
        storage: &dyn Storage,
        client_id: &str,
        height: &Height,
        _delay_time_period: u64,
        _delay_block_period: u64,
        proof: &[u8],
        path: &[u8],
    ) -> Result<(), ModuleError> {
        validate_client_id(client_id)?;
        let client_state = get_client_state(storage, client_id)?;
        let consensus_state = get_consensus_state(storage, client_id, height)?;

        membership::verify_non_membership(&client_state, &consensus_state, proof, path)?;
        Ok(())
    }

    /// Returns the status of the client. Never fails: a bad identifier or
    /// unresolvable state yields [`Status::Unknown`].
    #[must_use]
    pub fn status(&self, storage: &dyn Storage, client_id: &str) -> Status {
        if validate_client_id(client_id).is_err() {
            return Status::Unknown;
        }

        get_client_state(storage, client_id).map_or_else(
            |err| {
                warn!(client_id, %err, "could not resolve client state for status");
                Status::Unknown
            },
            |client_state| client_state.status(),
        )
    }

    /// Returns the timestamp the signer declared at the consensus state
    /// identified by `height`.
    ///
    /// # Errors
    /// Returns an error if the client or consensus state is missing.
    pub fn timestamp_at_height(
        &self,
        storage: &dyn Storage,
        client_id: &str,
        height: &Height,
    ) -> Result<u64, ModuleError> {
        validate_client_id(client_id)?;
        get_client_state(storage, client_id)?;

        let consensus_state = get_consensus_state(storage, client_id, height)?;
        Ok(consensus_state.timestamp)
    }

    /// Loads the client state for operations whose contract guarantees it
    /// exists (the caller verified a message against it in this
    /// transaction). Absence here is a broken invariant, not an input error.
    fn expect_client_state(
        storage: &dyn Storage,
        client_id: &str,
    ) -> Result<ClientState, ModuleError> {
        validate_client_id(client_id).map_err(|err| {
            ModuleError::InvariantViolation(format!(
                "client identifier {client_id} failed validation after a successful verification: {err}"
            ))
        })?;

        get_client_state(storage, client_id).map_err(|err| {
            ModuleError::InvariantViolation(format!(
                "client state for {client_id} must exist after a successful verification: {err}"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::{MemoryStorage, Storage};
    use solomachine_light_client::{
        client_state::Status, error::SoloMachineError, header::ClientMessage, height::Height,
        test_utils::TestSigner,
    };

    use super::LightClientModule;
    use crate::{state::client_state_key, ModuleError};

    const CLIENT_ID: &str = "06-solomachine-0";

    fn initialized_client(
        signer: &TestSigner,
        sequence: u64,
        timestamp: u64,
    ) -> (MemoryStorage, LightClientModule) {
        let mut storage = MemoryStorage::new();
        let module = LightClientModule;

        let client_state_bz = serde_json::to_vec(&signer.client_state(sequence)).unwrap();
        let consensus_state_bz = serde_json::to_vec(&signer.consensus_state(timestamp)).unwrap();

        module
            .initialize(&mut storage, CLIENT_ID, &client_state_bz, &consensus_state_bz)
            .unwrap();

        (storage, module)
    }

    #[test]
    fn test_initialize_then_status_and_timestamp() {
        let signer = TestSigner::new(1, "d");
        let (storage, module) = initialized_client(&signer, 0, 5);

        assert_eq!(module.status(&storage, CLIENT_ID), Status::Active);
        assert_eq!(
            module
                .timestamp_at_height(&storage, CLIENT_ID, &Height::new(0))
                .unwrap(),
            5
        );
    }

    #[test]
    fn test_initialize_rejects_wrong_client_type() {
        let signer = TestSigner::new(1, "d");
        let mut storage = MemoryStorage::new();
        let module = LightClientModule;

        let client_state_bz = serde_json::to_vec(&signer.client_state(0)).unwrap();
        let consensus_state_bz = serde_json::to_vec(&signer.consensus_state(5)).unwrap();

        let err = module
            .initialize(&mut storage, "07-tendermint-0", &client_state_bz, &consensus_state_bz)
            .unwrap_err();
        assert!(matches!(err, ModuleError::InvalidClientType { .. }));
    }

    #[test]
    fn test_initialize_validation_failure_writes_nothing() {
        let signer = TestSigner::new(1, "d");
        let mut storage = MemoryStorage::new();
        let module = LightClientModule;

        let mut client_state = signer.client_state(0);
        client_state.public_key = solomachine_light_client::signature::PublicKey::Ed25519(vec![]);
        let client_state_bz = serde_json::to_vec(&client_state).unwrap();
        let consensus_state_bz = serde_json::to_vec(&signer.consensus_state(5)).unwrap();

        let err = module
            .initialize(&mut storage, CLIENT_ID, &client_state_bz, &consensus_state_bz)
            .unwrap_err();
        assert!(matches!(
            err,
            ModuleError::LightClient(SoloMachineError::EmptyPublicKey)
        ));

        assert!(storage.get(client_state_key(CLIENT_ID).as_bytes()).is_none());
    }

    #[test]
    fn test_header_update_flow() {
        let signer = TestSigner::new(1, "d");
        let next = TestSigner::new(2, "d2");
        let (mut storage, module) = initialized_client(&signer, 0, 5);

        let header = signer.header(&signer.client_state(0), &next, 100);
        let message = ClientMessage::Header(header);

        module
            .verify_client_message(&storage, CLIENT_ID, &message)
            .unwrap();
        assert!(!module
            .check_for_misbehaviour(&storage, CLIENT_ID, &message)
            .unwrap());

        let heights = module.update_state(&mut storage, CLIENT_ID, &message).unwrap();
        assert_eq!(heights, vec![Height::new(1)]);
        assert_eq!(
            module
                .timestamp_at_height(&storage, CLIENT_ID, &Height::new(1))
                .unwrap(),
            100
        );

        // The same header fails against the advanced sequence.
        let err = module
            .verify_client_message(&storage, CLIENT_ID, &message)
            .unwrap_err();
        assert!(matches!(
            err,
            ModuleError::LightClient(SoloMachineError::SequenceMismatch { expected: 1, found: 0 })
        ));
    }

    #[test]
    fn test_misbehaviour_freezes_client() {
        let signer = TestSigner::new(1, "d");
        let (mut storage, module) = initialized_client(&signer, 0, 5);

        let evidence = ClientMessage::Misbehaviour(signer.misbehaviour(
            &signer.client_state(0),
            (b"/a", b"v1", 10),
            (b"/a", b"v2", 10),
        ));

        module
            .verify_client_message(&storage, CLIENT_ID, &evidence)
            .unwrap();
        assert!(module
            .check_for_misbehaviour(&storage, CLIENT_ID, &evidence)
            .unwrap());

        module
            .update_state_on_misbehaviour(&mut storage, CLIENT_ID, &evidence)
            .unwrap();
        assert_eq!(module.status(&storage, CLIENT_ID), Status::Frozen);

        // Frozen clients accept nothing.
        let err = module
            .verify_client_message(&storage, CLIENT_ID, &evidence)
            .unwrap_err();
        assert!(matches!(
            err,
            ModuleError::LightClient(SoloMachineError::FrozenClient)
        ));

        let proof = signer.membership_proof(&signer.client_state(0), 7, b"/a", b"v");
        let err = module
            .verify_membership(&storage, CLIENT_ID, &Height::new(0), 0, 0, &proof, b"/a", b"v")
            .unwrap_err();
        assert!(matches!(
            err,
            ModuleError::LightClient(SoloMachineError::FrozenClient)
        ));
    }

    #[test]
    fn test_membership_flow() {
        let signer = TestSigner::new(1, "d");
        let (storage, module) = initialized_client(&signer, 0, 5);

        let proof = signer.membership_proof(&signer.client_state(0), 7, b"/a", b"v");
        module
            .verify_membership(&storage, CLIENT_ID, &Height::new(0), 0, 0, &proof, b"/a", b"v")
            .unwrap();

        let absence_proof = signer.non_membership_proof(&signer.client_state(0), 7, b"/absent");
        module
            .verify_non_membership(
                &storage,
                CLIENT_ID,
                &Height::new(0),
                0,
                0,
                &absence_proof,
                b"/absent",
            )
            .unwrap();

        // Unknown height has no consensus state.
        let err = module
            .verify_membership(&storage, CLIENT_ID, &Height::new(9), 0, 0, &proof, b"/a", b"v")
            .unwrap_err();
        assert!(matches!(err, ModuleError::ConsensusStateNotFound { .. }));
    }

    #[test]
    fn test_missing_client_state() {
        let signer = TestSigner::new(1, "d");
        let next = TestSigner::new(2, "d2");
        let storage = MemoryStorage::new();
        let module = LightClientModule;

        let message = ClientMessage::Header(signer.header(&signer.client_state(0), &next, 100));

        // Independently callable operations surface an ordinary error.
        let err = module
            .verify_client_message(&storage, CLIENT_ID, &message)
            .unwrap_err();
        assert!(matches!(err, ModuleError::ClientStateNotFound(_)));

        let err = module
            .timestamp_at_height(&storage, CLIENT_ID, &Height::new(0))
            .unwrap_err();
        assert!(matches!(err, ModuleError::ClientStateNotFound(_)));

        assert_eq!(module.status(&storage, CLIENT_ID), Status::Unknown);

        // Post-verification operations treat absence as a broken invariant.
        let err = module
            .check_for_misbehaviour(&storage, CLIENT_ID, &message)
            .unwrap_err();
        assert!(matches!(err, ModuleError::InvariantViolation(_)));
    }

    #[test]
    fn test_update_state_requires_header() {
        let signer = TestSigner::new(1, "d");
        let (mut storage, module) = initialized_client(&signer, 0, 5);

        let evidence = ClientMessage::Misbehaviour(signer.misbehaviour(
            &signer.client_state(0),
            (b"/a", b"v1", 10),
            (b"/a", b"v2", 10),
        ));

        let err = module
            .update_state(&mut storage, CLIENT_ID, &evidence)
            .unwrap_err();
        assert!(matches!(err, ModuleError::InvariantViolation(_)));
    }

    #[test]
    fn test_status_on_bad_identifier() {
        let storage = MemoryStorage::new();
        let module = LightClientModule;
        assert_eq!(module.status(&storage, "definitely-not-valid"), Status::Unknown);
    }
}
