//! State access for the solo machine light client module.
//!
//! Defines the logical key space of the host store and typed load/store
//! helpers over it. The physical store is the host's concern; every helper
//! goes through the injected [`Storage`] handle.

use cosmwasm_std::Storage;
use solomachine_light_client::{
    client_state::ClientState, consensus_state::ConsensusState, height::Height,
};

use crate::ModuleError;

/// The store key under which the client state is stored.
pub const HOST_CLIENT_STATE_KEY: &str = "clientState";
/// The store key prefix under which consensus states are stored by height.
pub const HOST_CONSENSUS_STATES_KEY: &str = "consensusStates";

/// The key holding the client state of `client_id`.
#[must_use]
pub fn client_state_key(client_id: &str) -> String {
    format!("clients/{client_id}/{HOST_CLIENT_STATE_KEY}")
}

/// The key holding the consensus state of `client_id` at `height`.
#[must_use]
pub fn consensus_state_key(client_id: &str, height: &Height) -> String {
    format!("clients/{client_id}/{HOST_CONSENSUS_STATES_KEY}/{height}")
}

/// Loads the client state for `client_id`.
///
/// # Errors
/// Returns [`ModuleError::ClientStateNotFound`] if absent and a decode error
/// if the stored bytes do not parse; corrupt state is surfaced, never
/// silently defaulted.
pub fn get_client_state(
    storage: &dyn Storage,
    client_id: &str,
) -> Result<ClientState, ModuleError> {
    let bz = storage
        .get(client_state_key(client_id).as_bytes())
        .ok_or_else(|| ModuleError::ClientStateNotFound(client_id.to_string()))?;

    serde_json::from_slice(&bz).map_err(ModuleError::DecodeClientStateFailed)
}

/// Persists the client state for `client_id`.
///
/// # Errors
/// Returns an error if the client state cannot be serialized.
pub fn store_client_state(
    storage: &mut dyn Storage,
    client_id: &str,
    client_state: &ClientState,
) -> Result<(), ModuleError> {
    let bz = serde_json::to_vec(client_state).map_err(ModuleError::SerializeClientStateFailed)?;
    storage.set(client_state_key(client_id).as_bytes(), &bz);
    Ok(())
}

/// Loads the consensus state for `client_id` at `height`.
///
/// # Errors
/// Returns [`ModuleError::ConsensusStateNotFound`] if absent and a decode
/// error if the stored bytes do not parse.
pub fn get_consensus_state(
    storage: &dyn Storage,
    client_id: &str,
    height: &Height,
) -> Result<ConsensusState, ModuleError> {
    let bz = storage
        .get(consensus_state_key(client_id, height).as_bytes())
        .ok_or_else(|| ModuleError::ConsensusStateNotFound {
            client_id: client_id.to_string(),
            height: *height,
        })?;

    serde_json::from_slice(&bz).map_err(ModuleError::DecodeConsensusStateFailed)
}

/// Persists the consensus state for `client_id` at `height`.
///
/// # Errors
/// Returns an error if the consensus state cannot be serialized.
pub fn store_consensus_state(
    storage: &mut dyn Storage,
    client_id: &str,
    height: &Height,
    consensus_state: &ConsensusState,
) -> Result<(), ModuleError> {
    let bz =
        serde_json::to_vec(consensus_state).map_err(ModuleError::SerializeConsensusStateFailed)?;
    storage.set(consensus_state_key(client_id, height).as_bytes(), &bz);
    Ok(())
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::{MemoryStorage, Storage};
    use solomachine_light_client::{height::Height, test_utils::TestSigner};

    use super::{
        client_state_key, consensus_state_key, get_client_state, get_consensus_state,
        store_client_state, store_consensus_state,
    };
    use crate::ModuleError;

    #[test]
    fn test_key_space() {
        assert_eq!(
            client_state_key("06-solomachine-0"),
            "clients/06-solomachine-0/clientState"
        );
        assert_eq!(
            consensus_state_key("06-solomachine-0", &Height::new(3)),
            "clients/06-solomachine-0/consensusStates/0-3"
        );
    }

    #[test]
    fn test_client_state_round_trip() {
        let mut storage = MemoryStorage::new();
        let signer = TestSigner::new(1, "d");
        let client_state = signer.client_state(2);

        store_client_state(&mut storage, "06-solomachine-0", &client_state).unwrap();
        let loaded = get_client_state(&storage, "06-solomachine-0").unwrap();
        assert_eq!(loaded, client_state);

        // Clients do not share store entries.
        let err = get_client_state(&storage, "06-solomachine-1").unwrap_err();
        assert!(matches!(err, ModuleError::ClientStateNotFound(_)));
    }

    #[test]
    fn test_consensus_state_round_trip() {
        let mut storage = MemoryStorage::new();
        let signer = TestSigner::new(1, "d");
        let consensus_state = signer.consensus_state(99);

        store_consensus_state(&mut storage, "06-solomachine-0", &Height::new(2), &consensus_state)
            .unwrap();
        let loaded =
            get_consensus_state(&storage, "06-solomachine-0", &Height::new(2)).unwrap();
        assert_eq!(loaded, consensus_state);

        let err = get_consensus_state(&storage, "06-solomachine-0", &Height::new(3)).unwrap_err();
        assert!(matches!(err, ModuleError::ConsensusStateNotFound { .. }));
    }

    #[test]
    fn test_corrupt_state_is_surfaced() {
        let mut storage = MemoryStorage::new();
        storage.set(client_state_key("06-solomachine-0").as_bytes(), b"garbage");

        let err = get_client_state(&storage, "06-solomachine-0").unwrap_err();
        assert!(matches!(err, ModuleError::DecodeClientStateFailed(_)));
    }
}
