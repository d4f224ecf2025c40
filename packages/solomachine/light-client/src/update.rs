//! This module provides [`update_client_state`], the sole path by which a
//! solo machine sequence advances.

use crate::{
    client_state::ClientState, consensus_state::ConsensusState, header::Header, height::Height,
};

/// Takes the current client state and a verified header and returns the
/// advanced client state, the consensus snapshot to store at the new
/// sequence, and the single newly created height.
///
/// Assumes the header has already passed [`crate::verify::verify_header`].
#[allow(clippy::module_name_repetitions)]
#[must_use = "the current client state is not updated in place, but a new one is returned"]
pub fn update_client_state(
    client_state: &ClientState,
    header: &Header,
) -> (Height, ClientState, ConsensusState) {
    let mut new_client_state = client_state.clone();
    new_client_state.sequence += 1;
    new_client_state.public_key = header.new_public_key.clone();
    new_client_state.diversifier = header.new_diversifier.clone();

    let new_consensus_state = ConsensusState {
        public_key: header.new_public_key.clone(),
        timestamp: header.timestamp,
    };

    (
        new_client_state.latest_height(),
        new_client_state,
        new_consensus_state,
    )
}
