//! This module provides [`verify_client_message`] and
//! [`check_for_misbehaviour`].

use solomachine_utils::ensure;

use crate::{
    client_state::ClientState,
    error::SoloMachineError,
    header::{ClientMessage, Header},
    misbehaviour::verify_misbehaviour,
    sign_bytes::{header_data_bytes, sign_bytes, SENTINEL_HEADER_PATH},
    signature::verify_signature,
};

/// Verifies a client message against the current client state.
///
/// A frozen client rejects every message. Calls to [`check_for_misbehaviour`]
/// and the state update functions assume this verification has succeeded.
///
/// # Errors
/// Returns an error if the message fails verification.
pub fn verify_client_message(
    client_state: &ClientState,
    message: &ClientMessage,
) -> Result<(), SoloMachineError> {
    match message {
        ClientMessage::Header(header) => verify_header(client_state, header),
        ClientMessage::Misbehaviour(misbehaviour) => {
            verify_misbehaviour(client_state, misbehaviour)
        }
    }
}

/// Verifies a header update: the header must be signed by the *current* key,
/// over the current diversifier, at exactly the stored sequence. Solo machine
/// updates are sequential, never skip-ahead.
///
/// # Errors
/// Returns an error if the client is frozen, the sequence does not match, or
/// the signature is invalid.
pub fn verify_header(client_state: &ClientState, header: &Header) -> Result<(), SoloMachineError> {
    ensure!(!client_state.is_frozen, SoloMachineError::FrozenClient);
    header.validate_basic()?;
    ensure!(
        header.sequence == client_state.sequence,
        SoloMachineError::SequenceMismatch {
            expected: client_state.sequence,
            found: header.sequence,
        }
    );

    let data = header_data_bytes(&header.new_public_key, &header.new_diversifier);
    let header_sign_bytes = sign_bytes(
        header.sequence,
        header.timestamp,
        &client_state.diversifier,
        SENTINEL_HEADER_PATH.as_bytes(),
        &data,
    );

    verify_signature(
        &client_state.public_key,
        &header_sign_bytes,
        &header.signature,
    )
}

/// Returns whether a previously verified client message constitutes
/// misbehaviour. Only the explicit [`ClientMessage::Misbehaviour`] variant
/// does; a header on its own never freezes the client.
#[must_use]
pub const fn check_for_misbehaviour(message: &ClientMessage) -> bool {
    matches!(message, ClientMessage::Misbehaviour(_))
}
