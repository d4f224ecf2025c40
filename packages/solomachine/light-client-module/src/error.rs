use solomachine_light_client::{error::SoloMachineError, height::Height};
use thiserror::Error;

/// Error types for the solo machine light client module surface.
#[derive(Error, Debug)]
pub enum ModuleError {
    /// The client identifier is not of the form `{client-type}-{counter}`
    #[error("invalid client identifier: {0}")]
    InvalidClientIdentifier(String),

    /// The client identifier names a different client kind
    #[error("invalid client type, expected {expected} but found {found}")]
    InvalidClientType {
        /// The client type this module serves
        expected: &'static str,
        /// The client type encoded in the identifier
        found: String,
    },

    /// No client state is stored for the client identifier
    #[error("client state not found for client ID: {0}")]
    ClientStateNotFound(String),

    /// No consensus state is stored at the requested height
    #[error("consensus state not found for client ID {client_id} at height {height}")]
    ConsensusStateNotFound {
        /// The client identifier
        client_id: String,
        /// The requested height
        height: Height,
    },

    /// Stored or supplied client state bytes do not parse
    #[error("decoding client state failed: {0}")]
    DecodeClientStateFailed(#[source] serde_json::Error),

    /// Stored or supplied consensus state bytes do not parse
    #[error("decoding consensus state failed: {0}")]
    DecodeConsensusStateFailed(#[source] serde_json::Error),

    /// Client state could not be serialized for storage
    #[error("serializing client state failed: {0}")]
    SerializeClientStateFailed(#[source] serde_json::Error),

    /// Consensus state could not be serialized for storage
    #[error("serializing consensus state failed: {0}")]
    SerializeConsensusStateFailed(#[source] serde_json::Error),

    /// A validation or verification failure from the light client core
    #[error("light client error: {0}")]
    LightClient(#[from] SoloMachineError),

    /// A precondition the caller was contractually required to establish
    /// does not hold. Not recoverable by retrying: it signals a defect in
    /// the calling sequence, not in the input.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
