//! This module defines [`ClientState`] and [`Status`].

use serde::{Deserialize, Serialize};
use solomachine_utils::ensure;

use crate::{error::SoloMachineError, height::Height, signature::PublicKey};

/// The durable record of a tracked solo machine signer.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct ClientState {
    /// The next sequence a signed message must use; advances only through
    /// verified header updates
    #[serde(with = "solomachine_utils::serde::number_as_string")]
    pub sequence: u64,
    /// Whether the client is frozen due to proven misbehaviour. Terminal:
    /// only ever transitions false to true
    pub is_frozen: bool,
    /// The currently authorized verification key
    pub public_key: PublicKey,
    /// The diversifier namespacing this client's signatures
    pub diversifier: String,
}

impl ClientState {
    /// Validates the structural well-formedness of the client state.
    ///
    /// # Errors
    /// Returns an error if the public key is empty or the diversifier is
    /// non-empty but blank.
    pub fn validate(&self) -> Result<(), SoloMachineError> {
        self.public_key.validate_basic()?;
        validate_diversifier(&self.diversifier)
    }

    /// Returns the status of the client.
    #[must_use]
    pub const fn status(&self) -> Status {
        if self.is_frozen {
            Status::Frozen
        } else {
            Status::Active
        }
    }

    /// Returns the latest height of the client, carrying its sequence.
    #[must_use]
    pub const fn latest_height(&self) -> Height {
        Height::new(self.sequence)
    }
}

/// Validates a diversifier string: it may be empty, but a non-empty
/// diversifier must contain a non-whitespace character.
///
/// # Errors
/// Returns an error if the diversifier is non-empty but blank.
pub fn validate_diversifier(diversifier: &str) -> Result<(), SoloMachineError> {
    ensure!(
        diversifier.is_empty() || !diversifier.trim().is_empty(),
        SoloMachineError::InvalidDiversifier
    );
    Ok(())
}

/// The status of a solo machine client. There is no `Expired`: solo machines
/// have no trusting period.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    /// The client accepts updates and verification queries
    Active,
    /// The client is permanently frozen due to misbehaviour
    Frozen,
    /// The client state could not be resolved
    Unknown,
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Frozen => write!(f, "Frozen"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}
