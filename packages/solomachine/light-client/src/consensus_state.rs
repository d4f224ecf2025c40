//! This module defines [`ConsensusState`].

use serde::{Deserialize, Serialize};
use solomachine_utils::ensure;

use crate::{error::SoloMachineError, signature::PublicKey};

/// The per-sequence snapshot of a solo machine: the key that was authorized
/// at that sequence and the timestamp the signer declared. Created exactly
/// once when a sequence is accepted and never mutated.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct ConsensusState {
    /// The public key authorized at this sequence
    pub public_key: PublicKey,
    /// The timestamp declared by the signer for this sequence
    #[serde(with = "solomachine_utils::serde::number_as_string")]
    pub timestamp: u64,
}

impl ConsensusState {
    /// Validates the structural well-formedness of the consensus state.
    ///
    /// # Errors
    /// Returns an error if the public key is empty or the timestamp is zero.
    pub fn validate_basic(&self) -> Result<(), SoloMachineError> {
        self.public_key.validate_basic()?;
        ensure!(self.timestamp != 0, SoloMachineError::ZeroTimestamp);
        Ok(())
    }
}
