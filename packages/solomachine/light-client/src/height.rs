//! This module defines [`Height`].

use serde::{Deserialize, Serialize};

/// An IBC height. Solo machines have no revisions; the revision number is
/// always zero and the revision height carries the sequence.
#[derive(
    Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default,
)]
pub struct Height {
    /// The revision number, always zero for solo machines
    #[serde(with = "solomachine_utils::serde::number_as_string")]
    pub revision_number: u64,
    /// The revision height, the solo machine sequence
    #[serde(with = "solomachine_utils::serde::number_as_string")]
    pub revision_height: u64,
}

impl Height {
    /// Returns the height corresponding to a solo machine sequence.
    #[must_use]
    pub const fn new(sequence: u64) -> Self {
        Self {
            revision_number: 0,
            revision_height: sequence,
        }
    }

    /// Returns the sequence encoded by this height.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.revision_height
    }
}

impl core::fmt::Display for Height {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-{}", self.revision_number, self.revision_height)
    }
}
