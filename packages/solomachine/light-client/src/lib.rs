#![doc = include_str!("../README.md")]
#![deny(clippy::nursery, clippy::pedantic, warnings, missing_docs)]

pub mod client_state;
pub mod consensus_state;
pub mod error;
pub mod header;
pub mod height;
pub mod membership;
pub mod misbehaviour;
pub mod sign_bytes;
pub mod signature;
pub mod update;
pub mod verify;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
