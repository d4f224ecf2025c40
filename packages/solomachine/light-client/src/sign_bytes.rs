//! This module defines the canonical encoder of the solo machine light
//! client: the exact byte strings the signer must sign.
//!
//! The encoding is length-delimited protobuf, so it is deterministic and
//! injective over its typed inputs. The same encoder is used for producing
//! and for verifying signatures; any ambiguity here would be a forgery risk.

use prost::Message;

use crate::signature::PublicKey;

/// The commitment path reserved for header (key rotation) signatures. Folded
/// into the sign bytes so header signatures can never be replayed as
/// membership proofs.
pub const SENTINEL_HEADER_PATH: &str = "solomachine:header";

/// The payload over which a solo machine signature is produced.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct SignBytes {
    /// The sequence the signature is bound to
    #[prost(uint64, tag = "1")]
    pub sequence: u64,
    /// The timestamp declared by the signer
    #[prost(uint64, tag = "2")]
    pub timestamp: u64,
    /// The diversifier of the client instance, preventing cross-client replay
    #[prost(string, tag = "3")]
    pub diversifier: String,
    /// The commitment path being attested
    #[prost(bytes = "vec", tag = "4")]
    pub path: Vec<u8>,
    /// The attested data; empty for non-membership attestations
    #[prost(bytes = "vec", tag = "5")]
    pub data: Vec<u8>,
}

/// The data signed over in a header: the key and diversifier the client
/// rotates to.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct HeaderData {
    /// The canonical byte form of the new public key
    #[prost(bytes = "vec", tag = "1")]
    pub new_public_key: Vec<u8>,
    /// The new diversifier
    #[prost(string, tag = "2")]
    pub new_diversifier: String,
}

/// Encodes the canonical sign bytes for the given tuple.
#[must_use]
pub fn sign_bytes(
    sequence: u64,
    timestamp: u64,
    diversifier: &str,
    path: &[u8],
    data: &[u8],
) -> Vec<u8> {
    SignBytes {
        sequence,
        timestamp,
        diversifier: diversifier.to_string(),
        path: path.to_vec(),
        data: data.to_vec(),
    }
    .encode_to_vec()
}

/// Encodes the header rotation payload carried in the `data` field of header
/// sign bytes.
#[must_use]
pub fn header_data_bytes(new_public_key: &PublicKey, new_diversifier: &str) -> Vec<u8> {
    HeaderData {
        new_public_key: new_public_key.to_canonical_bytes(),
        new_diversifier: new_diversifier.to_string(),
    }
    .encode_to_vec()
}
