//! Protobuf decoding of a single profile record

use crate::error::Result;
use crate::proto::{Message, Profile};

/// Decode `data` as one binary-encoded [`Profile`].
///
/// All or nothing: malformed tags, truncated fields or bad wire types fail
/// the whole record. Unknown fields are skipped per protobuf rules.
pub fn decode_profile(data: &[u8]) -> Result<Profile> {
    Ok(Profile::decode(data)?)
}
