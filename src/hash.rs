//! The `hash` module computes the default resource identifier for a file
//! name (§4.B).
//!
//! The source this format comes from uses two different name-hashing
//! strategies in different call sites (a CRC32 and a `h = h*31 + b`
//! polynomial hash). This build commits to CRC32, since cross-tool
//! interoperability with the reference packer depends on it (§9 Open
//! Questions).
use crate::crc::compute_crc32;

/// Default resource id for `name`: `CRC32(name)`. Empty names hash to a
/// fixed but nonzero value, same as any other CRC32 input.
pub fn resource_id(name: &[u8]) -> u32 {
    compute_crc32(name)
}
