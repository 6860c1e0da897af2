//! Codec pipeline (§4.C): compression and encryption, composed in a fixed
//! order. Packing compresses first, then encrypts the compressed bytes.
//! Unpacking reverses that: decrypt first, then decompress.
pub mod compression;
pub mod encryption;

use crate::errors::RresError;
use crate::types::{CompressionType, EncryptionType};

/// Apply compression then encryption to `data`, producing the bytes that go
/// on disk as a chunk's packed payload.
pub fn pack(
    data: &[u8],
    comp: CompressionType,
    cipher: EncryptionType,
) -> Result<Vec<u8>, RresError> {
    let compressed = compression::get_compressor(comp)?.compress(data)?;
    let packed = encryption::get_cipher(cipher)?.encrypt(&compressed)?;
    Ok(packed)
}

/// Reverse `pack`: decrypt `data`, then decompress the result to exactly
/// `expected_len` bytes (the chunk info record's `baseSize`).
pub fn unpack(
    data: &[u8],
    comp: CompressionType,
    cipher: EncryptionType,
    expected_len: usize,
) -> Result<Vec<u8>, RresError> {
    let decrypted = encryption::get_cipher(cipher)?.decrypt(data)?;
    compression::get_compressor(comp)?.decompress(&decrypted, expected_len)
}
