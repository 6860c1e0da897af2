//! Compression algorithms dispatched by their on-disk tag (§4.C). Modeled
//! as a small closed trait object set rather than an open plugin registry,
//! per §9's design note — the supported set is a compile-time capability,
//! not something a caller can register into at runtime.
use std::io::{Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::errors::RresError;
use crate::types::CompressionType;

pub trait Compressor: Send + Sync {
    /// Compress `data`, returning the bytes to place on disk.
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, RresError>;
    /// Decompress `data`, which is known to expand to exactly
    /// `expected_len` bytes (`baseSize` from the chunk info record).
    fn decompress(&self, data: &[u8], expected_len: usize) -> Result<Vec<u8>, RresError>;
}

struct NoneCompressor;

impl Compressor for NoneCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, RresError> {
        Ok(data.to_vec())
    }

    fn decompress(&self, data: &[u8], expected_len: usize) -> Result<Vec<u8>, RresError> {
        if data.len() != expected_len {
            return Err(RresError::SizeMismatch);
        }
        Ok(data.to_vec())
    }
}

/// Raw DEFLATE, no zlib wrapper, per §4.C.
struct DeflateCompressor;

impl Compressor for DeflateCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, RresError> {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(data)
            .map_err(|_| RresError::DecompressionFailed)?;
        encoder.finish().map_err(|_| RresError::DecompressionFailed)
    }

    fn decompress(&self, data: &[u8], expected_len: usize) -> Result<Vec<u8>, RresError> {
        let mut decoder = DeflateDecoder::new(data);
        let mut out = Vec::with_capacity(expected_len);
        decoder
            .read_to_end(&mut out)
            .map_err(|_| RresError::DecompressionFailed)?;
        Ok(out)
    }
}

struct Lz4Compressor;

impl Compressor for Lz4Compressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, RresError> {
        Ok(lz4_flex::block::compress_prepend_size(data))
    }

    fn decompress(&self, data: &[u8], expected_len: usize) -> Result<Vec<u8>, RresError> {
        let out = lz4_flex::block::decompress_size_prepended(data)
            .map_err(|_| RresError::DecompressionFailed)?;
        if out.len() != expected_len {
            return Err(RresError::SizeMismatch);
        }
        Ok(out)
    }
}

pub fn get_compressor(kind: CompressionType) -> Result<Box<dyn Compressor>, RresError> {
    match kind {
        CompressionType::None => Ok(Box::new(NoneCompressor)),
        CompressionType::Deflate => Ok(Box::new(DeflateCompressor)),
        CompressionType::Lz4 => Ok(Box::new(Lz4Compressor)),
        CompressionType::Rle | CompressionType::Lzma2 | CompressionType::Bzip2 => {
            log::warn!("unsupported compression tag: {}", kind.as_u8());
            Err(RresError::UnsupportedCompression(kind.as_u8()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_round_trips() {
        let c = get_compressor(CompressionType::None).unwrap();
        let data = b"hello world".to_vec();
        let packed = c.compress(&data).unwrap();
        assert_eq!(c.decompress(&packed, data.len()).unwrap(), data);
    }

    #[test]
    fn deflate_round_trips_and_shrinks_redundant_data() {
        let c = get_compressor(CompressionType::Deflate).unwrap();
        let data = vec![0x42u8; 4096];
        let packed = c.compress(&data).unwrap();
        assert!(packed.len() < data.len());
        assert_eq!(c.decompress(&packed, data.len()).unwrap(), data);
    }

    #[test]
    fn lz4_round_trips() {
        let c = get_compressor(CompressionType::Lz4).unwrap();
        let data = b"abababababababababababababab".to_vec();
        let packed = c.compress(&data).unwrap();
        assert_eq!(c.decompress(&packed, data.len()).unwrap(), data);
    }

    #[test]
    fn unsupported_tag_is_rejected() {
        assert!(matches!(
            get_compressor(CompressionType::Lzma2),
            Err(RresError::UnsupportedCompression(30))
        ));
    }
}
