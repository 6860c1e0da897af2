use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;

/// Error taxonomy for every fallible rres operation (§7).
///
/// Kept as a hand-written enum (rather than a generic `Box<dyn Error>`)
/// because callers are expected to match on the kind: an authenticated
/// cipher failure and a truncated file both "fail to load", but a caller
/// retrying with a different password only cares about the former.
#[derive(Debug, Clone)]
pub enum RresError {
    /// Underlying file open/read/write/seek failure.
    Io(String),
    /// File header `id` field matched neither `rres` nor `rRES`.
    BadMagic,
    /// File header version is not understood by this build.
    UnsupportedVersion(u16),
    /// Write input exceeds 65535 chunks.
    TooManyChunks,
    /// Requested resource id is absent from the file.
    NotFound,
    /// CRC32 mismatch on the on-disk packed bytes.
    CorruptedChunk,
    /// A chunk info record's `packedSize` claims more bytes than remain in
    /// the file; refused before allocating a buffer for them.
    Truncated { needed: u64, available: u64 },
    /// Decoded payload length did not equal the recorded `baseSize`.
    SizeMismatch,
    /// `propCount` overflows the declared payload buffer.
    MalformedChunk,
    /// Compression tag value is not handled by this build.
    UnsupportedCompression(u8),
    /// Cipher tag value is not handled by this build.
    UnsupportedCipher(u8),
    /// The compression codec rejected the packed bytes.
    DecompressionFailed,
    /// The cipher rejected the packed bytes (includes AEAD tag failure).
    DecryptionFailed,
    /// A resource-view function was called against the wrong type tag.
    WrongType,
    /// A cipher was required but the process-wide password store is empty.
    NoPassword,
    /// A chunk claims no data at all (empty `RAWD`-shaped payload where one was required).
    NullResource,
    /// Central directory offset does not point at a `CDIR` chunk.
    InvalidCentralDir,
}

impl Display for RresError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RresError::Io(msg) => write!(f, "RRES: I/O error: {msg}"),
            RresError::BadMagic => write!(f, "RRES: File is not an rres file!"),
            RresError::UnsupportedVersion(v) => {
                write!(f, "RRES: Unsupported file version: {v}")
            }
            RresError::TooManyChunks => {
                write!(f, "RRES: Too many chunks to write (limit is 65535)")
            }
            RresError::NotFound => write!(f, "RRES: Chunk not found in file!"),
            RresError::CorruptedChunk => {
                write!(f, "RRES: CRC32 does not match. Data was unable to be loaded!")
            }
            RresError::Truncated { needed, available } => write!(
                f,
                "RRES: chunk claims {needed} packed bytes but only {available} remain in file"
            ),
            RresError::SizeMismatch => {
                write!(f, "RRES: Decoded payload size does not match baseSize")
            }
            RresError::MalformedChunk => {
                write!(f, "RRES: Chunk propCount overflows declared payload size")
            }
            RresError::UnsupportedCompression(t) => {
                write!(f, "RRES: Unsupported compression type: {t}")
            }
            RresError::UnsupportedCipher(t) => write!(f, "RRES: Unsupported cipher type: {t}"),
            RresError::DecompressionFailed => write!(f, "RRES: Decompression failed"),
            RresError::DecryptionFailed => write!(f, "RRES: Decryption failed"),
            RresError::WrongType => write!(f, "RRES: Resource view called with the wrong type tag"),
            RresError::NoPassword => {
                write!(f, "RRES: Cipher required but no password has been set")
            }
            RresError::NullResource => write!(f, "RRES: Chunk contains no data!"),
            RresError::InvalidCentralDir => write!(
                f,
                "RRES: Central directory chunk byte offset does not point to a central directory chunk!"
            ),
        }
    }
}

impl Error for RresError {}

impl From<io::Error> for RresError {
    fn from(err: io::Error) -> Self {
        RresError::Io(err.to_string())
    }
}
