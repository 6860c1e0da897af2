//! The `chunk` module holds the fixed-size chunk info record (§3 "Chunk
//! info record") and the payload serializer (§4.D) that splits a chunk's
//! unpacked bytes into `propCount`/`props`/`raw`.
use std::io::{Cursor, Read, Write};

use crate::errors::RresError;
use crate::ext::{ReadCcFour, ReadLe, WriteCcFour, WriteLe};
use crate::types::{FourCc, ResourceDataType};

/// The 32-byte record that precedes every chunk's packed payload.
#[derive(Debug, Clone, Copy)]
pub struct ChunkInfo {
    pub chunk_type: FourCc,
    pub chunk_id: u32,
    pub compression_type: u8,
    pub cipher_type: u8,
    pub flags: u16,
    /// On-disk size of the payload following this record.
    pub packed_size: u32,
    /// Size of the payload once fully unpacked (decrypted and decompressed).
    pub base_size: u32,
    /// Absolute file offset of the next chunk of a multi-chunk resource, or
    /// 0 if this is the resource's only (or last) chunk.
    pub next_offset: u32,
    pub reserved: u32,
    /// CRC32 of the on-disk packed payload bytes.
    pub crc32: u32,
}

pub const CHUNK_INFO_SIZE: u32 = 32;

/// The 12-byte record at the start of every `.rres` file (§3 "File header").
///
/// The original format carries no reserved field here (unlike the chunk
/// info record, which does) — `id` + `version` + `chunkCount` + `cdOffset`
/// account for the full 12 bytes.
#[derive(Debug, Clone, Copy)]
pub struct FileHeader {
    pub id: FourCc,
    pub version: u16,
    pub chunk_count: u16,
    pub cd_offset: u32,
}

pub const FILE_HEADER_SIZE: u32 = 12;
pub const CURRENT_VERSION: u16 = 100;
const MAGIC_LOWER: FourCc = *b"rres";
const MAGIC_UPPER_LEGACY: FourCc = *b"rRES";

impl FileHeader {
    pub fn new(chunk_count: u16, cd_offset: u32) -> Self {
        FileHeader {
            id: MAGIC_LOWER,
            version: CURRENT_VERSION,
            chunk_count,
            cd_offset,
        }
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<FileHeader, RresError> {
        let id = reader.read_cc_four()?;
        if id != MAGIC_LOWER && id != MAGIC_UPPER_LEGACY {
            log::error!("bad file magic: {id:?}");
            return Err(RresError::BadMagic);
        }
        let version = reader.read_u16_le()?;
        let chunk_count = reader.read_u16_le()?;
        let cd_offset = reader.read_u32_le()?;

        if version != CURRENT_VERSION {
            log::warn!("unsupported file version: {version}");
            return Err(RresError::UnsupportedVersion(version));
        }

        Ok(FileHeader {
            id,
            version,
            chunk_count,
            cd_offset,
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), RresError> {
        writer.write_cc_four(&self.id)?;
        writer.write_u16_le(self.version)?;
        writer.write_u16_le(self.chunk_count)?;
        writer.write_u32_le(self.cd_offset)?;
        Ok(())
    }
}

impl ChunkInfo {
    pub fn data_type(&self) -> ResourceDataType {
        ResourceDataType::from(&self.chunk_type)
    }

    pub fn is_packed(&self) -> bool {
        self.compression_type != 0 || self.cipher_type != 0
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<ChunkInfo, RresError> {
        let chunk_type = reader.read_cc_four()?;
        let chunk_id = reader.read_u32_le()?;
        let compression_type = {
            let mut b = [0u8; 1];
            reader.read_exact(&mut b)?;
            b[0]
        };
        let cipher_type = {
            let mut b = [0u8; 1];
            reader.read_exact(&mut b)?;
            b[0]
        };
        let flags = reader.read_u16_le()?;
        let packed_size = reader.read_u32_le()?;
        let base_size = reader.read_u32_le()?;
        let next_offset = reader.read_u32_le()?;
        let reserved = reader.read_u32_le()?;
        let crc32 = reader.read_u32_le()?;

        Ok(ChunkInfo {
            chunk_type,
            chunk_id,
            compression_type,
            cipher_type,
            flags,
            packed_size,
            base_size,
            next_offset,
            reserved,
            crc32,
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), RresError> {
        writer.write_cc_four(&self.chunk_type)?;
        writer.write_u32_le(self.chunk_id)?;
        writer.write_all(&[self.compression_type])?;
        writer.write_all(&[self.cipher_type])?;
        writer.write_u16_le(self.flags)?;
        writer.write_u32_le(self.packed_size)?;
        writer.write_u32_le(self.base_size)?;
        writer.write_u32_le(self.next_offset)?;
        writer.write_u32_le(self.reserved)?;
        writer.write_u32_le(self.crc32)?;
        Ok(())
    }
}

/// A chunk's unpacked payload: a fixed-schema `props` prefix (interpretation
/// depends on the chunk's type tag) followed by variable-length `raw` bytes.
#[derive(Debug, Clone, Default)]
pub struct Payload {
    pub props: Vec<u32>,
    pub raw: Vec<u8>,
}

impl Payload {
    pub fn new(props: Vec<u32>, raw: Vec<u8>) -> Self {
        Payload { props, raw }
    }

    /// `propCount` (u32 LE) + `props` (u32 LE each) + `raw`.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.props.len() * 4 + self.raw.len());
        out.extend_from_slice(&(self.props.len() as u32).to_le_bytes());
        for prop in &self.props {
            out.extend_from_slice(&prop.to_le_bytes());
        }
        out.extend_from_slice(&self.raw);
        out
    }

    /// Parse an unpacked chunk payload. `4 * (1 + propCount)` must not
    /// exceed `data.len()`, or the chunk is malformed (§4.D).
    pub fn deserialize(data: &[u8]) -> Result<Payload, RresError> {
        let mut cursor = Cursor::new(data);
        let prop_count = cursor.read_u32_le()?;

        let header_len = 4u64
            .checked_add(4u64.saturating_mul(prop_count as u64))
            .ok_or(RresError::MalformedChunk)?;
        if header_len > data.len() as u64 {
            return Err(RresError::MalformedChunk);
        }

        let mut props = Vec::with_capacity(prop_count as usize);
        for _ in 0..prop_count {
            props.push(cursor.read_u32_le()?);
        }

        let mut raw = Vec::new();
        cursor.read_to_end(&mut raw)?;

        Ok(Payload { props, raw })
    }
}
