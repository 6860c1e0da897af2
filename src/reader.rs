//! The `reader` module implements the read-side operations of §4.F: opening
//! a file, walking its chunk info records, resolving the central directory,
//! and unpacking individual chunks.
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::central_dir::{CentralDirectory, DirEntry};
use crate::chunk::{ChunkInfo, FileHeader, Payload};
use crate::codec;
use crate::crc::compute_crc32;
use crate::errors::RresError;
use crate::types::{CompressionType, EncryptionType, ResourceDataType};

/// A chunk as loaded from disk: its info record and the still-packed bytes
/// that followed it (§3 "Ownership and lifecycle" — the pair is owned
/// together and released together).
#[derive(Debug, Clone)]
pub struct ResourceChunk {
    pub info: ChunkInfo,
    pub data: Vec<u8>,
}

impl ResourceChunk {
    /// Verify the CRC32, then decrypt and decompress in place (§4.F
    /// `unpackChunk`), returning the parsed `(props, raw)` payload.
    pub fn unpack(&self) -> Result<Payload, RresError> {
        if self.info.data_type() == ResourceDataType::Null {
            return Err(RresError::NullResource);
        }
        if compute_crc32(&self.data) != self.info.crc32 {
            log::error!(
                "chunk {:?} (id {}): CRC32 mismatch",
                self.info.chunk_type,
                self.info.chunk_id
            );
            return Err(RresError::CorruptedChunk);
        }

        let comp = CompressionType::from_u8(self.info.compression_type)?;
        let cipher = EncryptionType::from_u8(self.info.cipher_type)?;
        let unpacked = codec::unpack(&self.data, comp, cipher, self.info.base_size as usize)?;
        Payload::deserialize(&unpacked)
    }
}

/// A logical resource spanning multiple chunks linked by `nextOffset`.
#[derive(Debug, Clone)]
pub struct ResourceMulti {
    pub chunks: Vec<ResourceChunk>,
}

/// A handle on an `.rres` file path. Every operation opens its own file
/// handle for the duration of the call; no handle is kept between calls
/// (§3 "Ownership and lifecycle").
#[derive(Debug, Clone)]
pub struct RresFile {
    pub path: PathBuf,
}

impl RresFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RresFile { path: path.into() }
    }

    fn open(&self) -> Result<BufReader<File>, RresError> {
        log::trace!("opening {:?}", self.path);
        Ok(BufReader::new(File::open(&self.path)?))
    }

    /// Validate `packedSize` against what is actually left in the file
    /// before a caller allocates a buffer for it (§4.F: "`packedSize` ≤
    /// remaining file bytes"). Without this, a crafted `packedSize` near
    /// `u32::MAX` would trigger a multi-gigabyte allocation on untrusted
    /// input before `read_exact` ever got a chance to fail.
    fn ensure_packed_size_fits(
        reader: &mut BufReader<File>,
        info: &ChunkInfo,
    ) -> Result<(), RresError> {
        let file_len = reader.get_ref().metadata()?.len();
        let pos = reader.stream_position()?;
        let available = file_len.saturating_sub(pos);
        let needed = info.packed_size as u64;
        if needed > available {
            log::error!(
                "chunk {:?} (id {}): packedSize {needed} exceeds {available} remaining bytes",
                info.chunk_type,
                info.chunk_id
            );
            return Err(RresError::Truncated { needed, available });
        }
        Ok(())
    }

    /// Load and validate just the file header.
    pub fn read_header(&self) -> Result<FileHeader, RresError> {
        let mut reader = self.open()?;
        FileHeader::read_from(&mut reader)
    }

    /// §4.F `loadCentralDirectory`: an absent directory (`cdOffset == 0`) is
    /// not an error, it yields an empty directory.
    pub fn load_central_dir(&self) -> Result<CentralDirectory, RresError> {
        let mut reader = self.open()?;
        let header = FileHeader::read_from(&mut reader)?;
        if header.cd_offset == 0 {
            return Ok(CentralDirectory::new());
        }

        reader.seek(SeekFrom::Start(header.cd_offset as u64))?;
        let info = ChunkInfo::read_from(&mut reader)?;
        if info.data_type() != ResourceDataType::Directory {
            log::warn!(
                "cdOffset {} does not point at a CDIR chunk (found {:?})",
                header.cd_offset,
                info.chunk_type
            );
            return Err(RresError::InvalidCentralDir);
        }

        Self::ensure_packed_size_fits(&mut reader, &info)?;
        let mut data = vec![0u8; info.packed_size as usize];
        reader.read_exact(&mut data)?;
        let chunk = ResourceChunk { info, data };
        let payload = chunk.unpack().map_err(|_| RresError::InvalidCentralDir)?;
        CentralDirectory::from_payload(&payload)
    }

    /// §4.F `loadChunkInfoAll`: every info record in storage order, skipping
    /// over each chunk's packed payload without unpacking it.
    pub fn load_chunk_info_all(&self) -> Result<Vec<ChunkInfo>, RresError> {
        let mut reader = self.open()?;
        let header = FileHeader::read_from(&mut reader)?;

        let mut infos = Vec::with_capacity(header.chunk_count as usize);
        for _ in 0..header.chunk_count {
            let info = ChunkInfo::read_from(&mut reader)?;
            reader.seek(SeekFrom::Current(info.packed_size as i64))?;
            infos.push(info);
        }
        Ok(infos)
    }

    /// §4.F `getChunkInfo`: the info record at a known directory entry's
    /// offset.
    pub fn get_chunk_info(&self, entry: &DirEntry) -> Result<ChunkInfo, RresError> {
        let mut reader = self.open()?;
        reader.seek(SeekFrom::Start(entry.offset as u64))?;
        ChunkInfo::read_from(&mut reader)
    }

    /// §4.F `loadResourceChunk`: the first chunk whose `id` matches,
    /// packed bytes still attached.
    pub fn load_resource_chunk(&self, id: u32) -> Result<ResourceChunk, RresError> {
        let mut reader = self.open()?;
        let header = FileHeader::read_from(&mut reader)?;

        for _ in 0..header.chunk_count {
            let info = ChunkInfo::read_from(&mut reader)?;
            if info.chunk_id == id {
                Self::ensure_packed_size_fits(&mut reader, &info)?;
                let mut data = vec![0u8; info.packed_size as usize];
                reader.read_exact(&mut data)?;
                return Ok(ResourceChunk { info, data });
            }
            reader.seek(SeekFrom::Current(info.packed_size as i64))?;
        }
        Err(RresError::NotFound)
    }

    /// §4.F `loadResourceMulti`: the first chunk and every sibling chained
    /// through `nextOffset`, bounded by `chunkCount` so a corrupt cycle
    /// cannot loop forever.
    pub fn load_resource_multi(&self, id: u32) -> Result<ResourceMulti, RresError> {
        let header = self.read_header()?;
        let first = self.load_resource_chunk(id)?;

        let mut chunks = vec![];
        let mut next_offset = first.info.next_offset;
        chunks.push(first);

        let mut reader = self.open()?;
        let mut hops = 0u32;
        while next_offset != 0 {
            hops += 1;
            if hops > header.chunk_count as u32 {
                return Err(RresError::InvalidCentralDir);
            }
            reader.seek(SeekFrom::Start(next_offset as u64))?;
            let info = ChunkInfo::read_from(&mut reader)?;
            Self::ensure_packed_size_fits(&mut reader, &info)?;
            let mut data = vec![0u8; info.packed_size as usize];
            reader.read_exact(&mut data)?;
            next_offset = info.next_offset;
            chunks.push(ResourceChunk { info, data });
        }

        Ok(ResourceMulti { chunks })
    }

    /// §4.F `getResourceId`: the id bound to `file_name` in `dir`, or 0 if
    /// no entry matches.
    pub fn get_resource_id(&self, dir: &CentralDirectory, file_name: &str) -> u32 {
        dir.get_resource_id(file_name).unwrap_or(0)
    }
}

pub fn exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Payload;
    use crate::writer::{RresWriter, WriteOptions, WriteRequest};

    fn fixture_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("rres_rs-reader-test-{name}-{}", std::process::id()));
        path
    }

    #[test]
    fn round_trips_central_directory_and_lookup() {
        let path = fixture_path("cdir");
        let requests = vec![WriteRequest {
            file_name: "resources/text_data.txt".into(),
            resource_type: *b"TEXT",
            id_override: None,
            payload: Payload::new(vec![29, 1, 0, 0], b"Hello World! This is a test!".to_vec()),
            compression: Some(CompressionType::None),
            cipher: Some(EncryptionType::None),
        }];
        RresWriter::write(&path, &requests, &WriteOptions::default()).unwrap();

        let file = RresFile::new(&path);
        let dir = file.load_central_dir().unwrap();
        assert_eq!(dir.entries.len(), 1);

        let id = file.get_resource_id(&dir, "resources/text_data.txt");
        assert_ne!(id, 0);

        let chunk = file.load_resource_chunk(id).unwrap();
        let payload = chunk.unpack().unwrap();
        assert_eq!(
            String::from_utf8(payload.raw).unwrap(),
            "Hello World! This is a test!"
        );

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_id_is_not_found() {
        let path = fixture_path("missing");
        RresWriter::write(&path, &[], &WriteOptions::default()).unwrap();
        let file = RresFile::new(&path);
        assert!(matches!(
            file.load_resource_chunk(0xDEAD_BEEF),
            Err(RresError::NotFound)
        ));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn empty_file_has_no_central_directory() {
        let path = fixture_path("empty");
        RresWriter::write(
            &path,
            &[],
            &WriteOptions {
                include_directory: false,
                ..WriteOptions::default()
            },
        )
        .unwrap();
        let file = RresFile::new(&path);
        let dir = file.load_central_dir().unwrap();
        assert!(dir.entries.is_empty());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn huge_packed_size_is_rejected_before_allocating() {
        let path = fixture_path("huge-packed-size");
        {
            use std::io::Write;
            let mut buf = Vec::new();
            FileHeader::new(1, 0).write_to(&mut buf).unwrap();
            let info = ChunkInfo {
                chunk_type: *b"RAWD",
                chunk_id: 7,
                compression_type: 0,
                cipher_type: 0,
                flags: 0,
                packed_size: 0xFFFF_FFF0,
                base_size: 0,
                next_offset: 0,
                reserved: 0,
                crc32: 0,
            };
            info.write_to(&mut buf).unwrap();
            let mut f = std::fs::File::create(&path).unwrap();
            f.write_all(&buf).unwrap();
        }

        let file = RresFile::new(&path);
        assert!(matches!(
            file.load_resource_chunk(7),
            Err(RresError::Truncated { needed: 0xFFFF_FFF0, .. })
        ));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn tampered_payload_fails_crc() {
        let path = fixture_path("tamper");
        let requests = vec![WriteRequest {
            file_name: "a.bin".into(),
            resource_type: *b"RAWD",
            id_override: None,
            payload: Payload::new(vec![4], b"data".to_vec()),
            compression: Some(CompressionType::None),
            cipher: Some(EncryptionType::None),
        }];
        RresWriter::write(&path, &requests, &WriteOptions::default()).unwrap();

        {
            use std::io::{Seek, SeekFrom, Write};
            let mut f = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
            // File header (12) + chunk info (32) lands right on the payload's first byte.
            f.seek(SeekFrom::Start(12 + 32)).unwrap();
            f.write_all(&[0xFF]).unwrap();
        }

        let file = RresFile::new(&path);
        let dir = file.load_central_dir().unwrap();
        let id = file.get_resource_id(&dir, "a.bin");
        let chunk = file.load_resource_chunk(id).unwrap();
        assert!(matches!(chunk.unpack(), Err(RresError::CorruptedChunk)));

        std::fs::remove_file(&path).ok();
    }
}
