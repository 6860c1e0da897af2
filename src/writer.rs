//! The `writer` module implements §4.E: streaming a set of resources to an
//! `.rres` file, with a provisional header patched back once final sizes
//! and offsets are known (the same write-then-seek-back-and-patch shape
//! used for archive headers elsewhere in this ecosystem).
use std::fs::{self, File};
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use crate::central_dir::CentralDirectory;
use crate::chunk::{ChunkInfo, FileHeader, Payload};
use crate::codec;
use crate::crc::compute_crc32;
use crate::errors::RresError;
use crate::hash::resource_id;
use crate::password;
use crate::types::{CompressionType, EncryptionType, FourCc, TAG_CDIR};

const MAX_CHUNKS: usize = 65535;
/// Byte offset of `nextOffset` within a 32-byte chunk info record (past
/// `type`, `id`, `compType`, `cipherType`, `flags`, `packedSize`, `baseSize`).
const NEXT_OFFSET_FIELD_OFFSET: u64 = 20;

#[derive(Debug, Clone)]
pub struct WriteOptions {
    pub include_directory: bool,
    pub default_comp: CompressionType,
    pub default_cipher: EncryptionType,
    pub password: Option<Vec<u8>>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            include_directory: true,
            default_comp: CompressionType::None,
            default_cipher: EncryptionType::None,
            password: None,
        }
    }
}

/// One resource to be written. Chunks that share `file_name` (or an
/// explicit `id_override`) are treated as a single logical multi-chunk
/// resource: the writer links them in input order via `nextOffset` and the
/// central directory records only the first chunk's offset.
///
/// `compression`/`cipher` are per-file overrides; `None` falls back to
/// `WriteOptions::default_comp`/`default_cipher` (§6: "Per-file suffix
/// parameters override defaults. Missing fields take defaults.").
#[derive(Debug, Clone)]
pub struct WriteRequest {
    pub file_name: String,
    pub resource_type: FourCc,
    pub id_override: Option<u32>,
    pub payload: Payload,
    pub compression: Option<CompressionType>,
    pub cipher: Option<EncryptionType>,
}

impl WriteRequest {
    fn resolved_id(&self) -> u32 {
        self.id_override.unwrap_or_else(|| resource_id(self.file_name.as_bytes()))
    }

    fn resolved_compression(&self, options: &WriteOptions) -> CompressionType {
        self.compression.unwrap_or(options.default_comp)
    }

    fn resolved_cipher(&self, options: &WriteOptions) -> EncryptionType {
        self.cipher.unwrap_or(options.default_cipher)
    }
}

pub struct RresWriter;

impl RresWriter {
    /// Write `requests` to `path`, truncating any existing file (§4.E).
    pub fn write(
        path: impl AsRef<Path>,
        requests: &[WriteRequest],
        options: &WriteOptions,
    ) -> Result<(), RresError> {
        if requests.len() > MAX_CHUNKS {
            return Err(RresError::TooManyChunks);
        }

        let previous_password = password::cipher_password();
        if let Some(password_bytes) = &options.password {
            password::set_cipher_password(password_bytes.clone());
        }

        let result = Self::write_inner(path.as_ref(), requests, options);

        match &previous_password {
            Some(p) => password::set_cipher_password(p.as_bytes().to_vec()),
            None => password::clear_cipher_password(),
        }

        if result.is_err() {
            let _ = fs::remove_file(path.as_ref());
        }
        result
    }

    fn write_inner(
        path: &Path,
        requests: &[WriteRequest],
        options: &WriteOptions,
    ) -> Result<(), RresError> {
        log::debug!("writing {} chunk(s) to {path:?}", requests.len());
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        FileHeader::new(0, 0).write_to(&mut writer)?;

        let mut offsets = Vec::with_capacity(requests.len());
        let mut ids = Vec::with_capacity(requests.len());
        let mut dir = CentralDirectory::new();
        let mut seen_ids = std::collections::HashSet::new();

        for request in requests {
            let id = request.resolved_id();
            let offset = writer.stream_position()?;
            let compression = request.resolved_compression(options);
            let cipher = request.resolved_cipher(options);

            let serialized = request.payload.serialize();
            let base_size = serialized.len() as u32;
            let packed = codec::pack(&serialized, compression, cipher)?;
            let crc32 = compute_crc32(&packed);

            let info = ChunkInfo {
                chunk_type: request.resource_type,
                chunk_id: id,
                compression_type: compression.as_u8(),
                cipher_type: cipher.as_u8(),
                flags: 0,
                packed_size: packed.len() as u32,
                base_size,
                next_offset: 0,
                reserved: 0,
                crc32,
            };
            info.write_to(&mut writer)?;
            writer.write_all(&packed)?;

            if seen_ids.insert(id) {
                dir.push(request.file_name.clone(), offset as u32);
            }
            offsets.push(offset);
            ids.push(id);
        }

        // Link same-id chunks into multi-chunk resources via `nextOffset`,
        // patching each sibling's info record now that every offset is known.
        let mut groups: std::collections::HashMap<u32, Vec<usize>> = std::collections::HashMap::new();
        for (index, id) in ids.iter().enumerate() {
            groups.entry(*id).or_default().push(index);
        }
        for indices in groups.values() {
            for window in indices.windows(2) {
                let (current, next) = (window[0], window[1]);
                let patch_at = offsets[current] + NEXT_OFFSET_FIELD_OFFSET;
                writer.seek(SeekFrom::Start(patch_at))?;
                writer.write_all(&(offsets[next] as u32).to_le_bytes())?;
            }
        }
        writer.seek(SeekFrom::End(0))?;

        let mut cd_offset = 0u32;
        if options.include_directory {
            cd_offset = writer.stream_position()? as u32;
            let payload = dir.to_payload();
            let serialized = payload.serialize();
            let crc32 = compute_crc32(&serialized);

            let info = ChunkInfo {
                chunk_type: TAG_CDIR,
                chunk_id: 0,
                compression_type: CompressionType::None.as_u8(),
                cipher_type: EncryptionType::None.as_u8(),
                flags: 0,
                packed_size: serialized.len() as u32,
                base_size: serialized.len() as u32,
                next_offset: 0,
                reserved: 0,
                crc32,
            };
            info.write_to(&mut writer)?;
            writer.write_all(&serialized)?;
        }

        let total_chunks = requests.len() + usize::from(options.include_directory);
        if total_chunks > MAX_CHUNKS {
            return Err(RresError::TooManyChunks);
        }

        writer.seek(SeekFrom::Start(4))?;
        writer.write_all(&crate::chunk::CURRENT_VERSION.to_le_bytes())?;
        writer.write_all(&(total_chunks as u16).to_le_bytes())?;
        writer.write_all(&cd_offset.to_le_bytes())?;

        writer.flush()?;
        Ok(())
    }
}
