//! The central directory (§3 "Central directory entry", §4.F) maps resource
//! names to resource ids and their first chunk's offset. It is itself
//! stored as an ordinary `CDIR`-tagged chunk whose payload raw bytes this
//! module serializes and parses.
use std::io::{Cursor, Read};

use crate::chunk::Payload;
use crate::errors::RresError;
use crate::ext::ReadLe;
use crate::hash::resource_id;

#[derive(Debug, Clone)]
pub struct DirEntry {
    pub id: u32,
    pub offset: u32,
    pub file_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct CentralDirectory {
    pub entries: Vec<DirEntry>,
}

impl CentralDirectory {
    pub fn new() -> Self {
        CentralDirectory { entries: Vec::new() }
    }

    pub fn push(&mut self, file_name: impl Into<String>, offset: u32) -> u32 {
        let file_name = file_name.into();
        let id = resource_id(file_name.as_bytes());
        self.entries.push(DirEntry { id, offset, file_name });
        id
    }

    pub fn get_resource_id(&self, file_name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.file_name == file_name)
            .map(|entry| entry.id)
    }

    pub fn get_offset(&self, id: u32) -> Option<u32> {
        self.entries.iter().find(|entry| entry.id == id).map(|e| e.offset)
    }

    /// Pack entries into a `CDIR` chunk's unpacked payload: `props = [count]`,
    /// `raw` = concatenated `(id, offset, nameLen, name\0)` tuples.
    pub fn to_payload(&self) -> Payload {
        let mut raw = Vec::new();
        for entry in &self.entries {
            let name_bytes = entry.file_name.as_bytes();
            raw.extend_from_slice(&entry.id.to_le_bytes());
            raw.extend_from_slice(&entry.offset.to_le_bytes());
            raw.extend_from_slice(&((name_bytes.len() + 1) as u32).to_le_bytes());
            raw.extend_from_slice(name_bytes);
            raw.push(0);
        }
        Payload::new(vec![self.entries.len() as u32], raw)
    }

    pub fn from_payload(payload: &Payload) -> Result<CentralDirectory, RresError> {
        let count = *payload.props.first().ok_or(RresError::InvalidCentralDir)? as usize;
        let mut cursor = Cursor::new(payload.raw.as_slice());
        let mut entries = Vec::with_capacity(count);

        for _ in 0..count {
            let id = cursor.read_u32_le().map_err(|_| RresError::InvalidCentralDir)?;
            let offset = cursor.read_u32_le().map_err(|_| RresError::InvalidCentralDir)?;
            let name_len = cursor.read_u32_le().map_err(|_| RresError::InvalidCentralDir)? as usize;

            if name_len == 0 {
                return Err(RresError::InvalidCentralDir);
            }
            let mut name_bytes = vec![0u8; name_len];
            cursor
                .read_exact(&mut name_bytes)
                .map_err(|_| RresError::InvalidCentralDir)?;
            if name_bytes.pop() != Some(0) {
                return Err(RresError::InvalidCentralDir);
            }
            let file_name = String::from_utf8(name_bytes).map_err(|_| RresError::InvalidCentralDir)?;

            entries.push(DirEntry { id, offset, file_name });
        }

        Ok(CentralDirectory { entries })
    }
}
