mod central_dir;
mod chunk;
mod codec;
mod crc;
mod errors;
mod ext;
mod hash;
mod password;
mod reader;
mod types;
mod views;
mod writer;

#[cfg(test)]
mod tests;

pub use central_dir::{CentralDirectory, DirEntry};
pub use chunk::{ChunkInfo, FileHeader, Payload, CHUNK_INFO_SIZE, CURRENT_VERSION, FILE_HEADER_SIZE};
pub use codec::compression::Compressor;
pub use codec::encryption::Cipher;
pub use codec::{pack, unpack};
pub use crc::compute_crc32;
pub use errors::RresError;
pub use ext::{ReadCcFour, ReadLe, WriteCcFour, WriteLe};
pub use hash::resource_id;
pub use password::{cipher_password, clear_cipher_password, set_cipher_password, Passphrase};
pub use reader::{ResourceChunk, ResourceMulti, RresFile};
pub use types::*;
pub use views::{
    font_view, image_view, raw_view, text_view, vertex_view, wave_view, FontView, ImageView,
    RawView, TextView, VertexView, WaveView,
};
pub use writer::{RresWriter, WriteOptions, WriteRequest};
