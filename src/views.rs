//! Resource views (§4.G): one pure function per type tag, turning a
//! chunk's `(props, raw)` payload into a typed descriptor. These functions
//! do not own the raw buffer — callers pass payloads by reference and take
//! ownership of the pieces they need.
use std::io::Cursor;

use crate::chunk::{ChunkInfo, Payload};
use crate::errors::RresError;
use crate::ext::ReadLe;
use crate::types::{FontGlyphInfo, ResourceDataType, TextEncoding};

fn require_type(info: &ChunkInfo, expected: ResourceDataType) -> Result<(), RresError> {
    if info.data_type() != expected {
        return Err(RresError::WrongType);
    }
    Ok(())
}

fn require_props(payload: &Payload, count: usize) -> Result<(), RresError> {
    if payload.props.len() < count {
        return Err(RresError::MalformedChunk);
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct RawView {
    pub size: u32,
    pub data: Vec<u8>,
}

pub fn raw_view(info: &ChunkInfo, payload: &Payload) -> Result<RawView, RresError> {
    require_type(info, ResourceDataType::Raw)?;
    require_props(payload, 1)?;
    Ok(RawView {
        size: payload.props[0],
        data: payload.raw.clone(),
    })
}

#[derive(Debug, Clone)]
pub struct TextView {
    pub size: u32,
    pub encoding: u32,
    pub code_lang: u32,
    pub culture_code: u32,
    pub text: String,
}

fn decode_text(encoding: u32, raw: &[u8]) -> Result<String, RresError> {
    match encoding {
        e if e == TextEncoding::Utf16Le as u32 || e == TextEncoding::Utf16Be as u32 => {
            if raw.len() % 2 != 0 {
                return Err(RresError::MalformedChunk);
            }
            let units: Vec<u16> = raw
                .chunks_exact(2)
                .map(|pair| {
                    if encoding == TextEncoding::Utf16Be as u32 {
                        u16::from_be_bytes([pair[0], pair[1]])
                    } else {
                        u16::from_le_bytes([pair[0], pair[1]])
                    }
                })
                .collect();
            String::from_utf16(&units).map_err(|_| RresError::MalformedChunk)
        }
        _ => String::from_utf8(raw.to_vec()).map_err(|_| RresError::MalformedChunk),
    }
}

pub fn text_view(info: &ChunkInfo, payload: &Payload) -> Result<TextView, RresError> {
    require_type(info, ResourceDataType::Text)?;
    require_props(payload, 4)?;
    let encoding = payload.props[1];
    Ok(TextView {
        size: payload.props[0],
        encoding,
        code_lang: payload.props[2],
        culture_code: payload.props[3],
        text: decode_text(encoding, &payload.raw)?,
    })
}

#[derive(Debug, Clone)]
pub struct ImageView {
    pub width: u32,
    pub height: u32,
    pub mipmap_count: u32,
    pub format: u32,
    pub pixels: Vec<u8>,
}

pub fn image_view(info: &ChunkInfo, payload: &Payload) -> Result<ImageView, RresError> {
    require_type(info, ResourceDataType::Image)?;
    require_props(payload, 4)?;
    Ok(ImageView {
        width: payload.props[0],
        height: payload.props[1],
        mipmap_count: payload.props[2],
        format: payload.props[3],
        pixels: payload.raw.clone(),
    })
}

#[derive(Debug, Clone)]
pub struct WaveView {
    pub frame_count: u32,
    pub sample_rate: u32,
    pub sample_size: u32,
    pub channel_count: u32,
    pub pcm: Vec<u8>,
}

pub fn wave_view(info: &ChunkInfo, payload: &Payload) -> Result<WaveView, RresError> {
    require_type(info, ResourceDataType::Wave)?;
    require_props(payload, 4)?;
    Ok(WaveView {
        frame_count: payload.props[0],
        sample_rate: payload.props[1],
        sample_size: payload.props[2],
        channel_count: payload.props[3],
        pcm: payload.raw.clone(),
    })
}

#[derive(Debug, Clone)]
pub struct VertexView {
    pub vertex_count: u32,
    pub attribute: u32,
    pub format: u32,
    pub stream: Vec<u8>,
}

pub fn vertex_view(info: &ChunkInfo, payload: &Payload) -> Result<VertexView, RresError> {
    require_type(info, ResourceDataType::Vertex)?;
    require_props(payload, 3)?;
    Ok(VertexView {
        vertex_count: payload.props[0],
        attribute: payload.props[1],
        format: payload.props[2],
        stream: payload.raw.clone(),
    })
}

const FONT_GLYPH_RECORD_SIZE: usize = 32; // 8 i32 fields

#[derive(Debug, Clone)]
pub struct FontView {
    pub base_size: u32,
    pub glyph_count: u32,
    pub glyph_padding: u32,
    pub font_type: u32,
    pub glyphs: Vec<FontGlyphInfo>,
}

pub fn font_view(info: &ChunkInfo, payload: &Payload) -> Result<FontView, RresError> {
    require_type(info, ResourceDataType::FontGlyphs)?;
    require_props(payload, 4)?;

    let glyph_count = payload.props[1];
    let expected_len = glyph_count as usize * FONT_GLYPH_RECORD_SIZE;
    if payload.raw.len() != expected_len {
        return Err(RresError::MalformedChunk);
    }

    let mut cursor = Cursor::new(payload.raw.as_slice());
    let mut glyphs = Vec::with_capacity(glyph_count as usize);
    for _ in 0..glyph_count {
        glyphs.push(FontGlyphInfo {
            x: cursor.read_u32_le()? as i32,
            y: cursor.read_u32_le()? as i32,
            width: cursor.read_u32_le()? as i32,
            height: cursor.read_u32_le()? as i32,
            value: cursor.read_u32_le()? as i32,
            offset_x: cursor.read_u32_le()? as i32,
            offset_y: cursor.read_u32_le()? as i32,
            advance_x: cursor.read_u32_le()? as i32,
        });
    }

    Ok(FontView {
        base_size: payload.props[0],
        glyph_count,
        glyph_padding: payload.props[2],
        font_type: payload.props[3],
        glyphs,
    })
}
