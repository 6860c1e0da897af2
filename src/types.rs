//! The `types` module contains RRES chunk data and property types.
use crate::errors::RresError;

/// A four-character code: a type tag compared as a whole 32-bit word, never
/// byte-by-byte (`b"TEXT" == b"TEXT"` but never `b"TEXT" == b"text"`).
pub type FourCc = [u8; 4];

pub const TAG_RAWD: FourCc = *b"RAWD";
pub const TAG_TEXT: FourCc = *b"TEXT";
pub const TAG_IMGE: FourCc = *b"IMGE";
pub const TAG_WAVE: FourCc = *b"WAVE";
pub const TAG_VRTX: FourCc = *b"VRTX";
pub const TAG_FNTG: FourCc = *b"FNTG";
pub const TAG_CDIR: FourCc = *b"CDIR";
pub const TAG_MATD: FourCc = *b"MATD";
pub const TAG_MESH: FourCc = *b"MESH";
pub const TAG_MODL: FourCc = *b"MODL";
pub const TAG_LINK: FourCc = *b"LINK";
pub const TAG_NULL: FourCc = *b"NULL";

#[derive(Debug, Clone)]
pub struct FontGlyphInfo {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub value: i32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub advance_x: i32,
}

/// Closed set of resource type tags (§3). `Material`/`Mesh`/`Model`/`Link`
/// are recognized but carry no typed view in this build — chunks using them
/// still round-trip losslessly through the codec.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ResourceDataType {
    Null = 0,
    Raw = 1,
    Text = 2,
    Image = 3,
    Wave = 4,
    Vertex = 5,
    FontGlyphs = 6,
    Material = 7,
    Mesh = 8,
    Model = 9,
    Link = 99,
    Directory = 100,
}

impl From<&FourCc> for ResourceDataType {
    fn from(value: &FourCc) -> Self {
        match value {
            &TAG_NULL => ResourceDataType::Null,
            &TAG_RAWD => ResourceDataType::Raw,
            &TAG_TEXT => ResourceDataType::Text,
            &TAG_IMGE => ResourceDataType::Image,
            &TAG_WAVE => ResourceDataType::Wave,
            &TAG_VRTX => ResourceDataType::Vertex,
            &TAG_FNTG => ResourceDataType::FontGlyphs,
            &TAG_MATD => ResourceDataType::Material,
            &TAG_MESH => ResourceDataType::Mesh,
            &TAG_MODL => ResourceDataType::Model,
            &TAG_LINK => ResourceDataType::Link,
            &TAG_CDIR => ResourceDataType::Directory,
            _ => ResourceDataType::Null,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CompressionType {
    None = 0,
    Rle = 1,
    Deflate = 10,
    Lz4 = 20,
    Lzma2 = 30,
    Bzip2 = 40,
}

impl CompressionType {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Result<Self, RresError> {
        match value {
            0 => Ok(CompressionType::None),
            1 => Ok(CompressionType::Rle),
            10 => Ok(CompressionType::Deflate),
            20 => Ok(CompressionType::Lz4),
            30 => Ok(CompressionType::Lzma2),
            40 => Ok(CompressionType::Bzip2),
            other => Err(RresError::UnsupportedCompression(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EncryptionType {
    None = 0,
    Xor = 1,
    Des = 10,
    Tdes = 11,
    Idea = 20,
    Aes = 30,
    AesGcm = 31,
    Xtea = 40,
    Blowfish = 50,
    Rsa = 60,
    Salsa20 = 70,
    Chacha20 = 71,
    Xchacha20 = 72,
    Xchacha20Poly1305 = 73,
}

impl EncryptionType {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Result<Self, RresError> {
        match value {
            0 => Ok(EncryptionType::None),
            1 => Ok(EncryptionType::Xor),
            10 => Ok(EncryptionType::Des),
            11 => Ok(EncryptionType::Tdes),
            20 => Ok(EncryptionType::Idea),
            30 => Ok(EncryptionType::Aes),
            31 => Ok(EncryptionType::AesGcm),
            40 => Ok(EncryptionType::Xtea),
            50 => Ok(EncryptionType::Blowfish),
            60 => Ok(EncryptionType::Rsa),
            70 => Ok(EncryptionType::Salsa20),
            71 => Ok(EncryptionType::Chacha20),
            72 => Ok(EncryptionType::Xchacha20),
            73 => Ok(EncryptionType::Xchacha20Poly1305),
            other => Err(RresError::UnsupportedCipher(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TextEncoding {
    Undefined = 0,
    Utf8 = 1,
    Utf8Bom = 2,
    Utf16Le = 10,
    Utf16Be = 11,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CodeLang {
    Undefined = 0,
    C,
    Cpp,
    Cs,
    Lua,
    Js,
    Python,
    Rust,
    Zig,
    Odin,
    Jai,
    GdScript,
    Glsl,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PixelFormat {
    Undefined = 0,
    UncompGrayscale = 1,
    UncompGrayAlpha,
    UncompR5G6B5,
    UncompR8G8B8,
    UncompR5G5B5A1,
    UncompR4G4B4A4,
    UncompR8G8B8A8,
    UncompR32,
    UncompR32G32B32,
    UncompR32G32B32A32,
    CompDxt1Rgb,
    CompDxt1Rgba,
    CompDxt3Rgba,
    CompDxt5Rgba,
    CompEtc1Rgb,
    CompEtc2Rgb,
    CompEtc2EacRgba,
    CompPvrtRgb,
    CompPvrtRgba,
    CompAstc4x4Rgba,
    CompAstc8x8Rgba,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum VertexAttribute {
    Position = 0,
    TexCoord1 = 10,
    TexCoord2 = 11,
    TexCoord3 = 12,
    TexCoord4 = 13,
    Normal = 20,
    Tangent = 30,
    Color = 40,
    Index = 100,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum VertexFormat {
    UByte = 0,
    Byte,
    UShort,
    Short,
    UInt,
    Int,
    HFloat,
    Float,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FontStyle {
    Undefined = 0,
    Regular,
    Bold,
    Italic,
}
