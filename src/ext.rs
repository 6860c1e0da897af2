//! The `ext` module contains extension traits to help read and write RRES
//! files. All multi-byte integers on disk are little-endian regardless of
//! host endianness (§4.A); these traits are the one place that fact is
//! allowed to matter.
use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

pub trait ReadCcFour: Read {
    fn read_cc_four(&mut self) -> io::Result<[u8; 4]> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }
}

impl<R: Read + ?Sized> ReadCcFour for R {}

pub trait WriteCcFour: Write {
    fn write_cc_four(&mut self, tag: &[u8; 4]) -> io::Result<()> {
        self.write_all(tag)
    }
}

impl<W: Write + ?Sized> WriteCcFour for W {}

/// Thin re-export so callers reading/writing header fields spell out
/// `LittleEndian` at the call site without importing `byteorder` themselves.
pub trait ReadLe: Read {
    fn read_u16_le(&mut self) -> io::Result<u16> {
        self.read_u16::<LittleEndian>()
    }
    fn read_u32_le(&mut self) -> io::Result<u32> {
        self.read_u32::<LittleEndian>()
    }
}

impl<R: Read + ?Sized> ReadLe for R {}

pub trait WriteLe: Write {
    fn write_u16_le(&mut self, value: u16) -> io::Result<()> {
        self.write_u16::<LittleEndian>(value)
    }
    fn write_u32_le(&mut self, value: u32) -> io::Result<()> {
        self.write_u32::<LittleEndian>(value)
    }
}

impl<W: Write + ?Sized> WriteLe for W {}
