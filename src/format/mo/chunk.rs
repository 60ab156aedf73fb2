//! Tag-length-value chunk framing for the MO header
//!
//! Each chunk starts with a two byte marker and a little-endian `u16`
//! holding the payload length in 4-byte words. Payloads are not
//! interpreted here.

use super::Marker;
use crate::error::Result;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Size of a chunk header on the wire
pub const CHUNK_HEADER_SIZE: u64 = 4;

/// Chunk header (2 byte marker + 2 byte word count)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub marker: Marker,
    /// Payload length in bytes (word count × 4)
    pub length: u32,
}

impl ChunkHeader {
    /// Create a chunk header from a word count
    pub fn new(marker: Marker, word_count: u16) -> Self {
        ChunkHeader {
            marker,
            length: word_count as u32 * 4,
        }
    }

    /// Read a chunk header
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut tag = [0u8; 2];
        reader.read_exact(&mut tag)?;
        let marker = Marker::from_bytes(tag);
        let word_count = reader.read_u16::<LittleEndian>()?;
        Ok(ChunkHeader::new(marker, word_count))
    }

    /// Write a chunk header.
    ///
    /// The caller must follow it with exactly `word_count * 4` payload bytes.
    pub fn write<W: Write>(writer: &mut W, marker: Marker, word_count: u16) -> Result<()> {
        writer.write_u16::<LittleEndian>(marker.into())?;
        writer.write_u16::<LittleEndian>(word_count)?;
        Ok(())
    }

    /// Whether a payload starting at `payload_start` stays inside `extent`
    pub fn fits_within(&self, payload_start: u64, extent: u64) -> bool {
        payload_start + self.length as u64 <= extent
    }
}
