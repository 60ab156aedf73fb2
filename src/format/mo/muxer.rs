//! MO muxer implementation

use super::builder::HeaderBuilder;
use super::{alignment_padding, FORMAT_NAME, PACKET_PREFIX_SIZE};
use crate::error::{Error, Result};
use crate::format::{Muxer, MuxerContext, Packet, Stream};
use crate::util::{Buffer, MediaType};
use byteorder::{LittleEndian, WriteBytesExt};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// MO muxer.
///
/// Video packets are held until the matching audio packet arrives, then
/// both are written as one packet chunk.
pub struct MoMuxer<W: Write> {
    writer: W,
    context: MuxerContext,
    pending_video: Option<Buffer>,
    bytes_written: u64,
    chunks_written: u64,
}

impl MoMuxer<BufWriter<File>> {
    /// Create an MO file for writing
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref()).map_err(|e| {
            Error::format(format!(
                "Failed to create MO file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Ok(MoMuxer::new(BufWriter::new(file)))
    }
}

impl<W: Write> MoMuxer<W> {
    /// Create a new MO muxer
    pub fn new(writer: W) -> Self {
        MoMuxer {
            writer,
            context: MuxerContext::new(FORMAT_NAME.to_string()),
            pending_video: None,
            bytes_written: 0,
            chunks_written: 0,
        }
    }

    /// Bytes written so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Packet chunks written so far
    pub fn chunks_written(&self) -> u64 {
        self.chunks_written
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn stream_type(&self, index: usize) -> Result<MediaType> {
        self.context
            .streams()
            .get(index)
            .map(|s| s.media_type())
            .ok_or_else(|| Error::invalid_input(format!("No stream with index {}", index)))
    }

    fn write_chunk(&mut self, video: &[u8], audio: &[u8]) -> Result<()> {
        let chunk_size = u32::try_from(video.len() + audio.len())
            .ok()
            .and_then(|s| s.checked_add(PACKET_PREFIX_SIZE))
            .ok_or_else(|| Error::invalid_input("Packet chunk larger than 4 GiB"))?;

        self.writer.write_u32::<LittleEndian>(chunk_size)?;
        self.writer.write_u32::<LittleEndian>(video.len() as u32)?;
        self.writer.write_all(video)?;
        self.writer.write_all(audio)?;

        let payload_end = self.bytes_written + chunk_size as u64;
        let padding = alignment_padding(payload_end);
        self.writer.write_all(&[0u8; 4][..padding as usize])?;

        self.bytes_written = payload_end + padding;
        self.chunks_written += 1;
        Ok(())
    }
}

impl<W: Write> Muxer for MoMuxer<W> {
    fn add_stream(&mut self, stream: Stream) -> Result<usize> {
        if self.context.is_header_written() {
            return Err(Error::invalid_state("Header already written"));
        }
        Ok(self.context.add_stream(stream))
    }

    fn write_header(&mut self) -> Result<()> {
        if self.context.is_header_written() {
            return Err(Error::invalid_state("Header already written"));
        }

        let header = HeaderBuilder::new(self.context.streams())?.build()?;
        self.writer.write_all(&header)?;
        self.bytes_written = header.len() as u64;

        self.context.set_header_written();
        Ok(())
    }

    fn write_packet(&mut self, packet: &Packet) -> Result<()> {
        if !self.context.is_header_written() {
            return Err(Error::invalid_state("Header not written"));
        }

        match self.stream_type(packet.stream_index)? {
            MediaType::Video => {
                if self.pending_video.is_some() {
                    return Err(Error::invalid_state(
                        "Video packet written before the previous one was paired with audio",
                    ));
                }
                self.pending_video = Some(packet.data.clone());
            }
            MediaType::Audio => {
                let video = self.pending_video.take().ok_or_else(|| {
                    Error::invalid_state("Audio packet written without a preceding video packet")
                })?;
                self.write_chunk(video.as_slice(), packet.data.as_slice())?;
            }
            MediaType::Unknown => {
                return Err(Error::invalid_input("Packet for a stream of unknown type"));
            }
        }

        Ok(())
    }

    fn write_trailer(&mut self) -> Result<()> {
        if !self.context.is_header_written() {
            return Err(Error::invalid_state("Header not written"));
        }

        if let Some(video) = self.pending_video.take() {
            self.write_chunk(video.as_slice(), &[])?;
        }
        self.writer.flush()?;

        debug!(
            "MO trailer written: {} packet chunks, {} bytes",
            self.chunks_written, self.bytes_written
        );
        Ok(())
    }
}
