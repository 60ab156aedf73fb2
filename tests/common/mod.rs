//! Common test utilities for ZMO integration tests
//!
//! Helpers for assembling synthetic MO files byte by byte, so the
//! parser can be exercised independently of the builder.

#![allow(dead_code)]

use zmo_lib::format::mo::MO_MAGIC;
use zmo_lib::format::{AudioInfo, ChannelLayout, CodecId, Stream, VideoInfo};
use zmo_lib::util::Rational;

// ============================================================================
// Header Assembly
// ============================================================================

/// Incrementally assembled MO header
pub struct RawHeader {
    bytes: Vec<u8>,
}

impl RawHeader {
    /// Start a header with the magic and a zero length field
    pub fn new() -> Self {
        let mut bytes = MO_MAGIC.to_vec();
        bytes.extend_from_slice(&0u32.to_le_bytes());
        RawHeader { bytes }
    }

    /// Append a chunk whose payload is the given words
    pub fn chunk(mut self, marker: &[u8; 2], words: &[u32]) -> Self {
        self.bytes.extend_from_slice(marker);
        self.bytes
            .extend_from_slice(&(words.len() as u16).to_le_bytes());
        for word in words {
            self.bytes.extend_from_slice(&word.to_le_bytes());
        }
        self
    }

    /// Append `TL` with a frame-rate denominator and frame count
    pub fn length(self, denominator: u32, frames: u32) -> Self {
        self.chunk(b"TL", &[denominator, frames, 0])
    }

    /// Append `V2` with the picture size
    pub fn video(self, width: u32, height: u32) -> Self {
        self.chunk(b"V2", &[width, height])
    }

    /// Append an audio chunk
    pub fn audio(self, marker: &[u8; 2], sample_rate: u32, channels: u32) -> Self {
        self.chunk(marker, &[sample_rate, channels])
    }

    /// Append the `HE` terminator
    pub fn done(self) -> Self {
        self.chunk(b"HE", &[])
    }

    /// Finish the header, storing its total size in the length field
    pub fn finish(mut self) -> Vec<u8> {
        let len = self.bytes.len() as u32;
        self.bytes[4..8].copy_from_slice(&len.to_le_bytes());
        self.bytes
    }
}

impl Default for RawHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// 256x192 @ 30 fps (7680 / 256) with stereo PCM at 32 kHz
pub fn standard_header(frames: u32) -> Vec<u8> {
    RawHeader::new()
        .length(7680, frames)
        .video(256, 192)
        .audio(b"AP", 32000, 2)
        .done()
        .finish()
}

// ============================================================================
// Packet Assembly
// ============================================================================

/// Append one packet chunk, padded relative to the start of `file`
pub fn push_packet(file: &mut Vec<u8>, video: &[u8], audio: &[u8]) {
    let chunk_size = (8 + video.len() + audio.len()) as u32;
    file.extend_from_slice(&chunk_size.to_le_bytes());
    file.extend_from_slice(&(video.len() as u32).to_le_bytes());
    file.extend_from_slice(video);
    file.extend_from_slice(audio);

    let pos = file.len();
    let padding = (pos + 4 - (pos % 4)) - pos;
    file.extend(std::iter::repeat(0u8).take(padding));
}

/// Deterministic payload of the given size
pub fn payload(size: usize, seed: u8) -> Vec<u8> {
    (0..size)
        .map(|i| seed.wrapping_add((i % 251) as u8))
        .collect()
}

// ============================================================================
// Stream Descriptions
// ============================================================================

pub fn mobiclip_stream(frames: u64) -> Stream {
    Stream::video(
        CodecId::Mobiclip,
        VideoInfo::new(256, 192, Rational::new(30, 1)),
        frames,
    )
}

pub fn pcm_stream(layout: ChannelLayout) -> Stream {
    Stream::audio(CodecId::PcmS16Le, AudioInfo::new(32000, layout))
}
