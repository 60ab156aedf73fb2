//! MO header construction
//!
//! The whole header is staged in memory so the length field can be
//! filled in before anything reaches the output. Only a MobiClip video
//! stream paired with a PCM audio stream can be written.

use super::chunk::ChunkHeader;
use super::header::FRAME_RATE_SCALE;
use super::{Marker, MO_MAGIC};
use crate::error::{Error, Result};
use crate::format::{AudioInfo, CodecId, Stream, VideoInfo};
use crate::util::{MediaType, Rational};
use byteorder::{LittleEndian, WriteBytesExt};
use bytes::Bytes;
use tracing::debug;

/// Signature chunk payload.
///
/// Players expect a `pc` chunk of this size; the bytes are not a
/// signature over the file being written.
pub const SIGNATURE_BLOB: [u8; 160] = [
    0x2B, 0x8F, 0x50, 0x80, 0xE3, 0x23, 0x38, 0xCE, 0x86, 0x70, 0xDD, 0xA6, 0xE0, 0x19,
    0xE3, 0xBB, 0xC5, 0xDB, 0xE6, 0x12, 0x55, 0x06, 0x7A, 0x46, 0x1F, 0xEE, 0xD5, 0xBE,
    0x40, 0x41, 0xBB, 0x60, 0x71, 0x50, 0xD6, 0x1D, 0x1D, 0x8B, 0xD5, 0xDB, 0xF2, 0x2C,
    0x19, 0x73, 0xDA, 0x60, 0xAC, 0xF0, 0xF4, 0xD2, 0x68, 0xBF, 0x47, 0x21, 0x7B, 0x92,
    0x66, 0x1E, 0xDD, 0x31, 0x59, 0x6D, 0xFA, 0x9F, 0xF7, 0x6A, 0x6B, 0xC5, 0x5E, 0x2B,
    0xF9, 0x78, 0xB3, 0x7B, 0x3A, 0xA6, 0x65, 0x87, 0x16, 0x05, 0x38, 0xC6, 0x2B, 0x29,
    0x27, 0xA9, 0x42, 0xC0, 0x0E, 0x1B, 0x96, 0xF3, 0xD3, 0xC5, 0x21, 0xF4, 0xBD, 0x0E,
    0x7B, 0xB3, 0xCF, 0x00, 0x90, 0xEE, 0xA4, 0xA4, 0x85, 0xDC, 0xEB, 0x0F, 0xF2, 0x40,
    0xC8, 0xD1, 0x46, 0x85, 0x55, 0x0F, 0xC5, 0x71, 0xE6, 0xF7, 0xE3, 0xD5, 0x45, 0x46,
    0xA4, 0xC6, 0xE3, 0xCC, 0xBD, 0xD4, 0x85, 0x7F, 0xBA, 0x1B, 0xA0, 0x9C, 0x0D, 0xE3,
    0x19, 0x70, 0x63, 0x26, 0x45, 0xA7, 0x12, 0xAC, 0xD3, 0x1E, 0x95, 0x0A, 0xD4, 0x46,
    0x72, 0x7B, 0xAD, 0xF6, 0xEB, 0xE3,
];

/// Word after the frame count in the `TL` chunk; meaning unknown
pub const LENGTH_RESERVED: u32 = 0;

/// Size of every header this builder produces:
/// preamble 8, `TL` 16, `V2` 12, `pc` 164, `AP` 12, `HE` 4
pub const HEADER_SIZE: usize = 216;

/// Value written to the `TL` chunk for `frame_rate`.
///
/// The numerator is scaled and stored where the reader expects the
/// denominator of its `256 / x` time base.
pub fn stored_rate(frame_rate: Rational) -> Result<u32> {
    frame_rate
        .num
        .checked_mul(FRAME_RATE_SCALE)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| Error::invalid_input(format!("Frame rate {} cannot be stored", frame_rate)))
}

/// Frame rate to hand the builder for a demuxed `256 / den` time base.
///
/// Only denominators that are multiples of 256 come back unchanged
/// through [`stored_rate`].
pub fn frame_rate_for_time_base(time_base: Rational) -> Rational {
    Rational::new(time_base.den, time_base.num)
}

/// Builds the header for one MobiClip video stream and one PCM audio stream
#[derive(Debug)]
pub struct HeaderBuilder<'a> {
    video: &'a VideoInfo,
    audio: &'a AudioInfo,
    frame_count: u32,
}

impl<'a> HeaderBuilder<'a> {
    /// Validate the stream configuration.
    ///
    /// Fails with `Error::Unsupported` unless there is exactly one
    /// MobiClip video stream and one PCM audio stream.
    pub fn new(streams: &'a [Stream]) -> Result<Self> {
        if streams.len() != 2 {
            return Err(Error::unsupported(format!(
                "Two streams - one video, one audio - are required, got {}",
                streams.len()
            )));
        }

        let video = streams
            .iter()
            .find(|s| s.media_type() == MediaType::Video)
            .ok_or_else(|| Error::unsupported("A video stream is required"))?;
        let audio = streams
            .iter()
            .find(|s| s.media_type() == MediaType::Audio)
            .ok_or_else(|| Error::unsupported("An audio stream is required"))?;

        if video.info.codec_id != CodecId::Mobiclip {
            return Err(Error::unsupported(format!(
                "Only MobiClip is supported for video, got {}",
                video.info.codec_id
            )));
        }
        if audio.info.codec_id != CodecId::PcmS16Le {
            return Err(Error::unsupported(format!(
                "Only PCM is currently supported for audio, got {}",
                audio.info.codec_id
            )));
        }

        let video_info = video
            .info
            .video_info
            .as_ref()
            .ok_or_else(|| Error::invalid_input("Video stream missing video info"))?;
        let audio_info = audio
            .info
            .audio_info
            .as_ref()
            .ok_or_else(|| Error::invalid_input("Audio stream missing audio info"))?;

        let frame_count = u32::try_from(video.info.nb_frames.unwrap_or(0))
            .map_err(|_| Error::invalid_input("Frame count does not fit in 32 bits"))?;

        Ok(HeaderBuilder {
            video: video_info,
            audio: audio_info,
            frame_count,
        })
    }

    /// Emit the complete header with its length field filled in
    pub fn build(&self) -> Result<Bytes> {
        let scaled_rate = stored_rate(self.video.frame_rate)?;

        let mut out = Vec::with_capacity(HEADER_SIZE);
        out.extend_from_slice(MO_MAGIC);
        out.write_u32::<LittleEndian>(0)?;

        ChunkHeader::write(&mut out, Marker::Length, 3)?;
        out.write_u32::<LittleEndian>(scaled_rate)?;
        out.write_u32::<LittleEndian>(self.frame_count)?;
        out.write_u32::<LittleEndian>(LENGTH_RESERVED)?;

        ChunkHeader::write(&mut out, Marker::Video, 2)?;
        out.write_u32::<LittleEndian>(self.video.width)?;
        out.write_u32::<LittleEndian>(self.video.height)?;

        ChunkHeader::write(&mut out, Marker::Signature, (SIGNATURE_BLOB.len() / 4) as u16)?;
        out.extend_from_slice(&SIGNATURE_BLOB);

        ChunkHeader::write(&mut out, Marker::Pcm, 2)?;
        out.write_u32::<LittleEndian>(self.audio.sample_rate)?;
        out.write_u32::<LittleEndian>(self.audio.channels() as u32)?;

        ChunkHeader::write(&mut out, Marker::HeaderDone, 0)?;

        let header_length = out.len() as u32;
        out[4..8].copy_from_slice(&header_length.to_le_bytes());

        debug!(
            "Built MO header: {} bytes, {}x{}, {} frames",
            header_length, self.video.width, self.video.height, self.frame_count
        );

        Ok(Bytes::from(out))
    }
}
