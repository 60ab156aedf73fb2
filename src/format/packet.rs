//! Packet representation for compressed media data

use crate::util::{Buffer, MediaType, Timestamp};
use std::fmt;

/// A packet of compressed media data
#[derive(Debug, Clone)]
pub struct Packet {
    /// Stream index this packet belongs to
    pub stream_index: usize,

    /// Type of media (video, audio, etc.)
    pub codec_type: MediaType,

    /// Compressed data
    pub data: Buffer,

    /// Presentation timestamp
    pub pts: Timestamp,

    /// Decoding timestamp
    pub dts: Timestamp,

    /// Duration of this packet
    pub duration: i64,

    /// Byte position of the payload in the container (-1 if unknown)
    pub position: i64,
}

impl Packet {
    /// Create a new packet
    pub fn new(stream_index: usize, codec_type: MediaType, data: Buffer) -> Self {
        Packet {
            stream_index,
            codec_type,
            data,
            pts: Timestamp::none(),
            dts: Timestamp::none(),
            duration: 0,
            position: -1,
        }
    }

    /// Create a new video packet
    pub fn new_video(stream_index: usize, data: Buffer) -> Self {
        Packet::new(stream_index, MediaType::Video, data)
    }

    /// Create a new audio packet
    pub fn new_audio(stream_index: usize, data: Buffer) -> Self {
        Packet::new(stream_index, MediaType::Audio, data)
    }

    /// Get the size of the packet data
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Packet(stream={}, type={}, size={}, pts={}, pos={})",
            self.stream_index,
            self.codec_type,
            self.size(),
            self.pts,
            self.position
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_constructors() {
        let video = Packet::new_video(0, Buffer::from_vec(vec![0; 12]));
        assert_eq!(video.codec_type, MediaType::Video);
        assert_eq!(video.size(), 12);
        assert!(!video.pts.is_valid());

        let audio = Packet::new_audio(1, Buffer::empty());
        assert_eq!(audio.stream_index, 1);
        assert_eq!(audio.codec_type, MediaType::Audio);
        assert_eq!(audio.position, -1);
    }

    #[test]
    fn test_packet_display() {
        let packet = Packet::new_audio(1, Buffer::from_vec(vec![0; 8]));
        assert_eq!(
            packet.to_string(),
            "Packet(stream=1, type=audio, size=8, pts=NOPTS, pos=-1)"
        );
    }
}
