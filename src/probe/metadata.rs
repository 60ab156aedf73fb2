//! Media Metadata Structures
//!
//! Serializable description of a probed file, in the spirit of
//! FFprobe's output.

use crate::format::mo::ChunkHeader;
use crate::format::Stream;
use crate::util::MediaType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Complete media file metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaMetadata {
    /// File path
    pub file_path: String,
    /// File size in bytes
    pub file_size: u64,
    /// Container format information
    pub format: ContainerFormat,
    /// Detection score (0 when the format was not recognised)
    pub probe_score: u32,
    /// Streams declared by the header
    pub streams: Vec<StreamMetadata>,
    /// Header chunks in file order
    pub chunks: Vec<ChunkMetadata>,
    /// Total duration in seconds
    pub duration: f64,
}

impl MediaMetadata {
    /// Convert to JSON string
    pub fn to_json(&self) -> crate::error::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::error::Error::format(format!("JSON serialization failed: {}", e)))
    }
}

impl fmt::Display for MediaMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input #0, {} from '{}':", self.format.name, self.file_path)?;
        writeln!(f, "  File Size: {} bytes", self.file_size)?;

        if self.duration > 0.0 {
            let minutes = (self.duration / 60.0) as u32;
            let seconds = self.duration % 60.0;
            writeln!(f, "  Duration: {:02}:{:05.2}", minutes, seconds)?;
        }

        for stream in &self.streams {
            writeln!(f, "  Stream #{}: {}", stream.index, stream)?;
        }

        if !self.chunks.is_empty() {
            write!(f, "  Header chunks:")?;
            for chunk in &self.chunks {
                write!(f, " {}({})", chunk.marker, chunk.length)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Container format information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerFormat {
    /// Format name
    pub name: String,
    /// Long format name
    pub long_name: String,
    /// File extensions
    pub extensions: Vec<String>,
}

/// Stream type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    Video,
    Audio,
    Unknown,
}

impl From<MediaType> for StreamType {
    fn from(media_type: MediaType) -> Self {
        match media_type {
            MediaType::Video => StreamType::Video,
            MediaType::Audio => StreamType::Audio,
            MediaType::Unknown => StreamType::Unknown,
        }
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamType::Video => write!(f, "Video"),
            StreamType::Audio => write!(f, "Audio"),
            StreamType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Metadata for one stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamMetadata {
    pub index: usize,
    pub stream_type: StreamType,
    pub codec: String,
    pub time_base: String,
    /// Duration in frames
    pub duration: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_layout: Option<String>,
}

impl From<&Stream> for StreamMetadata {
    fn from(stream: &Stream) -> Self {
        let info = &stream.info;
        let video = info.video_info.as_ref();
        let audio = info.audio_info.as_ref();

        StreamMetadata {
            index: info.index,
            stream_type: info.media_type.into(),
            codec: info.codec_id.to_string(),
            time_base: info.time_base.to_string(),
            duration: info.duration,
            width: video.map(|v| v.width),
            height: video.map(|v| v.height),
            frame_rate: video.map(|_| info.time_base.invert().to_f64()),
            sample_rate: audio.map(|a| a.sample_rate),
            channel_layout: audio.map(|a| a.channel_layout.to_string()),
        }
    }
}

impl fmt::Display for StreamMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.stream_type, self.codec)?;
        if let (Some(w), Some(h)) = (self.width, self.height) {
            write!(f, ", {}x{}", w, h)?;
        }
        if let Some(fps) = self.frame_rate {
            write!(f, ", {:.2} fps", fps)?;
        }
        if let Some(rate) = self.sample_rate {
            write!(f, ", {} Hz", rate)?;
        }
        if let Some(ref layout) = self.channel_layout {
            write!(f, ", {}", layout)?;
        }
        Ok(())
    }
}

/// One header chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub marker: String,
    /// Payload length in bytes
    pub length: u32,
}

impl From<&ChunkHeader> for ChunkMetadata {
    fn from(chunk: &ChunkHeader) -> Self {
        ChunkMetadata {
            marker: chunk.marker.to_string(),
            length: chunk.length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{AudioInfo, ChannelLayout, CodecId};

    #[test]
    fn test_stream_metadata_from_audio() {
        let stream = Stream::audio(CodecId::PcmS16Le, AudioInfo::new(32000, ChannelLayout::Stereo));
        let meta = StreamMetadata::from(&stream);
        assert_eq!(meta.stream_type, StreamType::Audio);
        assert_eq!(meta.codec, "pcm_s16le");
        assert_eq!(meta.sample_rate, Some(32000));
        assert!(meta.width.is_none());
        assert_eq!(meta.to_string(), "Audio: pcm_s16le, 32000 Hz, stereo");
    }

    #[test]
    fn test_json_skips_missing_fields() {
        let meta = MediaMetadata {
            file_path: "a.mo".to_string(),
            file_size: 0,
            format: ContainerFormat {
                name: "unknown".to_string(),
                long_name: "Unknown".to_string(),
                extensions: vec![],
            },
            probe_score: 0,
            streams: vec![],
            chunks: vec![ChunkMetadata {
                marker: "HE".to_string(),
                length: 0,
            }],
            duration: 0.0,
        };
        let json = meta.to_json().unwrap();
        assert!(json.contains("\"marker\": \"HE\""));
        assert!(json.contains("\"probe_score\": 0"));
        assert!(!json.contains("\"width\""));
    }
}
