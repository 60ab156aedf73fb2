//! Stream information and metadata

use crate::util::{MediaType, Rational};
use std::fmt;

/// Codecs an MO container can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecId {
    /// MobiClip video, the only video codec the container carries
    Mobiclip,
    /// FastAudio
    FastAudio,
    /// Signed 16-bit little-endian PCM
    PcmS16Le,
    /// IMA ADPCM, MobiClip flavour
    AdpcmImaMoflex,
    /// Not declared by the header
    Unknown,
}

impl CodecId {
    /// Media type this codec produces
    pub fn media_type(&self) -> MediaType {
        match self {
            CodecId::Mobiclip => MediaType::Video,
            CodecId::FastAudio | CodecId::PcmS16Le | CodecId::AdpcmImaMoflex => MediaType::Audio,
            CodecId::Unknown => MediaType::Unknown,
        }
    }

    /// Short codec name
    pub fn name(&self) -> &'static str {
        match self {
            CodecId::Mobiclip => "mobiclip",
            CodecId::FastAudio => "fastaudio",
            CodecId::PcmS16Le => "pcm_s16le",
            CodecId::AdpcmImaMoflex => "adpcm_ima_moflex",
            CodecId::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Audio channel layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    Mono,
    Stereo,
}

impl ChannelLayout {
    /// Number of channels in this layout
    pub fn channels(&self) -> u16 {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelLayout::Mono => write!(f, "mono"),
            ChannelLayout::Stereo => write!(f, "stereo"),
        }
    }
}

/// Video stream information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoInfo {
    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Frame rate pair.
    ///
    /// When muxing this is the ordinary frames-per-second ratio and only
    /// its numerator is written. A demuxed stream holds the pair read
    /// from the length chunk, `256 / denominator`, which is also the
    /// stream time base.
    pub frame_rate: Rational,
}

impl VideoInfo {
    /// Create new video info
    pub fn new(width: u32, height: u32, frame_rate: Rational) -> Self {
        VideoInfo {
            width,
            height,
            frame_rate,
        }
    }
}

/// Audio stream information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioInfo {
    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Channel layout
    pub channel_layout: ChannelLayout,
}

impl AudioInfo {
    /// Create new audio info
    pub fn new(sample_rate: u32, channel_layout: ChannelLayout) -> Self {
        AudioInfo {
            sample_rate,
            channel_layout,
        }
    }

    /// Number of channels
    pub fn channels(&self) -> u16 {
        self.channel_layout.channels()
    }
}

/// Information about a media stream
#[derive(Debug, Clone)]
pub struct StreamInfo {
    /// Stream index
    pub index: usize,

    /// Media type
    pub media_type: MediaType,

    /// Codec identifier
    pub codec_id: CodecId,

    /// Time base for this stream
    pub time_base: Rational,

    /// Duration in frames (the MO header stores one frame count for both streams)
    pub duration: i64,

    /// Number of video frames (if known)
    pub nb_frames: Option<u64>,

    /// Video-specific info
    pub video_info: Option<VideoInfo>,

    /// Audio-specific info
    pub audio_info: Option<AudioInfo>,
}

impl StreamInfo {
    /// Create a new stream info
    pub fn new(index: usize, media_type: MediaType, codec_id: CodecId) -> Self {
        StreamInfo {
            index,
            media_type,
            codec_id,
            time_base: Rational::default(),
            duration: 0,
            nb_frames: None,
            video_info: None,
            audio_info: None,
        }
    }
}

/// A media stream
#[derive(Debug, Clone)]
pub struct Stream {
    /// Stream information
    pub info: StreamInfo,
}

impl Stream {
    /// Create a new stream
    pub fn new(info: StreamInfo) -> Self {
        Stream { info }
    }

    /// Describe a video stream for muxing
    pub fn video(codec_id: CodecId, info: VideoInfo, nb_frames: u64) -> Self {
        let mut stream_info = StreamInfo::new(0, MediaType::Video, codec_id);
        stream_info.time_base = info.frame_rate.invert();
        stream_info.duration = nb_frames as i64;
        stream_info.nb_frames = Some(nb_frames);
        stream_info.video_info = Some(info);
        Stream::new(stream_info)
    }

    /// Describe an audio stream for muxing
    pub fn audio(codec_id: CodecId, info: AudioInfo) -> Self {
        let mut stream_info = StreamInfo::new(1, MediaType::Audio, codec_id);
        stream_info.time_base = Rational::new(1, info.sample_rate as i64);
        stream_info.audio_info = Some(info);
        Stream::new(stream_info)
    }

    /// Media type of this stream
    pub fn media_type(&self) -> MediaType {
        self.info.media_type
    }
}
