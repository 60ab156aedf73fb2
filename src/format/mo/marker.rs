//! Chunk markers used in the MO header

use crate::format::{ChannelLayout, CodecId};
use std::fmt;

/// Pack two marker characters the way they are read off the wire
/// (a little-endian `u16`).
pub const fn pack(a: u8, b: u8) -> u16 {
    (a as u16) | ((b as u16) << 8)
}

/// Marker identifying the kind of a header chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `TL`: frame rate, frame count and a reserved word
    Length,
    /// `V2`: picture width and height
    Video,
    /// `pc`: signature blob
    Signature,
    /// `P\xC6`: unknown audio hint, possibly signalling a stereo track
    UnknownAudio,
    /// `A2`: FastAudio, mono
    FastAudio,
    /// `A3`: FastAudio, stereo
    FastAudioStereo,
    /// `AP`: 16-bit PCM
    Pcm,
    /// `A8`: IMA ADPCM, mono
    Adpcm,
    /// `A9`: IMA ADPCM, stereo
    AdpcmStereo,
    /// `AM`: several audio tracks
    Multitrack,
    /// `AV`: audio embedded in a secondary codec
    Vorbis,
    /// `KI`: keyframe index
    KeyIndex,
    /// `cc`: unknown, possibly captions
    Captions,
    /// `HE`: end of header
    HeaderDone,
    /// Any marker outside the table
    Unknown(u16),
}

impl Marker {
    /// Create a marker from its two wire bytes
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        Marker::from(u16::from_le_bytes(bytes))
    }

    /// The two wire bytes of this marker
    pub fn to_bytes(self) -> [u8; 2] {
        u16::from(self).to_le_bytes()
    }

    /// Codec and channel layout selected by an audio marker.
    ///
    /// The layout comes from the marker alone; the channel count stored
    /// in the chunk is not consulted.
    pub fn audio_format(&self) -> Option<(CodecId, ChannelLayout)> {
        match self {
            Marker::FastAudio => Some((CodecId::FastAudio, ChannelLayout::Mono)),
            Marker::FastAudioStereo => Some((CodecId::FastAudio, ChannelLayout::Stereo)),
            Marker::Pcm => Some((CodecId::PcmS16Le, ChannelLayout::Stereo)),
            Marker::Adpcm => Some((CodecId::AdpcmImaMoflex, ChannelLayout::Mono)),
            Marker::AdpcmStereo => Some((CodecId::AdpcmImaMoflex, ChannelLayout::Stereo)),
            _ => None,
        }
    }
}

// Packed wire values of the known markers
const LENGTH: u16 = pack(b'T', b'L');
const VIDEO: u16 = pack(b'V', b'2');
const SIGNATURE: u16 = pack(b'p', b'c');
const UNKNOWN_AUDIO: u16 = pack(b'P', 0xC6);
const FAST_AUDIO: u16 = pack(b'A', b'2');
const FAST_AUDIO_STEREO: u16 = pack(b'A', b'3');
const PCM: u16 = pack(b'A', b'P');
const ADPCM: u16 = pack(b'A', b'8');
const ADPCM_STEREO: u16 = pack(b'A', b'9');
const MULTITRACK: u16 = pack(b'A', b'M');
const VORBIS: u16 = pack(b'A', b'V');
const KEY_INDEX: u16 = pack(b'K', b'I');
const CAPTIONS: u16 = pack(b'c', b'c');
const HEADER_DONE: u16 = pack(b'H', b'E');

impl From<u16> for Marker {
    fn from(val: u16) -> Self {
        match val {
            LENGTH => Marker::Length,
            VIDEO => Marker::Video,
            SIGNATURE => Marker::Signature,
            UNKNOWN_AUDIO => Marker::UnknownAudio,
            FAST_AUDIO => Marker::FastAudio,
            FAST_AUDIO_STEREO => Marker::FastAudioStereo,
            PCM => Marker::Pcm,
            ADPCM => Marker::Adpcm,
            ADPCM_STEREO => Marker::AdpcmStereo,
            MULTITRACK => Marker::Multitrack,
            VORBIS => Marker::Vorbis,
            KEY_INDEX => Marker::KeyIndex,
            CAPTIONS => Marker::Captions,
            HEADER_DONE => Marker::HeaderDone,
            other => Marker::Unknown(other),
        }
    }
}

impl From<Marker> for u16 {
    fn from(marker: Marker) -> Self {
        match marker {
            Marker::Length => LENGTH,
            Marker::Video => VIDEO,
            Marker::Signature => SIGNATURE,
            Marker::UnknownAudio => UNKNOWN_AUDIO,
            Marker::FastAudio => FAST_AUDIO,
            Marker::FastAudioStereo => FAST_AUDIO_STEREO,
            Marker::Pcm => PCM,
            Marker::Adpcm => ADPCM,
            Marker::AdpcmStereo => ADPCM_STEREO,
            Marker::Multitrack => MULTITRACK,
            Marker::Vorbis => VORBIS,
            Marker::KeyIndex => KEY_INDEX,
            Marker::Captions => CAPTIONS,
            Marker::HeaderDone => HEADER_DONE,
            Marker::Unknown(val) => val,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            if byte.is_ascii_graphic() || byte >= 0xA0 {
                write!(f, "{}", char::from(byte))?;
            } else {
                write!(f, "\\x{:02x}", byte)?;
            }
        }
        Ok(())
    }
}
