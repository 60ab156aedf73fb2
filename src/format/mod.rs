//! Container format handling (demuxing and muxing)
//!
//! The generic traits and stream descriptions live here; the MO
//! container itself is in [`mo`].

pub mod demuxer;
pub mod mo;
pub mod muxer;
pub mod packet;
pub mod stream;

pub use demuxer::{Demuxer, DemuxerContext};
pub use muxer::{Muxer, MuxerContext};
pub use packet::Packet;
pub use stream::{AudioInfo, ChannelLayout, CodecId, Stream, StreamInfo, VideoInfo};

/// Container format information
#[derive(Debug, Clone)]
pub struct FormatInfo {
    /// Short format name
    pub name: &'static str,
    /// Long/descriptive name
    pub long_name: &'static str,
    /// File extensions
    pub extensions: &'static [&'static str],
}

/// Detect format from file extension
pub fn detect_format_from_extension(path: &str) -> Option<&'static str> {
    let ext = path.rsplit('.').next()?.to_lowercase();
    match ext.as_str() {
        "mo" => Some(mo::FORMAT_NAME),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_from_extension() {
        assert_eq!(detect_format_from_extension("intro.mo"), Some("mobiclip_mo"));
        assert_eq!(detect_format_from_extension("INTRO.MO"), Some("mobiclip_mo"));
        assert_eq!(detect_format_from_extension("clip.avi"), None);
    }

    #[test]
    fn test_format_info() {
        let info = mo::format_info();
        assert_eq!(info.long_name, "MobiClip MO");
        assert_eq!(info.extensions, &["mo"]);
    }
}
