//! MobiClip MO container support
//!
//! An MO file starts with the `MOC5` magic and a little-endian header
//! length, followed by a run of tag-length-value chunks that describe
//! one video stream and one audio stream. After the `HE` terminator the
//! file is a sequence of interleaved chunks, each carrying one video
//! payload followed by one audio payload and some alignment padding.

pub mod builder;
pub mod chunk;
pub mod demuxer;
pub mod header;
pub mod marker;
pub mod muxer;

pub use builder::HeaderBuilder;
pub use chunk::ChunkHeader;
pub use demuxer::MoDemuxer;
pub use header::MoHeader;
pub use marker::Marker;
pub use muxer::MoMuxer;

use super::FormatInfo;

/// Container magic as it appears at the start of the file
pub const MO_MAGIC: &[u8; 4] = b"MOC5";

/// Bytes taken by the magic and the header length field
pub const PREAMBLE_SIZE: u64 = 8;

/// Rough minimum for the header length field during detection
pub const MIN_HEADER_SIZE: u32 = 0x28;

/// Score reported by [`probe`] for a match (extension score + 10)
pub const PROBE_SCORE: u32 = 60;

/// Short format name
pub const FORMAT_NAME: &str = "mobiclip_mo";

/// Size of the `chunk_size` and `video_size` fields before each packet pair
pub const PACKET_PREFIX_SIZE: u32 = 8;

/// Describe the MO format
pub fn format_info() -> FormatInfo {
    FormatInfo {
        name: FORMAT_NAME,
        long_name: "MobiClip MO",
        extensions: &["mo"],
    }
}

/// Check whether `buf` looks like the start of an MO file.
///
/// Returns [`PROBE_SCORE`] on a match and 0 otherwise. The header
/// length is compared as a big-endian value even though the header
/// itself stores it little-endian; any plausible file clears the bar
/// either way.
pub fn probe(buf: &[u8]) -> u32 {
    if buf.len() < 10 {
        return 0;
    }
    if &buf[0..4] != MO_MAGIC {
        return 0;
    }
    if u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]) < MIN_HEADER_SIZE {
        return 0;
    }
    // The length chunk is always written first.
    if [buf[8], buf[9]] != Marker::Length.to_bytes() {
        return 0;
    }
    PROBE_SCORE
}

/// Padding that follows an audio payload ending at `position`.
///
/// Always in `1..=4`: a position that is already a multiple of four
/// still gets four bytes of padding. Files in the wild are laid out this
/// way, so both the demuxer and the muxer use this exact formula.
pub fn alignment_padding(position: u64) -> u64 {
    (position + 4 - (position % 4)) - position
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe_buf(size_be: u32, marker: [u8; 2]) -> Vec<u8> {
        let mut buf = MO_MAGIC.to_vec();
        buf.extend_from_slice(&size_be.to_be_bytes());
        buf.extend_from_slice(&marker);
        buf.extend_from_slice(&[3, 0]);
        buf
    }

    #[test]
    fn test_probe_accepts_mo() {
        assert_eq!(probe(&probe_buf(0x100, *b"TL")), PROBE_SCORE);
        assert_eq!(probe(&probe_buf(MIN_HEADER_SIZE, *b"TL")), PROBE_SCORE);
    }

    #[test]
    fn test_probe_rejects() {
        assert_eq!(probe(&probe_buf(MIN_HEADER_SIZE - 1, *b"TL")), 0);
        assert_eq!(probe(&probe_buf(0x100, *b"V2")), 0);

        let mut bad_magic = probe_buf(0x100, *b"TL");
        bad_magic[3] = b'4';
        assert_eq!(probe(&bad_magic), 0);

        assert_eq!(probe(b"MOC5"), 0);
        assert_eq!(probe(&[]), 0);
    }

    #[test]
    fn test_padding_never_zero() {
        assert_eq!(alignment_padding(0), 4);
        assert_eq!(alignment_padding(16), 4);
        assert_eq!(alignment_padding(17), 3);
        assert_eq!(alignment_padding(18), 2);
        assert_eq!(alignment_padding(19), 1);
    }
}
