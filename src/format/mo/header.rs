//! MO header parsing
//!
//! The header is walked chunk by chunk until the `HE` terminator. A
//! chunk that would run past the declared header length, or header
//! bytes that run out early, end the walk; without the terminator the
//! header is reported as incomplete.

use super::chunk::{ChunkHeader, CHUNK_HEADER_SIZE};
use super::{Marker, MO_MAGIC, PREAMBLE_SIZE};
use crate::error::{Error, Result};
use crate::format::{AudioInfo, CodecId, Stream, StreamInfo, VideoInfo};
use crate::util::{MediaType, Rational};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read, Seek, SeekFrom};
use tracing::{debug, info, trace, warn};

/// Numerator of the `256 / denominator` pair stored in the length chunk
pub const FRAME_RATE_SCALE: i64 = 256;

/// Parsed MO header
#[derive(Debug, Clone)]
pub struct MoHeader {
    /// End of the header region, measured from the start of the magic
    /// (the stored length plus the 8 preamble bytes)
    pub extent: u64,
    /// Stream 0, always video
    pub video: Stream,
    /// Stream 1, always audio
    pub audio: Stream,
    /// Every chunk walked over, in file order
    pub chunks: Vec<ChunkHeader>,
    /// Absolute position of the first packet chunk
    pub data_start: u64,
}

/// Header bytes running out is an incomplete header, not an I/O failure.
fn header_io(err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        Error::end_of_header("header data ended before the terminator")
    } else {
        Error::Io(err)
    }
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    reader.read_u32::<LittleEndian>().map_err(header_io)
}

fn skip<R: Seek>(reader: &mut R, len: u64) -> Result<()> {
    if len > 0 {
        reader.seek(SeekFrom::Current(len as i64))?;
    }
    Ok(())
}

impl MoHeader {
    /// Read and parse an MO header, leaving `reader` at the first packet.
    ///
    /// Both streams are always created; the format carries audio and
    /// video together.
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let base = reader.stream_position()?;

        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic).map_err(header_io)?;
        if &magic != MO_MAGIC {
            return Err(Error::format("Not a valid MO file"));
        }

        let extent = read_u32(reader)? as u64 + PREAMBLE_SIZE;

        let mut video_info = VideoInfo::new(0, 0, Rational::default());
        let mut frame_count: Option<u32> = None;
        let mut audio: Option<(CodecId, AudioInfo)> = None;
        let mut chunks = Vec::new();
        let mut header_done = false;

        while !header_done {
            let position = reader.stream_position()? - base;
            if position > extent {
                break;
            }

            let chunk = match ChunkHeader::read(reader) {
                Ok(chunk) => chunk,
                Err(Error::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e),
            };
            trace!("Handling '{}'...", chunk.marker);

            if !chunk.fits_within(position + CHUNK_HEADER_SIZE, extent) {
                warn!(
                    "Chunk '{}' ({} bytes at {}) overruns header of {} bytes",
                    chunk.marker, chunk.length, position, extent
                );
                break;
            }
            chunks.push(chunk);

            let consumed: u64 = match chunk.marker {
                Marker::Length => {
                    let denominator = read_u32(reader)?;
                    let frames = read_u32(reader)?;
                    // Reserved word, meaning unknown.
                    read_u32(reader)?;

                    video_info.frame_rate = Rational::raw(FRAME_RATE_SCALE, denominator as i64);
                    frame_count = Some(frames);
                    12
                }
                Marker::Video => {
                    video_info.width = read_u32(reader)?;
                    video_info.height = read_u32(reader)?;
                    8
                }
                Marker::Signature | Marker::UnknownAudio | Marker::KeyIndex => {
                    skip(reader, chunk.length as u64)?;
                    chunk.length as u64
                }
                Marker::FastAudio
                | Marker::FastAudioStereo
                | Marker::Pcm
                | Marker::Adpcm
                | Marker::AdpcmStereo => {
                    let sample_rate = read_u32(reader)?;
                    // Channel count; the layout is taken from the marker.
                    read_u32(reader)?;

                    let (codec_id, layout) = chunk.marker.audio_format().ok_or_else(|| {
                        Error::not_implemented(format!("Audio format '{}'", chunk.marker))
                    })?;
                    audio = Some((codec_id, AudioInfo::new(sample_rate, layout)));
                    8
                }
                Marker::Multitrack => {
                    return Err(Error::not_implemented("Multitrack audio in MO files"));
                }
                Marker::Vorbis => {
                    return Err(Error::not_implemented("Vorbis audio in MO files"));
                }
                Marker::HeaderDone => {
                    header_done = true;
                    0
                }
                Marker::Captions | Marker::Unknown(_) => {
                    info!("Encountered unknown chunk '{}' - ignoring.", chunk.marker);
                    skip(reader, chunk.length as u64)?;
                    chunk.length as u64
                }
            };

            if (chunk.length as u64) > consumed {
                skip(reader, chunk.length as u64 - consumed)?;
            }
        }

        if !header_done {
            return Err(Error::end_of_header(format!(
                "no terminator within {} header bytes",
                extent
            )));
        }

        let data_start = reader.stream_position()?;
        let frames = frame_count.unwrap_or(0);

        let mut video_stream = StreamInfo::new(0, MediaType::Video, CodecId::Mobiclip);
        video_stream.time_base = video_info.frame_rate;
        video_stream.duration = frames as i64;
        video_stream.nb_frames = frame_count.map(u64::from);
        video_stream.video_info = Some(video_info);

        let mut audio_stream = StreamInfo::new(1, MediaType::Audio, CodecId::Unknown);
        audio_stream.duration = frames as i64;
        if let Some((codec_id, audio_info)) = audio {
            audio_stream.codec_id = codec_id;
            audio_stream.time_base = Rational::new(1, audio_info.sample_rate as i64);
            audio_stream.audio_info = Some(audio_info);
        }

        debug!(
            "MO header parsed: {} chunks, {} frames, packets start at {}",
            chunks.len(),
            frames,
            data_start
        );

        Ok(MoHeader {
            extent,
            video: Stream::new(video_stream),
            audio: Stream::new(audio_stream),
            chunks,
            data_start,
        })
    }

    /// Video information from the `V2` and `TL` chunks
    pub fn video_info(&self) -> Option<&VideoInfo> {
        self.video.info.video_info.as_ref()
    }

    /// Audio information from the audio chunk, if one was present
    pub fn audio_info(&self) -> Option<&AudioInfo> {
        self.audio.info.audio_info.as_ref()
    }

    /// Frame count from the `TL` chunk
    pub fn frame_count(&self) -> u64 {
        self.video.info.nb_frames.unwrap_or(0)
    }

    /// Frames per second implied by the `TL` chunk
    pub fn frames_per_second(&self) -> f64 {
        self.video.info.time_base.invert().to_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ChannelLayout;
    use std::io::Cursor;

    /// Assemble a header from raw chunks, with the length field covering them
    fn header_bytes(chunks: &[(&[u8; 2], Vec<u32>)]) -> Vec<u8> {
        let mut body = Vec::new();
        for (marker, words) in chunks {
            body.extend_from_slice(&marker[..]);
            body.extend_from_slice(&(words.len() as u16).to_le_bytes());
            for word in words {
                body.extend_from_slice(&word.to_le_bytes());
            }
        }
        let mut out = MO_MAGIC.to_vec();
        out.extend_from_slice(&(body.len() as u32).to_le_bytes());
        out.extend_from_slice(&body);
        out
    }

    fn minimal(audio_marker: &[u8; 2]) -> Vec<u8> {
        header_bytes(&[
            (b"TL", vec![7680, 300, 0]),
            (b"V2", vec![256, 192]),
            (audio_marker, vec![32728, 2]),
            (b"HE", vec![]),
        ])
    }

    #[test]
    fn test_minimal_header() {
        let data = minimal(b"A3");
        let mut cursor = Cursor::new(data.clone());
        let header = MoHeader::read(&mut cursor).unwrap();

        let video = header.video_info().unwrap();
        assert_eq!(video.width, 256);
        assert_eq!(video.height, 192);
        assert_eq!(video.frame_rate, Rational::raw(256, 7680));
        assert_eq!(header.frame_count(), 300);
        assert_eq!(header.frames_per_second(), 30.0);

        let audio = header.audio_info().unwrap();
        assert_eq!(audio.sample_rate, 32728);
        assert_eq!(audio.channel_layout, ChannelLayout::Stereo);
        assert_eq!(header.audio.info.codec_id, CodecId::FastAudio);
        assert_eq!(header.audio.info.duration, 300);

        assert_eq!(header.chunks.len(), 4);
        assert_eq!(header.data_start, data.len() as u64);
        assert_eq!(header.extent, data.len() as u64);
    }

    #[test]
    fn test_audio_layout_comes_from_marker() {
        // The chunk claims two channels; A8 is mono regardless.
        let mut cursor = Cursor::new(minimal(b"A8"));
        let header = MoHeader::read(&mut cursor).unwrap();
        let audio = header.audio_info().unwrap();
        assert_eq!(audio.channel_layout, ChannelLayout::Mono);
        assert_eq!(header.audio.info.codec_id, CodecId::AdpcmImaMoflex);
    }

    #[test]
    fn test_skipped_chunks() {
        let data = header_bytes(&[
            (b"TL", vec![7680, 10, 0]),
            (b"pc", vec![0xAAAA_AAAA; 40]),
            (b"KI", vec![1, 2, 3, 4]),
            (b"zz", vec![9, 9]),
            (b"V2", vec![320, 240]),
            (b"AP", vec![44100, 2]),
            (b"HE", vec![]),
        ]);
        let header = MoHeader::read(&mut Cursor::new(data)).unwrap();
        assert_eq!(header.video_info().unwrap().width, 320);
        assert_eq!(header.audio.info.codec_id, CodecId::PcmS16Le);
        assert_eq!(header.chunks[3].marker, Marker::from_bytes(*b"zz"));
        assert_eq!(header.chunks[1].length, 160);
    }

    #[test]
    fn test_oversized_known_chunk_is_skipped_past() {
        let data = header_bytes(&[
            (b"V2", vec![320, 240, 0xDEAD, 0xBEEF]),
            (b"HE", vec![]),
        ]);
        let header = MoHeader::read(&mut Cursor::new(data)).unwrap();
        assert_eq!(header.video_info().unwrap().height, 240);
        assert_eq!(header.chunks.last().unwrap().marker, Marker::HeaderDone);
    }

    #[test]
    fn test_missing_terminator() {
        let data = header_bytes(&[(b"TL", vec![7680, 10, 0]), (b"V2", vec![320, 240])]);
        let err = MoHeader::read(&mut Cursor::new(data)).unwrap_err();
        assert!(matches!(err, Error::EndOfHeader(_)));
        assert!(err.is_end_of_stream());
    }

    #[test]
    fn test_chunk_overrun_stops_scan() {
        let mut data = minimal(b"AP");
        // Shrink the declared header so the video chunk no longer fits.
        data[4..8].copy_from_slice(&20u32.to_le_bytes());
        let err = MoHeader::read(&mut Cursor::new(data)).unwrap_err();
        assert!(matches!(err, Error::EndOfHeader(_)));
    }

    #[test]
    fn test_unimplemented_audio() {
        for marker in [b"AM", b"AV"] {
            let data = header_bytes(&[
                (b"TL", vec![7680, 10, 0]),
                (marker, vec![0, 0]),
                (b"HE", vec![]),
            ]);
            let err = MoHeader::read(&mut Cursor::new(data)).unwrap_err();
            assert!(matches!(err, Error::NotImplemented(_)), "{:?}", err);
        }
    }

    #[test]
    fn test_bad_magic() {
        let mut data = minimal(b"AP");
        data[0] = b'X';
        assert!(matches!(
            MoHeader::read(&mut Cursor::new(data)),
            Err(Error::Format(_))
        ));
    }
}
