//! MO demuxer implementation
//!
//! After the header, every packet chunk holds one video payload and one
//! audio payload:
//!
//! ```text
//! u32 chunk_size | u32 video_size | video | audio | padding
//! ```
//!
//! where the audio payload is `chunk_size - video_size - 8` bytes. The
//! demuxer hands these out one at a time, video first.

use super::header::MoHeader;
use super::{alignment_padding, FORMAT_NAME, PACKET_PREFIX_SIZE};
use crate::error::{Error, Result};
use crate::format::{CodecId, Demuxer, DemuxerContext, Packet, Stream};
use crate::util::{Buffer, Timestamp};
use byteorder::{ByteOrder, LittleEndian};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, trace};

/// Stream index of the video stream
pub const VIDEO_STREAM_INDEX: usize = 0;
/// Stream index of the audio stream
pub const AUDIO_STREAM_INDEX: usize = 1;

/// Which half of the current packet chunk comes next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The next read starts a new packet chunk
    AwaitVideo,
    /// The video payload has been read; the audio payload and its
    /// padding remain
    AwaitAudio { audio_size: u32, padding: u64 },
}

/// MO demuxer
pub struct MoDemuxer<R: Read + Seek> {
    reader: R,
    context: DemuxerContext,
    header: Option<MoHeader>,
    phase: Phase,
    stream_len: u64,
    eof: bool,
    frames_read: u64,
    samples_read: u64,
}

impl MoDemuxer<BufReader<File>> {
    /// Open an MO file and parse its header
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|e| {
            Error::format(format!(
                "Failed to open MO file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let mut demuxer = MoDemuxer::new(BufReader::new(file));
        demuxer.read_header()?;
        Ok(demuxer)
    }
}

impl<R: Read + Seek> MoDemuxer<R> {
    /// Create a new MO demuxer over a reader positioned at the magic
    pub fn new(reader: R) -> Self {
        MoDemuxer {
            reader,
            context: DemuxerContext::new(FORMAT_NAME.to_string()),
            header: None,
            phase: Phase::AwaitVideo,
            stream_len: 0,
            eof: false,
            frames_read: 0,
            samples_read: 0,
        }
    }

    /// Get the parsed header
    pub fn header(&self) -> Option<&MoHeader> {
        self.header.as_ref()
    }

    /// Current phase of the packet state machine
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Give back the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_u32(&mut self) -> Result<u32> {
        let mut word = Vec::with_capacity(4);
        (&mut self.reader).take(4).read_to_end(&mut word)?;
        if word.len() < 4 {
            return Err(Error::TruncatedStream {
                need: 4,
                have: word.len(),
            });
        }
        Ok(LittleEndian::read_u32(&word))
    }

    /// Read exactly `size` bytes, failing instead of returning a short packet
    fn read_payload(&mut self, size: u32) -> Result<(Buffer, i64)> {
        let position = self.reader.stream_position()? as i64;
        let need = size as usize;

        let mut data = Vec::new();
        (&mut self.reader).take(size as u64).read_to_end(&mut data)?;
        if data.len() < need {
            return Err(Error::TruncatedStream {
                need,
                have: data.len(),
            });
        }

        Ok((Buffer::from_vec(data), position))
    }

    fn read_video(&mut self) -> Result<Packet> {
        let chunk_size = self.read_u32()?;
        let video_size = self.read_u32()?;
        let audio_size = chunk_size
            .checked_sub(video_size)
            .and_then(|s| s.checked_sub(PACKET_PREFIX_SIZE))
            .ok_or_else(|| {
                Error::format(format!(
                    "Packet chunk of {} bytes cannot hold {} bytes of video",
                    chunk_size, video_size
                ))
            })?;

        let payload_end = self.reader.stream_position()? + video_size as u64 + audio_size as u64;
        let padding = alignment_padding(payload_end);
        trace!(
            "Packet chunk: {} bytes, video {}, audio {}, padding {}",
            chunk_size,
            video_size,
            audio_size,
            padding
        );

        let (data, position) = self.read_payload(video_size)?;

        let mut packet = Packet::new_video(VIDEO_STREAM_INDEX, data);
        packet.position = position;
        packet.pts = Timestamp::new(self.frames_read as i64);
        packet.dts = packet.pts;
        packet.duration = 1;
        self.frames_read += 1;

        self.phase = Phase::AwaitAudio {
            audio_size,
            padding,
        };
        Ok(packet)
    }

    fn read_audio(&mut self, audio_size: u32, padding: u64) -> Result<Packet> {
        let (data, position) = self.read_payload(audio_size)?;
        self.reader.seek(SeekFrom::Current(padding as i64))?;

        let mut packet = Packet::new_audio(AUDIO_STREAM_INDEX, data);
        packet.position = position;

        let pcm_channels = self
            .context
            .stream(AUDIO_STREAM_INDEX)
            .filter(|s| s.info.codec_id == CodecId::PcmS16Le)
            .and_then(|s| s.info.audio_info.as_ref())
            .map(|a| a.channels() as u64);
        if let Some(channels) = pcm_channels {
            let samples = packet.size() as u64 / (2 * channels);
            packet.pts = Timestamp::new(self.samples_read as i64);
            packet.dts = packet.pts;
            packet.duration = samples as i64;
            self.samples_read += samples;
        }

        self.phase = Phase::AwaitVideo;
        Ok(packet)
    }
}

impl<R: Read + Seek> Demuxer for MoDemuxer<R> {
    fn read_header(&mut self) -> Result<()> {
        let header = MoHeader::read(&mut self.reader)?;

        self.stream_len = self.reader.seek(SeekFrom::End(0))?;
        self.reader.seek(SeekFrom::Start(header.data_start))?;

        self.context.clear();
        self.context.add_stream(header.video.clone());
        self.context.add_stream(header.audio.clone());
        self.context.set_duration(header.video.info.duration);

        debug!(
            "Opened MO: video {} {}x{}, audio {}, {} bytes of packet data",
            header.video.info.codec_id,
            header.video_info().map_or(0, |v| v.width),
            header.video_info().map_or(0, |v| v.height),
            header.audio.info.codec_id,
            self.stream_len.saturating_sub(header.data_start)
        );

        self.phase = Phase::AwaitVideo;
        self.eof = header.data_start >= self.stream_len;
        self.frames_read = 0;
        self.samples_read = 0;
        self.header = Some(header);
        Ok(())
    }

    fn streams(&self) -> &[Stream] {
        self.context.streams()
    }

    fn read_packet(&mut self) -> Result<Packet> {
        if self.header.is_none() {
            return Err(Error::invalid_state("Demuxer not opened"));
        }
        if self.eof {
            // Data ending between a video payload and its audio is a cut-off file.
            if let Phase::AwaitAudio { audio_size, .. } = self.phase {
                if audio_size > 0 {
                    return Err(Error::TruncatedStream {
                        need: audio_size as usize,
                        have: 0,
                    });
                }
            }
            return Err(Error::EndOfStream);
        }

        let packet = match self.phase {
            Phase::AwaitVideo => self.read_video()?,
            Phase::AwaitAudio {
                audio_size,
                padding,
            } => self.read_audio(audio_size, padding)?,
        };

        // The packet in hand is still returned; the next call reports the end.
        if self.reader.stream_position()? >= self.stream_len {
            self.eof = true;
        }

        Ok(packet)
    }

    fn close(&mut self) -> Result<()> {
        self.header = None;
        self.context.clear();
        self.phase = Phase::AwaitVideo;
        self.eof = false;
        self.frames_read = 0;
        self.samples_read = 0;
        Ok(())
    }
}
