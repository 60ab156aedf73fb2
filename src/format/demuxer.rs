//! Demuxer for reading container formats

use super::{Packet, Stream};
use crate::error::Result;

/// Demuxer trait for reading container formats
pub trait Demuxer {
    /// Parse the container header and set up the streams
    fn read_header(&mut self) -> Result<()>;

    /// Get the list of streams in this container
    fn streams(&self) -> &[Stream];

    /// Read the next packet
    ///
    /// Returns `Error::EndOfStream` once the container is exhausted.
    fn read_packet(&mut self) -> Result<Packet>;

    /// Close the demuxer
    fn close(&mut self) -> Result<()>;
}

/// Context for demuxing operations
#[derive(Debug)]
pub struct DemuxerContext {
    streams: Vec<Stream>,
    format_name: String,
    duration: i64,
}

impl DemuxerContext {
    /// Create a new demuxer context
    pub fn new(format_name: String) -> Self {
        DemuxerContext {
            streams: Vec::new(),
            format_name,
            duration: 0,
        }
    }

    /// Get the format name
    pub fn format_name(&self) -> &str {
        &self.format_name
    }

    /// Get all streams
    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    /// Get a specific stream
    pub fn stream(&self, index: usize) -> Option<&Stream> {
        self.streams.get(index)
    }

    /// Add a stream
    pub fn add_stream(&mut self, stream: Stream) {
        self.streams.push(stream);
    }

    /// Remove all streams
    pub fn clear(&mut self) {
        self.streams.clear();
        self.duration = 0;
    }

    /// Get the duration
    pub fn duration(&self) -> i64 {
        self.duration
    }

    /// Set the duration
    pub fn set_duration(&mut self, duration: i64) {
        self.duration = duration;
    }
}
