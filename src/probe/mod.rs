//! Media File Probing and Metadata Extraction
//!
//! # Usage
//!
//! ```rust,no_run
//! use zmo_lib::probe::MediaProbe;
//!
//! let probe = MediaProbe::new("intro.mo")?;
//! let metadata = probe.analyze()?;
//! println!("{}", metadata);
//! # Ok::<(), zmo_lib::error::Error>(())
//! ```

pub mod format_detector;
pub mod metadata;

use crate::error::{Error, Result};
use crate::format::mo::{self, MoDemuxer};
use crate::format::{detect_format_from_extension, Demuxer};
use std::fs;
use std::io::BufReader;
use std::path::Path;
use tracing::warn;

pub use format_detector::FormatDetector;
pub use metadata::*;

/// Media file probe
pub struct MediaProbe {
    /// Path to media file
    file_path: String,
    /// File size in bytes
    file_size: u64,
}

impl MediaProbe {
    /// Create new media probe for a file
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref().to_string_lossy().to_string();

        let metadata = fs::metadata(&path)
            .map_err(|e| Error::invalid_input(format!("Failed to access file: {}", e)))?;

        Ok(Self {
            file_path,
            file_size: metadata.len(),
        })
    }

    /// Analyze the media file and extract its metadata
    pub fn analyze(&self) -> Result<MediaMetadata> {
        let file = fs::File::open(&self.file_path)
            .map_err(|e| Error::invalid_input(format!("Failed to open file: {}", e)))?;
        let mut reader = BufReader::new(file);

        let (format, probe_score) = FormatDetector::detect(&mut reader)?;

        let mut metadata = MediaMetadata {
            file_path: self.file_path.clone(),
            file_size: self.file_size,
            format,
            probe_score,
            streams: Vec::new(),
            chunks: Vec::new(),
            duration: 0.0,
        };

        if probe_score == 0 {
            if detect_format_from_extension(&self.file_path) == Some(mo::FORMAT_NAME) {
                warn!(
                    "{} has an MO extension but does not start with an MO header",
                    self.file_path
                );
            }
            return Ok(metadata);
        }

        let mut demuxer = MoDemuxer::new(reader);
        demuxer.read_header()?;

        metadata.streams = demuxer.streams().iter().map(StreamMetadata::from).collect();
        if let Some(header) = demuxer.header() {
            metadata.chunks = header.chunks.iter().map(ChunkMetadata::from).collect();
            let video = &header.video.info;
            metadata.duration = video.duration as f64 * video.time_base.to_f64();
        }

        Ok(metadata)
    }

    /// Path being probed
    pub fn file_path(&self) -> &str {
        &self.file_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_probe_nonexistent_file() {
        let result = MediaProbe::new("/nonexistent/file.mo");
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
