//! Container Format Detection
//!
//! Detects MO files by examining the first bytes of the input.

use super::metadata::ContainerFormat;
use crate::error::Result;
use crate::format::mo;
use std::io::{Read, Seek, SeekFrom};

/// Number of bytes examined for detection
pub const PROBE_SIZE: usize = 16;

/// Format detector for container formats
pub struct FormatDetector;

impl FormatDetector {
    /// Detect the container format, returning the format and its score.
    ///
    /// The reader is left at the start of the input.
    pub fn detect<R: Read + Seek>(reader: &mut R) -> Result<(ContainerFormat, u32)> {
        reader.seek(SeekFrom::Start(0))?;
        let mut header = Vec::with_capacity(PROBE_SIZE);
        reader.by_ref().take(PROBE_SIZE as u64).read_to_end(&mut header)?;
        reader.seek(SeekFrom::Start(0))?;

        let score = mo::probe(&header);
        if score > 0 {
            Ok((Self::mo_format(), score))
        } else {
            Ok((Self::unknown_format(), 0))
        }
    }

    fn mo_format() -> ContainerFormat {
        let info = mo::format_info();
        ContainerFormat {
            name: info.name.to_string(),
            long_name: info.long_name.to_string(),
            extensions: info.extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    fn unknown_format() -> ContainerFormat {
        ContainerFormat {
            name: "unknown".to_string(),
            long_name: "Unknown format".to_string(),
            extensions: vec![],
        }
    }
}
