//! ZMO - A reader and writer for the MobiClip MO container written in Rust
//!
//! MO files interleave one video stream and one audio stream behind a
//! tag-length-value header that describes the frame rate, frame count,
//! picture size, an embedded signature blob and the audio parameters.
//!
//! # Architecture
//!
//! - `format`: Generic demuxer/muxer traits and the `mo` container itself
//! - `probe`: File detection and metadata extraction
//! - `util`: Common utilities and data structures
//!
//! Sample payloads are never decoded; only their presence and byte
//! extents matter here.

pub mod error;
pub mod format;
pub mod probe;
pub mod util;

pub use error::{Error, Result};

/// ZMO version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for the ZMO library
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Enable verbose logging
    pub verbose: bool,
    /// Enable debug output
    pub debug: bool,
}

/// Initialize the ZMO library with the given configuration
pub fn init(config: Config) -> Result<()> {
    if config.verbose || config.debug {
        let level = if config.debug { "debug" } else { "info" };
        tracing_subscriber::fmt()
            .with_env_filter(level)
            .try_init()
            .map_err(|e| Error::Init(format!("Failed to install log subscriber: {}", e)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.verbose);
        assert!(!config.debug);
    }

    #[test]
    fn test_init_quiet() {
        assert!(init(Config::default()).is_ok());
    }
}
