//! Error types for ZMO

use thiserror::Error;

/// Result type alias for ZMO operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ZMO
#[derive(Error, Debug)]
pub enum Error {
    /// IO error from the underlying byte stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Corrupt or malformed container data
    #[error("Format error: {0}")]
    Format(String),

    /// The header ended (or a chunk overran it) before the terminator
    #[error("End of header: {0}")]
    EndOfHeader(String),

    /// Valid data using a feature this crate does not handle
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// A packet payload ended before its declared size
    #[error("Truncated stream: need {need} bytes, have {have}")]
    TruncatedStream { need: usize, have: usize },

    /// Stream configuration the muxer cannot write
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// End of stream
    #[error("End of stream")]
    EndOfStream,
}

impl Error {
    /// Create a format error
    pub fn format<S: Into<String>>(msg: S) -> Self {
        Error::Format(msg.into())
    }

    /// Create an end-of-header error
    pub fn end_of_header<S: Into<String>>(msg: S) -> Self {
        Error::EndOfHeader(msg.into())
    }

    /// Create a not-implemented error
    pub fn not_implemented<S: Into<String>>(msg: S) -> Self {
        Error::NotImplemented(msg.into())
    }

    /// Create an unsupported error
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        Error::Unsupported(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create an invalid state error
    pub fn invalid_state<S: Into<String>>(msg: S) -> Self {
        Error::InvalidState(msg.into())
    }

    /// True for errors in the end-of-stream class
    ///
    /// An incomplete header is reported the same way a reader reports
    /// running out of data.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Error::EndOfStream | Error::EndOfHeader(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_of_stream_class() {
        assert!(Error::EndOfStream.is_end_of_stream());
        assert!(Error::end_of_header("no terminator").is_end_of_stream());
        assert!(!Error::not_implemented("multitrack").is_end_of_stream());
        assert!(!Error::TruncatedStream { need: 4, have: 2 }.is_end_of_stream());
    }

    #[test]
    fn test_error_display() {
        let err = Error::TruncatedStream { need: 16, have: 3 };
        assert_eq!(err.to_string(), "Truncated stream: need 16 bytes, have 3");
        assert_eq!(
            Error::unsupported("only PCM").to_string(),
            "Unsupported: only PCM"
        );
    }
}
