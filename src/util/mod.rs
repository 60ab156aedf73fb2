//! Common utilities and data structures

pub mod buffer;
pub mod rational;
pub mod timestamp;

pub use buffer::Buffer;
pub use rational::Rational;
pub use timestamp::Timestamp;

use std::fmt;

/// Media types carried by an MO container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// Video stream
    Video,
    /// Audio stream
    Audio,
    /// Unknown stream type
    Unknown,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Video => write!(f, "video"),
            MediaType::Audio => write!(f, "audio"),
            MediaType::Unknown => write!(f, "unknown"),
        }
    }
}
