//! Error handling tests for ZMO
//!
//! These tests verify that the demuxer and probe handle malformed,
//! truncated, or garbage input without panicking.

use std::io::Cursor;
use std::panic;
use zmo_lib::error::Error;
use zmo_lib::format::mo::{self, MoDemuxer};
use zmo_lib::format::Demuxer;

#[path = "common/mod.rs"]
mod common;

use common::*;

/// Test that a closure does not panic
fn assert_no_panic<F: FnOnce() -> R + panic::UnwindSafe, R>(f: F, description: &str) {
    let result = panic::catch_unwind(f);
    assert!(result.is_ok(), "Panic occurred: {}", description);
}

/// Read a whole input, stopping at the first error
fn demux_all(bytes: Vec<u8>) -> Result<usize, Error> {
    let mut demuxer = MoDemuxer::new(Cursor::new(bytes));
    demuxer.read_header()?;

    let mut count = 0;
    loop {
        match demuxer.read_packet() {
            Ok(_) => count += 1,
            Err(e) if e.is_end_of_stream() => return Ok(count),
            Err(e) => return Err(e),
        }
    }
}

#[test]
fn test_empty_input() {
    assert!(matches!(demux_all(Vec::new()), Err(Error::EndOfHeader(_))));
    assert_eq!(mo::probe(&[]), 0);
}

#[test]
fn test_garbage_input() {
    for seed in 0..16u8 {
        let garbage = payload(256, seed.wrapping_mul(17));
        assert_no_panic(
            || {
                let _ = demux_all(garbage.clone());
                let _ = mo::probe(&garbage);
            },
            "garbage input",
        );
    }
}

#[test]
fn test_every_truncation_of_a_valid_file() {
    let mut file = standard_header(2);
    push_packet(&mut file, &payload(7, 1), &payload(12, 2));
    push_packet(&mut file, &payload(3, 3), &payload(8, 4));

    for len in 0..file.len() {
        let prefix = file[..len].to_vec();
        assert_no_panic(
            || {
                let _ = demux_all(prefix);
            },
            "truncated file",
        );
    }

    assert_eq!(demux_all(file).unwrap(), 4);
}

#[test]
fn test_garbage_after_valid_header() {
    let mut file = standard_header(1);
    file.extend_from_slice(&payload(40, 0xF0));

    assert_no_panic(
        || {
            let _ = demux_all(file);
        },
        "garbage packet data",
    );
}

#[test]
fn test_chunk_smaller_than_its_video() {
    let mut file = standard_header(1);
    file.extend_from_slice(&8u32.to_le_bytes());
    file.extend_from_slice(&16u32.to_le_bytes());
    file.extend_from_slice(&[0u8; 16]);

    assert!(matches!(demux_all(file), Err(Error::Format(_))));
}

#[test]
fn test_header_with_huge_chunk() {
    let mut bytes = RawHeader::new()
        .length(7680, 1)
        .chunk(b"ZZ", &[0; 4])
        .done()
        .finish();
    // Claim far more words for the unknown chunk than the header holds.
    bytes[26] = 0xFF;
    bytes[27] = 0xFF;

    assert!(matches!(demux_all(bytes), Err(Error::EndOfHeader(_))));
}
