//! E2E Test Suite: error handling & edge cases
//!
//! Every failure surfaces as a typed error or a non-zero status, never a
//! panic, and leaves no destination file behind.

use std::fs;

use lzopack::io::{CompressError, DecompressError, Engine, Prefs};
use lzopack::lzo::LzoCode;

#[test]
fn directory_source_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = Engine::new(Prefs::default())
        .compress_file(dir.path(), dir.path().join("dir.lzo"))
        .unwrap_err();
    assert!(matches!(err, CompressError::Io { .. }));
    assert!(!dir.path().join("dir.lzo").exists());
}

#[test]
fn unwritable_destination_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in");
    fs::write(&src, b"data").unwrap();
    let dst = dir.path().join("no/such/dir/out.lzo");

    let err = Engine::new(Prefs::default()).compress_file(&src, &dst).unwrap_err();
    match err {
        CompressError::Io { path, .. } => assert_eq!(path, dst),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_file_is_not_a_container() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("zero.lzo");
    fs::write(&src, b"").unwrap();
    let err = Engine::new(Prefs::default())
        .decompress_file(&src, dir.path().join("zero"))
        .unwrap_err();
    assert!(matches!(err, DecompressError::CorruptContainer { .. }));
    assert!(err.lzo_code().is_none());
}

#[test]
fn large_declared_length_fails_without_panicking() {
    let mut container = 1_000_000u32.to_le_bytes().to_vec();
    container.extend_from_slice(&[0x11, 0, 0]);
    assert!(Engine::new(Prefs::default()).decompress_bytes(&container).is_err());
}

#[test]
fn eof_marker_alone_with_nonzero_prefix_is_corrupt() {
    let mut container = 5u32.to_le_bytes().to_vec();
    container.extend_from_slice(&[0x11, 0, 0]);
    let err = Engine::new(Prefs::default()).decompress_bytes(&container).unwrap_err();
    assert!(matches!(err, DecompressError::CorruptContainer { .. }), "{err:?}");
}

#[test]
fn lookbehind_before_start_is_reported() {
    // Literal run of one byte, then an M2 match reaching 2 bytes back.
    let mut container = 10u32.to_le_bytes().to_vec();
    container.extend_from_slice(&[18, b'x', 0x44, 0x00, 0x11, 0, 0]);
    let err = Engine::new(Prefs::default()).decompress_bytes(&container).unwrap_err();
    assert_eq!(err.lzo_code(), Some(LzoCode::LOOKBEHIND_OVERRUN));
}

#[test]
fn status_functions_never_panic_on_bad_paths() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    assert_eq!(lzopack::compress(&missing, dir.path().join("a")), 1);
    assert_eq!(lzopack::decompress(&missing, dir.path().join("b")), 1);
    assert_eq!(lzopack::decompress(dir.path(), dir.path().join("c")), 1);
}
