// Integration tests for Engine::decompress_file / decompress_bytes and the
// status-code `decompress` surface.

use std::fs;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use lzopack::io::{DecompressError, Engine, HeapAllocator, Prefs, StdFileIo};
use lzopack::lzo::{Lzo1x1, LzoCode, LzoErrorKind};

use crate::doubles::{sample_data, FailingCodec, Fault, FaultyFiles, TrackingAllocator};

fn write_container(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let container = Engine::new(Prefs::default()).compress_bytes(data).unwrap();
    fs::write(&path, container).unwrap();
    path
}

fn with_prefix(container: &[u8], prefix: u32) -> Vec<u8> {
    let mut out = prefix.to_le_bytes().to_vec();
    out.extend_from_slice(&container[4..]);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Happy path
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let data = sample_data(100_000);
    let src = write_container(dir.path(), "data.lzo", &data);
    let dst = dir.path().join("data");

    let stats = Engine::new(Prefs::default()).decompress_file(&src, &dst).unwrap();
    assert_eq!(fs::read(&dst).unwrap(), data);
    assert_eq!(stats.original_size, 100_000);
    assert_eq!(stats.container_size, fs::metadata(&src).unwrap().len());
}

#[test]
fn empty_container_gives_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("e.lzo");
    fs::write(&src, [0u8; 4]).unwrap();
    let dst = dir.path().join("e");

    Engine::new(Prefs::default()).decompress_file(&src, &dst).unwrap();
    assert_eq!(fs::read(&dst).unwrap().len(), 0);
}

#[test]
fn status_surface() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_container(dir.path(), "x.lzo", b"status surface data");
    assert_eq!(lzopack::decompress(&src, dir.path().join("x")), 0);
    assert_eq!(
        lzopack::decompress(dir.path().join("absent.lzo"), dir.path().join("absent")),
        1
    );
}

#[test]
fn keeps_source_mtime_when_asked() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_container(dir.path(), "t.lzo", b"timestamped");
    let stamp = FileTime::from_unix_time(1_000_000_000, 0);
    filetime::set_file_mtime(&src, stamp).unwrap();

    let mut prefs = Prefs::default();
    prefs.set_preserve_mtime(true);
    let dst = dir.path().join("t");
    Engine::new(prefs).decompress_file(&src, &dst).unwrap();

    let meta = fs::metadata(&dst).unwrap();
    assert_eq!(FileTime::from_last_modification_time(&meta), stamp);
}

// ─────────────────────────────────────────────────────────────────────────────
// Malformed containers
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn shorter_than_prefix_is_corrupt_and_allocates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("short.lzo");
    fs::write(&src, [7u8, 0, 0]).unwrap();

    let engine = Engine::with_parts(Lzo1x1, StdFileIo, TrackingAllocator::default(), Prefs::default());
    let err = engine.decompress_file(&src, dir.path().join("short")).unwrap_err();
    assert!(matches!(err, DecompressError::CorruptContainer { .. }));
    assert_eq!(engine.allocator().calls(), 0);
    assert!(!dir.path().join("short").exists());
}

#[test]
fn prefix_only_with_nonzero_length_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("p.lzo");
    fs::write(&src, 10u32.to_le_bytes()).unwrap();
    let err = Engine::new(Prefs::default())
        .decompress_file(&src, dir.path().join("p"))
        .unwrap_err();
    assert!(matches!(err, DecompressError::CorruptContainer { .. }));
}

#[test]
fn prefix_larger_than_stream_is_corrupt() {
    let container = Engine::new(Prefs::default()).compress_bytes(&sample_data(2000)).unwrap();
    let err = Engine::new(Prefs::default())
        .decompress_bytes(&with_prefix(&container, 2010))
        .unwrap_err();
    assert!(matches!(err, DecompressError::CorruptContainer { .. }), "{err:?}");
}

#[test]
fn prefix_smaller_than_stream_is_an_output_overrun() {
    let container = Engine::new(Prefs::default()).compress_bytes(&sample_data(2000)).unwrap();
    let err = Engine::new(Prefs::default())
        .decompress_bytes(&with_prefix(&container, 1000))
        .unwrap_err();
    assert_eq!(err.lzo_code(), Some(LzoCode::OUTPUT_OVERRUN));
    assert!(matches!(
        err,
        DecompressError::DecompressionFailure { kind: LzoErrorKind::OutputOverrun, .. }
    ));
}

#[test]
fn truncated_payload_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let container = Engine::new(Prefs::default()).compress_bytes(&sample_data(5000)).unwrap();
    let src = dir.path().join("cut.lzo");
    fs::write(&src, &container[..container.len() - 3]).unwrap();
    let dst = dir.path().join("cut");

    let engine = Engine::with_parts(Lzo1x1, StdFileIo, TrackingAllocator::default(), Prefs::default());
    assert!(engine.decompress_file(&src, &dst).is_err());
    assert_eq!(engine.allocator().live(), 0);
    assert!(!dst.exists());
}

#[test]
fn garbage_payload_fails() {
    let mut container = 64u32.to_le_bytes().to_vec();
    container.extend_from_slice(&[0xFFu8; 40]);
    assert!(Engine::new(Prefs::default()).decompress_bytes(&container).is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// Injected faults
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn allocation_failures_release_everything() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_container(dir.path(), "a.lzo", &sample_data(8000));
    let dst = dir.path().join("a");

    for n in [1, 2] {
        let engine = Engine::with_parts(
            Lzo1x1,
            StdFileIo,
            TrackingAllocator::failing_on(n),
            Prefs::default(),
        );
        let err = engine.decompress_file(&src, &dst).unwrap_err();
        assert!(matches!(err, DecompressError::AllocationFailure { .. }), "{n}");
        assert_eq!(engine.allocator().live(), 0, "{n}");
        assert!(!dst.exists(), "{n}");
    }
}

#[test]
fn output_buffer_is_sized_from_the_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_container(dir.path(), "b.lzo", &sample_data(8000));

    let engine = Engine::with_parts(Lzo1x1, StdFileIo, TrackingAllocator::failing_on(2), Prefs::default());
    let err = engine.decompress_file(&src, dir.path().join("b")).unwrap_err();
    assert!(matches!(err, DecompressError::AllocationFailure { requested: 8000 }));
}

#[test]
fn read_and_write_faults() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_container(dir.path(), "c.lzo", &sample_data(8000));

    for fault in [Fault::Size, Fault::Open, Fault::ReadAfter(2), Fault::ReadAfter(100), Fault::Write] {
        let dst = dir.path().join("c");
        let engine = Engine::with_parts(Lzo1x1, FaultyFiles::new(fault), HeapAllocator, Prefs::default());
        let err = engine.decompress_file(&src, &dst).unwrap_err();
        assert!(matches!(err, DecompressError::Io { .. }), "{fault:?}: {err:?}");
        if fault != Fault::Write {
            assert_eq!(engine.files().writes(), 0, "{fault:?}");
        }
        assert!(!dst.exists(), "{fault:?}");
    }
}

#[test]
fn primitive_failure_is_reported_with_code() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_container(dir.path(), "d.lzo", b"some data to decode");
    let dst = dir.path().join("d");

    let codec = FailingCodec {
        decompress: Some(LzoCode::LOOKBEHIND_OVERRUN),
        ..FailingCodec::default()
    };
    let engine = Engine::with_parts(codec, StdFileIo, HeapAllocator, Prefs::default());
    let err = engine.decompress_file(&src, &dst).unwrap_err();
    assert_eq!(
        err.to_string(),
        "err_code:(-6) lookbehind overrun, Please use the binary access"
    );
    assert!(!dst.exists());
}
