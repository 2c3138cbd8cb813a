// Integration tests for Engine::compress_file / compress_bytes and the
// status-code `compress` surface.

use std::fs;

use lzopack::io::format::{decode_prefix, PREFIX_WIDTH};
use lzopack::io::{CompressError, Engine, HeapAllocator, Prefs, StdFileIo};
use lzopack::lzo::{worst_case_size, Lzo1x1, LzoCode, LzoErrorKind};

use crate::doubles::{sample_data, FailingCodec, Fault, FaultyFiles, OverclaimingCodec, TrackingAllocator};

fn tracked(alloc: TrackingAllocator) -> Engine<Lzo1x1, StdFileIo, TrackingAllocator> {
    Engine::with_parts(Lzo1x1, StdFileIo, alloc, Prefs::default())
}

// ─────────────────────────────────────────────────────────────────────────────
// Happy path
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn container_starts_with_le_original_length() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.bin");
    let dst = dir.path().join("in.bin.lzo");
    let data = sample_data(10_000);
    fs::write(&src, &data).unwrap();

    let stats = Engine::new(Prefs::default()).compress_file(&src, &dst).unwrap();
    let container = fs::read(&dst).unwrap();

    assert_eq!(&container[..PREFIX_WIDTH], &10_000u32.to_le_bytes());
    assert_eq!(stats.original_size, 10_000);
    assert_eq!(stats.container_size, container.len() as u64);
    assert!(container.len() <= PREFIX_WIDTH + worst_case_size(data.len()));
}

#[test]
fn empty_source_gives_four_zero_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("empty");
    let dst = dir.path().join("empty.lzo");
    fs::write(&src, b"").unwrap();

    let stats = Engine::new(Prefs::default()).compress_file(&src, &dst).unwrap();
    assert_eq!(fs::read(&dst).unwrap(), [0, 0, 0, 0]);
    assert_eq!(stats.container_size, 4);
}

#[test]
fn compress_bytes_matches_compress_file() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.bin");
    let dst = dir.path().join("in.bin.lzo");
    let data = sample_data(4096);
    fs::write(&src, &data).unwrap();

    let engine = Engine::new(Prefs::default());
    engine.compress_file(&src, &dst).unwrap();
    assert_eq!(engine.compress_bytes(&data).unwrap(), fs::read(&dst).unwrap());
}

#[test]
fn compressible_input_shrinks() {
    let data = vec![b'a'; 64 * 1024];
    let container = Engine::new(Prefs::default()).compress_bytes(&data).unwrap();
    assert!(container.len() < data.len() / 10);
    assert_eq!(decode_prefix(&container), Some(64 * 1024));
}

#[test]
fn status_surface_returns_zero_on_success() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.txt");
    fs::write(&src, b"hello hello hello").unwrap();
    assert_eq!(lzopack::compress(&src, dir.path().join("in.txt.lzo")), 0);
}

#[test]
fn status_surface_returns_one_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        lzopack::compress(dir.path().join("missing"), dir.path().join("missing.lzo")),
        1
    );
    assert!(!dir.path().join("missing.lzo").exists());
}

// ─────────────────────────────────────────────────────────────────────────────
// Allocation failures: nothing written, nothing leaked
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn input_buffer_allocation_failure() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.bin");
    let dst = dir.path().join("out.lzo");
    fs::write(&src, sample_data(1000)).unwrap();

    let engine = tracked(TrackingAllocator::failing_on(1));
    let err = engine.compress_file(&src, &dst).unwrap_err();
    assert!(matches!(err, CompressError::AllocationFailure { requested: 1000 }));
    assert_eq!(engine.allocator().live(), 0);
    assert!(!dst.exists());
}

#[test]
fn output_buffer_allocation_failure_releases_input_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.bin");
    let dst = dir.path().join("out.lzo");
    fs::write(&src, sample_data(1000)).unwrap();

    let engine = tracked(TrackingAllocator::failing_on(2));
    let err = engine.compress_file(&src, &dst).unwrap_err();
    assert!(matches!(
        err,
        CompressError::AllocationFailure { requested } if requested == worst_case_size(1000)
    ));
    assert_eq!(engine.allocator().calls(), 2);
    assert_eq!(engine.allocator().live(), 0);
    assert!(!dst.exists());
}

#[test]
fn successful_run_releases_every_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.bin");
    fs::write(&src, sample_data(3000)).unwrap();

    let engine = tracked(TrackingAllocator::default());
    engine.compress_file(&src, dir.path().join("out.lzo")).unwrap();
    assert_eq!(engine.allocator().calls(), 2);
    assert_eq!(engine.allocator().live(), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Filesystem failures
// ─────────────────────────────────────────────────────────────────────────────

fn faulty(fault: Fault) -> Engine<Lzo1x1, FaultyFiles, HeapAllocator> {
    Engine::with_parts(Lzo1x1, FaultyFiles::new(fault), HeapAllocator, Prefs::default())
}

#[test]
fn missing_source_is_an_io_error_naming_the_source() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("nope.bin");
    let err = Engine::new(Prefs::default())
        .compress_file(&src, dir.path().join("nope.lzo"))
        .unwrap_err();
    match err {
        CompressError::Io { path, .. } => assert_eq!(path, src),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn size_query_failure_happens_before_allocation() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.bin");
    fs::write(&src, b"abc").unwrap();

    let engine = Engine::with_parts(
        Lzo1x1,
        FaultyFiles::new(Fault::Size),
        TrackingAllocator::default(),
        Prefs::default(),
    );
    assert!(matches!(
        engine.compress_file(&src, dir.path().join("o")),
        Err(CompressError::Io { .. })
    ));
    assert_eq!(engine.allocator().calls(), 0);
    assert_eq!(engine.files().writes(), 0);
}

#[test]
fn open_and_read_failures_do_not_write() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.bin");
    fs::write(&src, sample_data(5000)).unwrap();

    for fault in [Fault::Open, Fault::ReadAfter(0), Fault::ReadAfter(4000)] {
        let dst = dir.path().join("out.lzo");
        let engine = faulty(fault);
        assert!(
            matches!(engine.compress_file(&src, &dst), Err(CompressError::Io { .. })),
            "{fault:?}"
        );
        assert_eq!(engine.files().writes(), 0, "{fault:?}");
        assert!(!dst.exists(), "{fault:?}");
    }
}

#[test]
fn write_failure_names_the_destination() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.bin");
    let dst = dir.path().join("out.lzo");
    fs::write(&src, b"payload payload").unwrap();

    let engine = faulty(Fault::Write);
    match engine.compress_file(&src, &dst).unwrap_err() {
        CompressError::Io { path, .. } => assert_eq!(path, dst),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(engine.files().writes(), 1);
}

#[test]
fn existing_destination_is_kept_without_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.bin");
    let dst = dir.path().join("in.bin.lzo");
    fs::write(&src, b"new content").unwrap();
    fs::write(&dst, b"old").unwrap();

    let mut prefs = Prefs::default();
    prefs.set_overwrite(false);
    let err = Engine::new(prefs).compress_file(&src, &dst).unwrap_err();
    match err {
        CompressError::Io { source, .. } => {
            assert_eq!(source.kind(), std::io::ErrorKind::AlreadyExists)
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(fs::read(&dst).unwrap(), b"old");
}

#[test]
fn atomic_write_produces_same_container() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.bin");
    fs::write(&src, sample_data(20_000)).unwrap();

    let plain = dir.path().join("plain.lzo");
    let atomic = dir.path().join("atomic.lzo");
    Engine::new(Prefs::default()).compress_file(&src, &plain).unwrap();
    let mut prefs = Prefs::default();
    prefs.set_atomic(true);
    Engine::new(prefs).compress_file(&src, &atomic).unwrap();

    assert_eq!(fs::read(&plain).unwrap(), fs::read(&atomic).unwrap());
    // no stray temporaries left next to the destination
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
}

// ─────────────────────────────────────────────────────────────────────────────
// Primitive failures
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn primitive_failure_keeps_code_and_kind() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.bin");
    let dst = dir.path().join("out.lzo");
    fs::write(&src, b"some bytes").unwrap();

    let codec = FailingCodec {
        compress: Some(LzoCode::ERROR),
        ..FailingCodec::default()
    };
    let engine = Engine::with_parts(codec, StdFileIo, HeapAllocator, Prefs::default());
    let err = engine.compress_file(&src, &dst).unwrap_err();

    assert_eq!(err.lzo_code(), Some(LzoCode::ERROR));
    assert!(matches!(
        err,
        CompressError::CompressionFailure { kind: LzoErrorKind::Error, .. }
    ));
    let msg = err.to_string();
    assert!(msg.contains("err_code:(-1)"), "{msg}");
    assert!(msg.contains("Please use the binary access"), "{msg}");
    assert!(!dst.exists());
}

#[test]
fn unknown_primitive_code_is_reported_as_unknown() {
    let codec = FailingCodec {
        compress: Some(LzoCode(-42)),
        ..FailingCodec::default()
    };
    let engine = Engine::with_parts(codec, StdFileIo, HeapAllocator, Prefs::default());
    let err = engine.compress_bytes(b"abc").unwrap_err();
    assert!(err.to_string().contains("err_code:(-42) unknown"));
}

#[test]
fn overlong_primitive_result_is_an_output_overrun() {
    let engine = Engine::with_parts(OverclaimingCodec, StdFileIo, HeapAllocator, Prefs::default());
    let err = engine.compress_bytes(b"abcdef").unwrap_err();
    assert_eq!(err.lzo_code(), Some(LzoCode::OUTPUT_OVERRUN));
}

#[test]
fn empty_input_never_reaches_the_primitive() {
    let codec = FailingCodec {
        compress: Some(LzoCode::ERROR),
        ..FailingCodec::default()
    };
    let engine = Engine::with_parts(codec, StdFileIo, HeapAllocator, Prefs::default());
    assert_eq!(engine.compress_bytes(b"").unwrap(), [0, 0, 0, 0]);
}

#[test]
fn repeating_pattern_compresses_and_round_trips() {
    let data: Vec<u8> = [0xDE, 0xAD, 0xBE, 0xEF].iter().copied().cycle().take(10_000).collect();
    let engine = Engine::new(Prefs::default());
    let container = engine.compress_bytes(&data).unwrap();
    assert!(container.len() - PREFIX_WIDTH < 10_000);
    assert_eq!(engine.decompress_bytes(&container).unwrap(), data);
}
