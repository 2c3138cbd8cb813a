//! E2E Test Suite: container format
//!
//! Checks the on-disk layout produced by the public API: a 4-byte
//! little-endian original length followed by exactly one LZO1X stream, and
//! that files written by one entry point are read by every other.

use std::fs;

use lzopack::io::format::{decode_prefix, encode_prefix, PREFIX_WIDTH};
use lzopack::io::{read_container_info, Engine, Prefs};
use lzopack::lzo::{lzo1x_1_compress, lzo1x_decompress_safe, worst_case_size, Workspace};

fn text(len: usize) -> Vec<u8> {
    b"container format suite: abcdefghijklmnopqrstuvwxyz 0123456789\n"
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

#[test]
fn payload_is_a_bare_lzo1x_stream() {
    let data = text(30_000);
    let container = Engine::new(Prefs::default()).compress_bytes(&data).unwrap();

    let declared = decode_prefix(&container).unwrap() as usize;
    assert_eq!(declared, data.len());

    let mut out = vec![0u8; declared];
    let n = lzo1x_decompress_safe(&container[PREFIX_WIDTH..], &mut out).unwrap();
    assert_eq!(n, declared);
    assert_eq!(out, data);
}

#[test]
fn hand_built_container_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let data = text(12_345);
    let mut payload = vec![0u8; worst_case_size(data.len())];
    let n = lzo1x_1_compress(&data, &mut payload, &mut Workspace::new()).unwrap();

    let path = dir.path().join("hand.lzo");
    let mut bytes = encode_prefix(data.len() as u32).to_vec();
    bytes.extend_from_slice(&payload[..n]);
    fs::write(&path, bytes).unwrap();

    let out = dir.path().join("hand");
    assert_eq!(lzopack::decompress(&path, &out), 0);
    assert_eq!(fs::read(&out).unwrap(), data);
}

#[test]
fn prefix_byte_order_is_little_endian() {
    let data = vec![9u8; 0x0102_03];
    let container = Engine::new(Prefs::default()).compress_bytes(&data).unwrap();
    assert_eq!(&container[..4], &[0x03, 0x02, 0x01, 0x00]);
}

#[test]
fn file_and_memory_paths_agree() {
    let dir = tempfile::tempdir().unwrap();
    let data = text(70_000);
    let src = dir.path().join("src.bin");
    fs::write(&src, &data).unwrap();

    let on_disk = dir.path().join("src.bin.lzo");
    assert_eq!(lzopack::compress(&src, &on_disk), 0);
    let bytes = fs::read(&on_disk).unwrap();

    let engine = Engine::new(Prefs::default());
    assert_eq!(engine.compress_bytes(&data).unwrap(), bytes);
    assert_eq!(engine.decompress_bytes(&bytes).unwrap(), data);

    let info = read_container_info(&on_disk).unwrap();
    assert_eq!(info.original_size, data.len() as u64);
    assert_eq!(info.container_size, bytes.len() as u64);
}

#[test]
fn sizes_around_internal_block_length() {
    let engine = Engine::new(Prefs::default());
    for len in [0usize, 1, 3, 4, 5, 49_151, 49_152, 49_153, 98_305] {
        let data = text(len);
        let container = engine.compress_bytes(&data).unwrap();
        assert!(container.len() <= PREFIX_WIDTH + worst_case_size(len), "len {len}");
        assert_eq!(engine.decompress_bytes(&container).unwrap(), data, "len {len}");
    }
}

#[test]
fn output_is_deterministic() {
    let data = text(40_000);
    let a = Engine::new(Prefs::default()).compress_bytes(&data).unwrap();
    let b = Engine::new(Prefs::default()).compress_bytes(&data).unwrap();
    assert_eq!(a, b);
}
