// Integration tests for the LZO1X-1 primitive pair.

use lzopack::lzo::{
    lzo1x_1_compress, lzo1x_decompress_safe, worst_case_size, BlockCodec, Lzo1x1, LzoCode,
    Workspace, WorkspacePool,
};

fn xorshift(len: usize, mut state: u32) -> Vec<u8> {
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

fn round_trip(data: &[u8]) -> Vec<u8> {
    let mut wrk = Workspace::new();
    let mut packed = vec![0u8; worst_case_size(data.len())];
    let n = lzo1x_1_compress(data, &mut packed, &mut wrk).unwrap();
    assert!(n <= worst_case_size(data.len()));

    let mut out = vec![0u8; data.len()];
    let m = lzo1x_decompress_safe(&packed[..n], &mut out).unwrap();
    assert_eq!(m, data.len());
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Round trips over input shapes the encoder treats differently
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn tiny_inputs() {
    for len in 1..=40 {
        let data = xorshift(len, len as u32 + 1);
        assert_eq!(round_trip(&data), data, "len {len}");
    }
}

#[test]
fn random_data_stays_within_bound() {
    for &len in &[100usize, 4096, 49_151, 49_152, 49_153, 200_000] {
        let data = xorshift(len, 0xDEAD_BEEF);
        assert_eq!(round_trip(&data), data, "len {len}");
    }
}

#[test]
fn long_runs() {
    let data = vec![0u8; 300_000];
    assert_eq!(round_trip(&data), data);
}

#[test]
fn repeated_text() {
    let data = "lorem ipsum dolor sit amet, consectetur adipiscing elit\n"
        .repeat(2000)
        .into_bytes();
    assert_eq!(round_trip(&data), data);
}

#[test]
fn far_matches_across_blocks() {
    let head = xorshift(3000, 7);
    let mut data = head.clone();
    data.extend(std::iter::repeat(0x55).take(40_000));
    data.extend_from_slice(&head);
    data.extend(xorshift(10_000, 9));
    data.extend_from_slice(&head);
    assert_eq!(round_trip(&data), data);
}

#[test]
fn workspace_contents_do_not_leak_between_calls() {
    let a = "alpha beta gamma ".repeat(500).into_bytes();
    let b = xorshift(8000, 42);
    let mut wrk = Workspace::new();

    let mut first = vec![0u8; worst_case_size(b.len())];
    let n_fresh = lzo1x_1_compress(&b, &mut first, &mut Workspace::new()).unwrap();

    let mut scratch = vec![0u8; worst_case_size(a.len())];
    lzo1x_1_compress(&a, &mut scratch, &mut wrk).unwrap();
    let mut second = vec![0u8; worst_case_size(b.len())];
    let n_reused = lzo1x_1_compress(&b, &mut second, &mut wrk).unwrap();

    assert_eq!(&first[..n_fresh], &second[..n_reused]);
}

#[test]
fn pooled_workspace_round_trip() {
    let pool = WorkspacePool::new();
    let data = "pooled ".repeat(1000).into_bytes();
    let mut packed = vec![0u8; worst_case_size(data.len())];
    let n = {
        let mut ws = pool.checkout().unwrap();
        Lzo1x1.compress(&data, &mut packed, &mut ws).unwrap()
    };
    assert_eq!(pool.idle(), 1);

    let mut out = vec![0u8; data.len()];
    assert_eq!(Lzo1x1.decompress(&packed[..n], &mut out).unwrap(), data.len());
    assert_eq!(out, data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Decoder bounds
// ─────────────────────────────────────────────────────────────────────────────

fn packed(data: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; worst_case_size(data.len())];
    let n = lzo1x_1_compress(data, &mut out, &mut Workspace::new()).unwrap();
    out.truncate(n);
    out
}

#[test]
fn short_output_buffer_is_an_output_overrun() {
    let data = xorshift(1000, 3);
    let mut out = vec![0u8; 999];
    assert_eq!(
        lzo1x_decompress_safe(&packed(&data), &mut out),
        Err(LzoCode::OUTPUT_OVERRUN)
    );
}

#[test]
fn every_truncation_fails_cleanly() {
    let data = "truncate me please ".repeat(50).into_bytes();
    let stream = packed(&data);
    let mut out = vec![0u8; data.len()];
    for cut in 0..stream.len() {
        assert!(lzo1x_decompress_safe(&stream[..cut], &mut out).is_err(), "cut {cut}");
    }
}

#[test]
fn trailing_bytes_are_not_consumed() {
    let data = b"some small input for trailing check".to_vec();
    let mut stream = packed(&data);
    stream.push(0);
    let mut out = vec![0u8; data.len()];
    assert_eq!(
        lzo1x_decompress_safe(&stream, &mut out),
        Err(LzoCode::INPUT_NOT_CONSUMED)
    );
}

#[test]
fn arbitrary_bytes_never_panic() {
    let mut out = vec![0u8; 4096];
    for seed in 1..200u32 {
        let junk = xorshift((seed as usize * 7) % 300 + 1, seed);
        let _ = lzo1x_decompress_safe(&junk, &mut out);
    }
}
