#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Bound the output so a hostile prefix cannot request gigabytes.
    let mut out = vec![0u8; 1 << 16];
    let _ = lzopack::lzo1x_decompress_safe(data, &mut out);

    if data.len() >= 4 {
        let declared = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        if declared <= 1 << 16 {
            let engine = lzopack::Engine::new(lzopack::Prefs::default());
            let _ = engine.decompress_bytes(data);
        }
    }
});
