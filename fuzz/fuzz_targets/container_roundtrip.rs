#![no_main]
use libfuzzer_sys::fuzz_target;

use lzopack::io::{Engine, Prefs};

fuzz_target!(|data: &[u8]| {
    let engine = Engine::new(Prefs::default());
    let container = engine.compress_bytes(data).expect("compression must not fail");
    assert!(container.len() <= 4 + lzopack::worst_case_size(data.len()));

    let recovered = engine
        .decompress_bytes(&container)
        .expect("a freshly written container must decode");
    assert_eq!(recovered, data, "container round-trip mismatch");
});
