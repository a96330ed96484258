//! Fuzz target for the delimited loader.
//!
//! This fuzzer tests that the load path:
//! 1. Never panics on malformed input
//! 2. Survives delimiter auto-detection on arbitrary text
//! 3. Produces schemas that accept the data they were inferred from

#![no_main]

use libfuzzer_sys::fuzz_target;
use trellis::Loader;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(source) = Loader::new().load_delimited_str(text) {
            let session = source
                .into_session()
                .expect("inferred schema rejected its own data");
            let _ = session.json_text();
        }
    }
});
