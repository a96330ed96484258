//! Fuzz target for the JSON document boundary.
//!
//! This fuzzer tests that document parsing and rendering:
//! 1. Never panic on arbitrary text
//! 2. Round-trip any document that parses
//! 3. Keep loading in step with parsing

#![no_main]

use libfuzzer_sys::fuzz_target;
use trellis::Loader;
use trellis::json::{document_to_text, parse_document};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs
    if data.len() > 10_000 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(records) = parse_document(text) {
            let rendered = document_to_text(&records, false);
            let reparsed =
                parse_document(&rendered).expect("rendered document failed to reparse");
            assert_eq!(records, reparsed);
        }

        let _ = Loader::new().load_json_str(text);
    }
});
