#![no_main]
use citally_core::log::{extract_summary, parse_log};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let region = extract_summary(&text);
    assert!(text.contains(region));

    for name in parse_log(&text).keys() {
        assert!(name.to_ascii_lowercase().ends_with("-test"));
    }
});
