#![no_main]
use citally_core::log::strip_ansi;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let once = strip_ansi(s);
        assert!(once.len() <= s.len());

        // Fixed point
        let twice = strip_ansi(&once);
        assert_eq!(once.as_ref(), twice.as_ref());
    }
});
