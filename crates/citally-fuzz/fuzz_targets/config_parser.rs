#![no_main]
use citally_core::ReportConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(config) = ReportConfig::from_json_str(s) {
            assert!(!config.org.trim().is_empty());
            let _ = config.unreachable_group_codes();
        }
        let _ = ReportConfig::from_yaml_str(s);
    }
});
