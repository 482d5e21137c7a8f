#![no_main]
use citally_core::section::{group_key, is_group_repository, parse_group, SectionResolver};
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeMap;

fuzz_target!(|data: &[u8]| {
    if let Ok(name) = std::str::from_utf8(data) {
        let group = parse_group(name);
        if group.is_some() {
            assert!(is_group_repository(name));
        }

        let mut table = BTreeMap::new();
        if let Some(n) = group {
            table.insert(group_key(n), "section".to_string());
        }

        let resolved = SectionResolver::new(&table).resolve(name);
        match group {
            Some(0) | None => assert!(resolved.is_none()),
            Some(_) => assert_eq!(resolved, Some("section")),
        }
    }
});
