//! Test outcome scanning

use crate::types::TestOutcomes;
use once_cell::sync::Lazy;
use regex::Regex;

/// `<word(_word)*>-test`, then the nearest `passed` / `failed` in any ASCII
/// case, across newlines.
static RESULT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(\w+(?:_\w+)*(?-u:-test)).*?(?-u:(passed|failed))")
        .expect("result pattern compiles")
});

/// Scan `text` for `<name>-test ... passed|FAILED` pairs.
///
/// Matches are taken left to right without overlap. A name seen twice keeps
/// the outcome of its last occurrence. No matches gives an empty map.
pub fn parse_results(text: &str) -> TestOutcomes {
    let mut outcomes = TestOutcomes::new();
    for caps in RESULT_RE.captures_iter(text) {
        let (Some(name), Some(outcome)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        outcomes.insert(
            name.as_str().to_owned(),
            outcome.as_str().eq_ignore_ascii_case("passed"),
        );
    }
    outcomes
}
