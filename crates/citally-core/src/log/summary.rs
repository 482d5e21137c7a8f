//! Summary region narrowing
//!
//! CI logs are long and mention test names in places that are not results
//! (checkout output, build commands, echo lines). Narrowing to the region
//! that holds the result table cuts most false matches. This is a
//! heuristic: a log that prints `Summary` early keeps everything after it.

use memchr::memchr_iter;
use once_cell::sync::Lazy;
use regex::Regex;

static SUMMARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Summary").expect("summary pattern compiles"));

static SIM_TESTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Run sim tests").expect("sim tests pattern compiles"));

/// Return the part of `text` most likely to hold test results.
///
/// Priority:
/// 1. From the first case-insensitive `Summary` to the end of the text.
/// 2. From `Run sim tests` up to, not including, the first newline that is
///    followed by a non-whitespace character (or to the end).
/// 3. The whole input.
pub fn extract_summary(text: &str) -> &str {
    if let Some(m) = SUMMARY_RE.find(text) {
        return &text[m.start()..];
    }

    if let Some(m) = SIM_TESTS_RE.find(text) {
        let end = indented_block_end(text, m.end());
        return &text[m.start()..end];
    }

    text
}

/// Byte offset of the first `\n` at or after `from` whose next character is
/// not whitespace; `text.len()` when there is none.
fn indented_block_end(text: &str, from: usize) -> usize {
    let bytes = text.as_bytes();
    for offset in memchr_iter(b'\n', &bytes[from..]) {
        let newline = from + offset;
        if let Some(next) = text[newline + 1..].chars().next() {
            if !next.is_whitespace() {
                return newline;
            }
        }
    }
    text.len()
}
