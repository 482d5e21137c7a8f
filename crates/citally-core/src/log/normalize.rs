//! Terminal escape stripping

use memchr::memchr;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// ANSI CSI sequence: ESC `[`, parameter bytes, intermediate bytes, final byte.
static CSI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1B\[[0-?]*[ -/]*[@-~]").expect("CSI pattern compiles"));

/// Remove every ANSI CSI escape sequence from `text`.
///
/// All other characters, newlines included, are preserved. Returns the
/// input borrowed when it holds no ESC byte. The result is a fixed point:
/// stripping it again changes nothing.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if memchr(0x1B, text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }

    let mut current = match CSI_RE.replace_all(text, "") {
        Cow::Borrowed(unchanged) => return Cow::Borrowed(unchanged),
        Cow::Owned(stripped) => stripped,
    };

    // Removing one sequence can splice its neighbours into a new one
    // (`ESC ESC[0m [0m`), so repeat until nothing matches.
    loop {
        let next = match CSI_RE.replace_all(&current, "") {
            Cow::Borrowed(_) => None,
            Cow::Owned(stripped) => Some(stripped),
        };
        match next {
            Some(stripped) => current = stripped,
            None => break,
        }
    }

    Cow::Owned(current)
}
