//! CI log processing: ANSI stripping, summary narrowing, outcome parsing
//!
//! The three stages are pure functions over `&str` and can be used on their
//! own. [`parse_log`] chains them in the order a raw job log needs.

pub mod normalize;
pub mod parser;
pub mod summary;

pub use normalize::strip_ansi;
pub use parser::parse_results;
pub use summary::extract_summary;

use crate::types::TestOutcomes;

/// Parse a raw job log into per-test outcomes.
///
/// Strips terminal escapes, narrows to the summary region, then scans for
/// `<name>-test ... passed|FAILED` pairs.
///
/// ```
/// let outcomes = citally_core::log::parse_log(
///     "\x1b[32mSummary\x1b[0m\nunit-test ... passed\nlint-test ... FAILED\n",
/// );
/// assert_eq!(outcomes.get("unit-test"), Some(&true));
/// assert_eq!(outcomes.get("lint-test"), Some(&false));
/// ```
pub fn parse_log(raw: &str) -> TestOutcomes {
    let clean = strip_ansi(raw);
    parse_results(extract_summary(&clean))
}

/// Outcome of a configured test; absent names count as failed.
#[inline]
pub fn passed(outcomes: &TestOutcomes, test: &str) -> bool {
    outcomes.get(test).copied().unwrap_or(false)
}
