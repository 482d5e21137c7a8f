//! Repository name → section label resolution
//!
//! Repositories are named after the group that owns them (`group07-alpha`,
//! `Group12_fpga`). The group number, zero-padded to two digits, keys into the
//! configured `group_to_section` table.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static GROUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)group(\d+)").expect("group pattern compiles"));

/// Cheap pre-filter applied to the organization listing.
#[inline]
pub fn is_group_repository(name: &str) -> bool {
    name.to_ascii_lowercase().contains("group")
}

/// Extract the group number from a repository name.
///
/// Returns `None` when the name has no `group<digits>` token or the digits do
/// not fit in a `u32`.
pub fn parse_group(name: &str) -> Option<u32> {
    GROUP_RE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// Two-digit lookup key for a group number (`7` → `"07"`, `123` → `"123"`).
#[inline]
pub fn group_key(group: u32) -> String {
    format!("{:02}", group)
}

/// Maps repository names to section labels through a borrowed table.
#[derive(Debug, Clone, Copy)]
pub struct SectionResolver<'a> {
    table: &'a BTreeMap<String, String>,
}

impl<'a> SectionResolver<'a> {
    /// Create a resolver over a `group code → section` table
    pub fn new(table: &'a BTreeMap<String, String>) -> Self {
        Self { table }
    }

    /// Section label for `repo_name`, or `None` when the repository should be
    /// skipped.
    ///
    /// Group number zero is treated like a missing group.
    pub fn resolve(&self, repo_name: &str) -> Option<&'a str> {
        let group = parse_group(repo_name).filter(|&g| g != 0)?;
        self.table.get(&group_key(group)).map(String::as_str)
    }
}
