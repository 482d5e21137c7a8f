//! Human-readable report view

use crate::report::{Report, ReportEntry};
use std::fmt::Write;

/// Display title for a test: the name without its `-test` suffix.
#[inline]
pub fn test_title(test: &str) -> &str {
    test.strip_suffix("-test").unwrap_or(test)
}

fn percent(entry: &ReportEntry) -> String {
    match entry.pass_rate() {
        Some(rate) => format!("{:>3.0}%", rate * 100.0),
        None => "  -".to_string(),
    }
}

/// Render the report as an indented text table.
///
/// One block per action, one line per test, one row per section with its
/// pass/fail counts and pass rate.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();

    if report.is_empty() {
        out.push_str("No runs recorded.\n");
    }

    for (action, tests) in &report.actions {
        let _ = writeln!(out, "{action}");
        let _ = writeln!(out, "{}", "=".repeat(action.chars().count()));

        for (test, sections) in tests {
            let _ = writeln!(out, "  {}", test_title(test));
            let width = sections.keys().map(|s| s.chars().count()).max().unwrap_or(0);
            for (section, entry) in sections {
                let _ = writeln!(
                    out,
                    "    {section:<width$}  pass {:>4}  fail {:>4}  {}",
                    entry.pass,
                    entry.fail,
                    percent(entry),
                );
            }
        }
        out.push('\n');
    }

    if let Some(ref stamp) = report.last_updated {
        let _ = writeln!(out, "Last updated: {stamp}");
    }

    out
}
