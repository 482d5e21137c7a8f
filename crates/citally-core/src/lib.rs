//! # CITally Core
//!
//! Organization-wide CI test tallies from raw GitHub Actions job logs.
//!
//! For every repository whose name carries a group number, the latest
//! completed run of each configured workflow is located, the log of its test
//! job is downloaded, and per-test `passed` / `FAILED` outcomes are counted
//! into a nested `action → test → section` report.
//!
//! The pieces are usable on their own:
//! - [`log`]: ANSI stripping, summary narrowing, outcome parsing
//! - [`section`]: repository name → section label
//! - [`report`]: nested counters and their JSON shape
//! - [`coordination`]: the collection driver over any [`CiSource`]
//!
//! ## Example
//!
//! ```no_run
//! use citally_core::{collect_report, GitHubSource, ReportConfig};
//!
//! # async fn example() -> citally_core::Result<()> {
//! let config = ReportConfig::from_json_str(
//!     r#"{"org": "acme", "group_to_section": {"01": "teamA"}, "actions": {"ci": ["unit-test"]}}"#,
//! )?;
//! let source = GitHubSource::from_env()?;
//!
//! let report = collect_report(&source, &config).await?;
//! println!("{} actions", report.actions.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod coordination;
pub mod error;
pub mod fakes;
pub mod http;
pub mod log;
pub mod output;
pub mod report;
pub mod section;
pub mod source;
pub mod types;

pub use config::ReportConfig;
pub use coordination::ReportCollector;
pub use error::{Error, ErrorKind, Result};
pub use http::GitHubSource;
pub use log::parse_log;
pub use report::{Report, ReportEntry};
pub use source::CiSource;
pub use types::{CollectStats, Repository, TestOutcomes, WorkflowJob, WorkflowRun};

/// Collect a fresh, stamped report from `source`.
///
/// Shorthand for [`ReportCollector::collect`] when the stats are not needed.
pub async fn collect_report<S: CiSource>(source: &S, config: &ReportConfig) -> Result<Report> {
    let (report, _stats) = ReportCollector::new(source, config).collect().await?;
    Ok(report)
}

/// Synchronous variant of `collect_report`
///
/// This creates a current-thread Tokio runtime and blocks on the async
/// version. Prefer the async version if you're already in an async context.
pub fn collect_report_sync<S: CiSource>(source: &S, config: &ReportConfig) -> Result<Report> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Runtime(e.to_string()))?
        .block_on(collect_report(source, config))
}
