//! Report collection over a [`CiSource`]

use crate::config::ReportConfig;
use crate::coordination::report_timestamp;
use crate::error::Result;
use crate::log::parse_log;
use crate::report::Report;
use crate::section::{is_group_repository, SectionResolver};
use crate::source::CiSource;
use crate::types::{CollectStats, WorkflowJob};
use tracing::{debug, info, warn};

/// Preferred job by name, else the first job.
pub fn select_job<'j>(jobs: &'j [WorkflowJob], preferred: &str) -> Option<&'j WorkflowJob> {
    jobs.iter()
        .find(|job| job.name == preferred)
        .or_else(|| jobs.first())
}

/// Drives one collection pass: sequential, one repository and one action
/// at a time.
pub struct ReportCollector<'a, S> {
    source: &'a S,
    config: &'a ReportConfig,
}

impl<'a, S: CiSource> ReportCollector<'a, S> {
    /// Create a collector over a source and configuration
    pub fn new(source: &'a S, config: &'a ReportConfig) -> Self {
        Self { source, config }
    }

    /// Build a fresh, stamped report.
    ///
    /// Only the organization listing and the timestamp can fail the pass;
    /// every per-repository and per-action problem is logged and skipped.
    pub async fn collect(&self) -> Result<(Report, CollectStats)> {
        let mut report = Report::new();
        let mut stats = CollectStats::default();
        let org = self.config.org.as_str();

        for code in self.config.unreachable_group_codes() {
            warn!(code, "group_to_section key is not a two-digit code and will never match");
        }

        // Step 1: Organization listing, narrowed to group repositories
        let repositories = self.source.list_repositories(org).await?;
        let resolver = SectionResolver::new(&self.config.group_to_section);

        for repo in repositories.iter().filter(|r| is_group_repository(&r.name)) {
            stats.repositories_seen += 1;

            // Step 2: Section, or skip the repository for every action
            let Some(section) = resolver.resolve(&repo.name) else {
                debug!(repo = %repo.name, "no section for repository, skipping");
                stats.repositories_skipped += 1;
                continue;
            };

            // Step 3: One log per configured action, in listed order
            for (action, tests) in &self.config.actions {
                let Some(log) = self.fetch_action_log(&repo.name, action).await else {
                    stats.actions_skipped += 1;
                    continue;
                };

                // Step 4: Parse and merge
                let outcomes = parse_log(&log);
                report.record_run(action, &outcomes, section, tests.as_slice());
                stats.runs_recorded += 1;

                info!(
                    repo = %repo.name,
                    action = %action,
                    section = %section,
                    parsed = outcomes.len(),
                    "recorded run"
                );
            }
        }

        report.stamp(report_timestamp(
            &self.config.timestamp_format,
            self.config.zone()?,
        )?);

        info!(
            repositories = stats.repositories_seen,
            skipped = stats.repositories_skipped,
            recorded = stats.runs_recorded,
            actions_skipped = stats.actions_skipped,
            "collection finished"
        );

        Ok((report, stats))
    }

    /// Latest completed run → job → raw log, or `None` at the first gap.
    async fn fetch_action_log(&self, repo: &str, action: &str) -> Option<String> {
        let org = self.config.org.as_str();

        let run = match self.source.latest_completed_run(org, repo, action).await {
            Ok(Some(run)) => run,
            Ok(None) => {
                debug!(repo, action, "no completed run");
                return None;
            }
            Err(e) => {
                warn!(repo, action, error = %e, "run lookup failed");
                return None;
            }
        };

        let jobs = match self.source.list_jobs(org, repo, run.id).await {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!(repo, action, run_id = run.id, error = %e, "job listing failed");
                return None;
            }
        };

        let Some(job) = select_job(&jobs, &self.config.preferred_job) else {
            debug!(repo, action, run_id = run.id, "run has no jobs");
            return None;
        };

        match self.source.fetch_job_log(org, repo, job.id).await {
            Ok(log) => Some(log),
            Err(e) => {
                warn!(repo, action, job_id = job.id, error = %e, "log fetch failed");
                None
            }
        }
    }
}
