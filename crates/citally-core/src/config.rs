//! Report configuration loading
//!
//! JSON format:
//! ```json
//! {
//!   "org": "acme-labs",
//!   "group_to_section": { "01": "Monday Morning", "02": "Tuesday" },
//!   "actions": { "ci": ["unit-test", "lint-test"] },
//!   "timezone": "America/New_York"
//! }
//! ```
//!
//! Files ending in `.yaml` / `.yml` are read as YAML with the same keys.
//! Actions are collected in the order they are listed.

use crate::error::{Error, Result};
use chrono_tz::Tz;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Job preferred when a run has several jobs
pub const DEFAULT_PREFERRED_JOB: &str = "run_tests";

/// `_last_updated` format, chrono strftime syntax
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M %p %Z";

fn default_preferred_job() -> String {
    DEFAULT_PREFERRED_JOB.to_string()
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

/// Static configuration, loaded once and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Organization whose repositories are scanned
    pub org: String,

    /// Two-digit group code → section label
    #[serde(default)]
    pub group_to_section: BTreeMap<String, String>,

    /// Workflow (action) name → expected test names
    #[serde(default)]
    pub actions: IndexMap<String, Vec<String>>,

    /// Name of the job whose log is parsed; falls back to the first job
    #[serde(default = "default_preferred_job")]
    pub preferred_job: String,

    /// strftime format of the `_last_updated` stamp
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// IANA zone of the stamp (e.g. `America/New_York`); host local time when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl ReportConfig {
    /// Minimal config for an organization, with empty tables
    pub fn new(org: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            group_to_section: BTreeMap::new(),
            actions: IndexMap::new(),
            preferred_job: default_preferred_job(),
            timestamp_format: default_timestamp_format(),
            timezone: None,
        }
    }

    /// Parse and validate JSON configuration text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| Error::Config(format!("invalid JSON configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate YAML configuration text
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text).map_err(|e| Error::Yaml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, picking the parser from the extension
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "failed to read configuration '{}': {}",
                path.display(),
                e
            ))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            _ => Self::from_json_str(&text),
        }
    }

    /// Reject configurations that cannot produce a report
    pub fn validate(&self) -> Result<()> {
        if self.org.trim().is_empty() {
            return Err(Error::Config("'org' must not be empty".to_string()));
        }
        if self.preferred_job.is_empty() {
            return Err(Error::Config("'preferred_job' must not be empty".to_string()));
        }
        if self.timestamp_format.is_empty() {
            return Err(Error::Config(
                "'timestamp_format' must not be empty".to_string(),
            ));
        }
        self.zone()?;
        Ok(())
    }

    /// The configured stamp zone, `None` for host local time
    pub fn zone(&self) -> Result<Option<Tz>> {
        match self.timezone.as_deref() {
            None => Ok(None),
            Some(name) => name
                .parse::<Tz>()
                .map(Some)
                .map_err(|e| Error::Config(format!("invalid timezone '{}': {}", name, e))),
        }
    }

    /// Group codes that can never match a `{:02}` lookup key
    pub fn unreachable_group_codes(&self) -> Vec<&str> {
        self.group_to_section
            .keys()
            .map(String::as_str)
            .filter(|code| {
                code.len() < 2
                    || !code.bytes().all(|b| b.is_ascii_digit())
                    || (code.len() > 2 && code.starts_with('0'))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const JSON: &str = r#"{
        "org": "acme-labs",
        "group_to_section": { "01": "Monday Morning", "02": "Tuesday" },
        "actions": { "ci": ["unit-test", "lint-test"], "nightly": ["soak-test"] }
    }"#;

    #[test]
    fn test_from_json() {
        let config = ReportConfig::from_json_str(JSON).unwrap();
        assert_eq!(config.org, "acme-labs");
        assert_eq!(config.group_to_section.get("02").map(String::as_str), Some("Tuesday"));
        assert_eq!(config.actions["ci"], vec!["unit-test", "lint-test"]);
        assert_eq!(config.preferred_job, DEFAULT_PREFERRED_JOB);
        assert_eq!(config.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
    }

    #[test]
    fn test_from_yaml() {
        let yaml = "org: acme-labs\ngroup_to_section:\n  \"01\": teamA\nactions:\n  ci:\n    - unit-test\npreferred_job: test\n";
        let config = ReportConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.group_to_section["01"], "teamA");
        assert_eq!(config.actions["ci"], vec!["unit-test"]);
        assert_eq!(config.preferred_job, "test");
    }

    #[test]
    fn test_actions_keep_listed_order() {
        let config =
            ReportConfig::from_json_str(r#"{"org": "a", "actions": {"zeta": [], "alpha": [], "mid": []}}"#)
                .unwrap();
        let names: Vec<&str> = config.actions.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);

        let yaml = "org: a\nactions:\n  zeta: []\n  alpha: []\n  mid: []\n";
        let config = ReportConfig::from_yaml_str(yaml).unwrap();
        let names: Vec<&str> = config.actions.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_timezone() {
        let config = ReportConfig::from_json_str(r#"{"org": "a"}"#).unwrap();
        assert_eq!(config.zone().unwrap(), None);

        let config =
            ReportConfig::from_json_str(r#"{"org": "a", "timezone": "America/New_York"}"#).unwrap();
        assert_eq!(config.zone().unwrap(), Some(chrono_tz::America::New_York));
    }

    #[test]
    fn test_unknown_timezone_rejected() {
        let err = ReportConfig::from_json_str(r#"{"org": "a", "timezone": "Mars/Olympus"}"#)
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn test_tables_default_to_empty() {
        let config = ReportConfig::from_json_str(r#"{"org": "acme"}"#).unwrap();
        assert!(config.group_to_section.is_empty());
        assert!(config.actions.is_empty());
    }

    #[test]
    fn test_missing_org_rejected() {
        let err = ReportConfig::from_json_str(r#"{"actions": {}}"#).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }

    #[test]
    fn test_empty_org_rejected() {
        let err = ReportConfig::from_json_str(r#"{"org": "  "}"#).unwrap_err();
        assert!(err.to_string().contains("'org' must not be empty"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ReportConfig::from_yaml_str("org: [unclosed").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Yaml);
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::TempDir::new().unwrap();

        let json_path = dir.path().join("config.json");
        std::fs::write(&json_path, JSON).unwrap();
        assert_eq!(ReportConfig::load(&json_path).unwrap().org, "acme-labs");

        let yaml_path = dir.path().join("config.yml");
        let mut f = std::fs::File::create(&yaml_path).unwrap();
        writeln!(f, "org: yaml-org").unwrap();
        drop(f);
        assert_eq!(ReportConfig::load(&yaml_path).unwrap().org, "yaml-org");
    }

    #[test]
    fn test_load_missing_file() {
        let err = ReportConfig::load(Path::new("/nonexistent/config.json")).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }

    #[test]
    fn test_unreachable_group_codes() {
        let mut config = ReportConfig::new("acme");
        for code in ["01", "7", "ab", "123", "012"] {
            config.group_to_section.insert(code.to_string(), "s".to_string());
        }
        assert_eq!(config.unreachable_group_codes(), vec!["012", "7", "ab"]);
    }
}
