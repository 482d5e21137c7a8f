//! Report file writer

use crate::error::{Error, Result};
use crate::report::Report;
use std::path::Path;

/// Report file reader/writer
pub struct ReportWriter;

impl ReportWriter {
    /// Write the report as pretty-printed JSON, replacing any previous file.
    ///
    /// Missing parent directories are created.
    pub fn write_json(path: &Path, report: &Report) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut content = serde_json::to_string_pretty(report)?;
        content.push('\n');
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load a previously written report
    pub fn read_json(path: &Path) -> Result<Report> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read report '{}': {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}
