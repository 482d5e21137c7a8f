//! Collection driver: repositories → runs → jobs → logs → report

pub mod collector;

pub use collector::{select_job, ReportCollector};

use crate::error::{Error, Result};
use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use std::fmt::{Display, Write};

/// Format the current time for the `_last_updated` stamp.
///
/// Uses `zone` when given, else host local time. An unsupported strftime
/// specifier is a configuration error rather than a panic.
pub fn report_timestamp(format: &str, zone: Option<Tz>) -> Result<String> {
    match zone {
        Some(tz) => format_stamp(&chrono::Utc::now().with_timezone(&tz), format),
        None => format_stamp(&chrono::Local::now(), format),
    }
}

fn format_stamp<Z>(at: &DateTime<Z>, format: &str) -> Result<String>
where
    Z: TimeZone,
    Z::Offset: Display,
{
    let mut stamp = String::new();
    write!(stamp, "{}", at.format(format)).map_err(|_| {
        Error::Config(format!("invalid timestamp_format '{}'", format))
    })?;
    Ok(stamp)
}
