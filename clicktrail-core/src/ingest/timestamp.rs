use crate::error::LineError;
use chrono::{DateTime, FixedOffset};

/// `10/Oct/2000:13:55:36 -0700`
pub const LOG_TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

pub fn parse_timestamp(text: &str) -> Result<DateTime<FixedOffset>, LineError> {
    let trimmed = text.trim().trim_start_matches('[').trim_end_matches(']');

    DateTime::parse_from_str(trimmed, LOG_TIMESTAMP_FORMAT).map_err(|e| LineError::Timestamp {
        raw: text.to_string(),
        source: e,
    })
}

pub fn format_timestamp(ts: &DateTime<FixedOffset>) -> String {
    ts.format(LOG_TIMESTAMP_FORMAT).to_string()
}
