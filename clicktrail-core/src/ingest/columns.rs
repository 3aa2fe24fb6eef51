use crate::conf::{ConfigError, LogConfig};
use crate::error::LineError;
use crate::ingest::LogRecord;

/// Result of looking up an optional column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLookup<'a> {
    /// The column is not part of the configured layout.
    NotConfigured,
    /// The column is configured but this line is too short.
    Missing,
    Present(&'a str),
}

impl<'a> FieldLookup<'a> {
    pub fn present(self) -> Option<&'a str> {
        match self {
            FieldLookup::Present(v) => Some(v),
            _ => None,
        }
    }
}

/// Typed access to the configured columns of a [`LogRecord`].
///
/// Built once at startup; construction rejects layouts where two required
/// fields share a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    session: usize,
    url: usize,
    referrer: usize,
    timestamp: usize,
    status: usize,
    user_agent: Option<usize>,
    vhost: Option<usize>,
}

impl ColumnMap {
    pub fn from_config(cfg: &LogConfig) -> Result<Self, ConfigError> {
        let mut named: Vec<(&'static str, usize)> = vec![
            ("url", cfg.url_column),
            ("referrer", cfg.referrer_column),
            ("timestamp", cfg.timestamp_column),
            ("status", cfg.status_column),
        ];
        if let Some(ua) = cfg.user_agent_column {
            named.push(("user_agent", ua));
        }
        if let Some(vhost) = cfg.vhost_column {
            named.push(("vhost", vhost));
        }

        for (i, (first, a)) in named.iter().enumerate() {
            for (second, b) in &named[i + 1..] {
                if a == b {
                    return Err(ConfigError::ColumnConflict {
                        first: *first,
                        second: *second,
                        column: *a,
                    });
                }
            }
        }

        Ok(Self {
            session: cfg.session_column,
            url: cfg.url_column,
            referrer: cfg.referrer_column,
            timestamp: cfg.timestamp_column,
            status: cfg.status_column,
            user_agent: cfg.user_agent_column,
            vhost: cfg.vhost_column,
        })
    }

    pub fn session<'a>(&self, record: &'a LogRecord) -> Result<&'a str, LineError> {
        required(record, "session", self.session)
    }

    pub fn url<'a>(&self, record: &'a LogRecord) -> Result<&'a str, LineError> {
        required(record, "url", self.url)
    }

    pub fn referrer<'a>(&self, record: &'a LogRecord) -> Result<&'a str, LineError> {
        required(record, "referrer", self.referrer)
    }

    pub fn status<'a>(&self, record: &'a LogRecord) -> Option<&'a str> {
        record.get(self.status)
    }

    pub fn user_agent<'a>(&self, record: &'a LogRecord) -> FieldLookup<'a> {
        optional(record, self.user_agent)
    }

    pub fn vhost<'a>(&self, record: &'a LogRecord) -> FieldLookup<'a> {
        optional(record, self.vhost)
    }

    pub fn has_vhost(&self) -> bool {
        self.vhost.is_some()
    }

    /// The timestamp text without brackets, e.g. `10/Oct/2000:13:55:36 -0700`.
    ///
    /// Space splitting leaves the zone offset in the following column; it is
    /// re-joined when the timestamp field does not close its bracket.
    pub fn timestamp(&self, record: &LogRecord) -> Result<String, LineError> {
        let head = required(record, "timestamp", self.timestamp)?;

        let joined = match record.get(self.timestamp + 1) {
            Some(zone) if head.starts_with('[') && !head.ends_with(']') && zone.ends_with(']') => {
                format!("{head} {zone}")
            }
            _ => head.to_string(),
        };

        Ok(joined
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_string())
    }

    /// `(name, column, value)` for every configured column, used for the
    /// first-line preview.
    pub fn preview<'a>(&self, record: &'a LogRecord) -> Vec<(&'static str, usize, Option<&'a str>)> {
        let mut out = vec![
            ("session", self.session, record.get(self.session)),
            ("url", self.url, record.get(self.url)),
            ("referrer", self.referrer, record.get(self.referrer)),
            ("timestamp", self.timestamp, record.get(self.timestamp)),
            ("status", self.status, record.get(self.status)),
        ];
        if let Some(ua) = self.user_agent {
            out.push(("user_agent", ua, record.get(ua)));
        }
        if let Some(vhost) = self.vhost {
            out.push(("vhost", vhost, record.get(vhost)));
        }
        out
    }
}

fn required<'a>(
    record: &'a LogRecord,
    field: &'static str,
    column: usize,
) -> Result<&'a str, LineError> {
    record
        .get(column)
        .ok_or(LineError::MissingField { field, column })
}

fn optional(record: &LogRecord, column: Option<usize>) -> FieldLookup<'_> {
    match column {
        None => FieldLookup::NotConfigured,
        Some(c) => record
            .get(c)
            .map(FieldLookup::Present)
            .unwrap_or(FieldLookup::Missing),
    }
}
