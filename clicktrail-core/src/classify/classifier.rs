use crate::classify::{BotDetector, SkipReason, Verdict};
use crate::conf::{CleaningConfig, ConfigError};
use crate::error::LineError;
use crate::ingest::{ColumnMap, FieldLookup, LogRecord};
use crate::normalization::{host_of, parse_request_line};
use ahash::AHashSet;
use tracing::warn;

/// Decides whether a log line takes part in the analysis.
///
/// Matching order, cheapest and most selective first:
/// 1. File extension
/// 2. Bot user agents
/// 3. Undeclared virtual hosts (optional)
/// 4. HTTP status
/// 5. URL substrings (optional)
///
/// The first failing rule names the skip reason.
#[derive(Debug)]
pub struct LineClassifier {
    columns: ColumnMap,
    skip_extensions: AHashSet<String>,
    bots: BotDetector,
    declared_hosts: Option<AHashSet<String>>,
    accept_status: AHashSet<u16>,
    skip_urls: Vec<String>,
}

impl LineClassifier {
    pub fn new(columns: ColumnMap, cfg: &CleaningConfig) -> Result<Self, ConfigError> {
        if cfg.accept_status.is_empty() {
            return Err(ConfigError::EmptyAcceptStatus);
        }

        let declared_hosts = if cfg.skip_undeclared_hosts && columns.has_vhost() {
            let hosts: AHashSet<String> = cfg.declared_hostnames().into_iter().collect();
            if hosts.is_empty() {
                return Err(ConfigError::NoDeclaredHosts);
            }
            Some(hosts)
        } else {
            None
        };

        Ok(Self {
            columns,
            skip_extensions: cfg
                .skip_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            bots: BotDetector::from_config(cfg)?,
            declared_hosts,
            accept_status: cfg.accept_status.iter().copied().collect(),
            skip_urls: cfg
                .skip_urls
                .iter()
                .filter(|u| !u.is_empty())
                .map(|u| u.to_lowercase())
                .collect(),
        })
    }

    /// Classifies one record. `line` is only used for warnings.
    ///
    /// Errors when the URL rule needs a request path the line doesn't have.
    pub fn classify(&self, record: &LogRecord, line: u64) -> Result<Verdict, LineError> {
        //---------------------------------------------------------------------
        // 1. Extension
        //---------------------------------------------------------------------
        let request = self
            .columns
            .url(record)
            .ok()
            .and_then(|raw| parse_request_line(raw).ok());

        if let Some(ext) = request.as_ref().and_then(|r| r.extension()) {
            if self.skip_extensions.contains(&ext.to_ascii_lowercase()) {
                return Ok(Verdict::Skip(SkipReason::Ext));
            }
        }

        //---------------------------------------------------------------------
        // 2. Bots
        //---------------------------------------------------------------------
        match self.columns.user_agent(record) {
            FieldLookup::Present(ua) => {
                if self.bots.is_bot(ua) {
                    return Ok(Verdict::Skip(SkipReason::Bot));
                }
            }
            FieldLookup::Missing => warn!(line, "no user agent column in line"),
            FieldLookup::NotConfigured => {}
        }

        //---------------------------------------------------------------------
        // 3. Virtual hosts
        //---------------------------------------------------------------------
        if let Some(hosts) = &self.declared_hosts {
            match self.columns.vhost(record) {
                FieldLookup::Present(vhost) => {
                    if !hosts.contains(&host_of(vhost)) {
                        return Ok(Verdict::Skip(SkipReason::Host));
                    }
                }
                FieldLookup::Missing => warn!(line, "no virtual host column in line"),
                FieldLookup::NotConfigured => {}
            }
        }

        //---------------------------------------------------------------------
        // 4. Status
        //---------------------------------------------------------------------
        let accepted = self
            .columns
            .status(record)
            .and_then(|s| s.parse::<u16>().ok())
            .is_some_and(|code| self.accept_status.contains(&code));

        if !accepted {
            return Ok(Verdict::Skip(SkipReason::Status));
        }

        //---------------------------------------------------------------------
        // 5. URL substrings
        //---------------------------------------------------------------------
        if !self.skip_urls.is_empty() {
            let raw = self.columns.url(record)?;
            let path = parse_request_line(raw)
                .map_err(|e| LineError::request_line(raw, e))?
                .path()
                .to_lowercase();

            if self.skip_urls.iter().any(|skip| path.contains(skip.as_str())) {
                return Ok(Verdict::Skip(SkipReason::Url));
            }
        }

        Ok(Verdict::Keep)
    }
}
