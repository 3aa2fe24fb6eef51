use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fully resolved configuration for one analysis run.
///
/// Every section has defaults, so an empty `clicktrail.hcl` describes a
/// combined-format log analysed in batch mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClicktrailConfig {
    pub log: LogConfig,
    pub cleaning: CleaningConfig,
    pub reports: ReportsConfig,
}

/// Where the log lives and which (0-based) column holds what.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Applied over the column fields when the file is loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<LogPreset>,

    pub session_column: usize,
    pub url_column: usize,
    pub referrer_column: usize,
    pub timestamp_column: usize,
    pub status_column: usize,

    /// No bot cleaning when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent_column: Option<usize>,

    /// Undeclared-host skipping is only possible when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vhost_column: Option<usize>,

    /// Session identifier meaning "no session".
    pub no_session: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        let mut cfg = Self {
            path: None,
            preset: None,
            session_column: 0,
            url_column: 0,
            referrer_column: 0,
            timestamp_column: 0,
            status_column: 0,
            user_agent_column: None,
            vhost_column: None,
            no_session: "-".to_string(),
        };
        LogPreset::Combined.apply(&mut cfg);
        cfg
    }
}

/// Well known access log layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogPreset {
    /// Apache/nginx "combined" format, client address as the session id.
    Combined,
}

impl LogPreset {
    pub fn apply(self, cfg: &mut LogConfig) {
        match self {
            LogPreset::Combined => {
                cfg.session_column = 0;
                cfg.timestamp_column = 3;
                cfg.url_column = 5;
                cfg.status_column = 6;
                cfg.referrer_column = 8;
                cfg.user_agent_column = Some(9);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CleaningConfig {
    pub accept_status: Vec<u16>,
    pub skip_bot_tokens: Vec<String>,

    /// Also consult woothee's crawler database for user agents.
    pub detect_crawlers: bool,

    pub skip_extensions: Vec<String>,
    pub skip_urls: Vec<String>,
    pub skip_undeclared_hosts: bool,
    pub index_pages: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    pub host_aliases: Vec<String>,

    /// `URL<TAB>ALIAS` per line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_alias_file: Option<PathBuf>,

    pub referrer_mode: ReferrerMode,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            accept_status: vec![200, 304],
            skip_bot_tokens: to_strings(&["bot", "crawler", "walker", "slurp"]),
            detect_crawlers: false,
            skip_extensions: to_strings(&["jpeg", "jpg", "gif", "swf", "css", "js", "ico", "png"]),
            skip_urls: Vec::new(),
            skip_undeclared_hosts: false,
            index_pages: to_strings(&["index.htm", "index.html"]),
            domain: None,
            host_aliases: Vec::new(),
            url_alias_file: None,
            referrer_mode: ReferrerMode::All,
        }
    }
}

impl CleaningConfig {
    /// Lowercased site hostnames: the domain first, then its aliases.
    pub fn declared_hostnames(&self) -> Vec<String> {
        self.domain
            .iter()
            .chain(self.host_aliases.iter())
            .map(|h| h.trim().to_ascii_lowercase())
            .filter(|h| !h.is_empty())
            .collect()
    }
}

/// Which referrer -> page links take part in aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferrerMode {
    #[default]
    All,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportsConfig {
    /// How many referrer pairs to graph; 0 disables the pairs report.
    pub pairs: usize,

    /// How many of the longest sessions to graph; 0 disables session tracks.
    pub sessions: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Re-render every N accepted lines; 0 renders once at end of input.
    pub continuous_every: u64,

    /// A session is only graphed when one of its pages is listed here.
    pub session_require_urls: Vec<String>,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            pairs: 15,
            sessions: 15,
            output_dir: None,
            continuous_every: 0,
            session_require_urls: Vec::new(),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Appends `value` unless it is already present.
pub fn push_unique<T: PartialEq>(list: &mut Vec<T>, value: T) {
    if !list.contains(&value) {
        list.push(value);
    }
}
