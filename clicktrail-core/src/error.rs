use crate::conf::ConfigError;
use crate::normalization::RequestLineError;
use std::path::PathBuf;
use thiserror::Error;

/// A problem with a single accepted log line.
///
/// Every accepted line must normalize cleanly, so the analyzer treats any of
/// these as fatal for the whole run.
#[derive(Debug, Error)]
pub enum LineError {
    #[error("missing {field} column (index {column})")]
    MissingField { field: &'static str, column: usize },

    #[error("couldn't figure out url from '{raw}': {source}")]
    RequestLine {
        raw: String,
        #[source]
        source: RequestLineError,
    },

    #[error("cannot parse timestamp '{raw}': {source}")]
    Timestamp {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl LineError {
    pub fn request_line(raw: impl Into<String>, source: RequestLineError) -> Self {
        Self::RequestLine {
            raw: raw.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("output path {path} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("line {line}: {source}")]
    MalformedLine {
        line: u64,
        #[source]
        source: LineError,
    },

    #[error("couldn't open logfile {path}: {source}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read log input: {0}")]
    Read(#[source] std::io::Error),

    #[error(transparent)]
    Report(#[from] ReportError),
}
