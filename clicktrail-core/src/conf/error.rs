use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    // IO
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't read url alias file {path}: {source}")]
    ReadAliasFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parsing
    #[error("failed to parse HCL in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[source] hcl::Error),

    // Validation
    #[error("no logfile specified")]
    MissingLogPath,

    #[error("{first} and {second} columns both point at index {column}")]
    ColumnConflict {
        first: &'static str,
        second: &'static str,
        column: usize,
    },

    #[error("skip_undeclared_hosts is enabled but no hostnames are declared")]
    NoDeclaredHosts,

    #[error("invalid bot pattern '{pattern}': {source}")]
    InvalidBotPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("accept_status is empty, every line would be skipped")]
    EmptyAcceptStatus,
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: hcl::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
