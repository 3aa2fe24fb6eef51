use crate::conf::{
    ClicktrailConfig, ConfigError, LogPreset, ReferrerMode, load_config, push_unique, write_config,
};
use crate::error::AnalyzeError;
use crate::logging::LogFormat;
use crate::pipeline::{Analyzer, DotFileSink, RunSummary};
use crate::render::render_run_summary;
use anyhow::Result;
use clap::Args;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// Path value of `--log` that reads the log from stdin.
pub const STDIN_LOG: &str = "-";

/// Options of `clicktrail run`. Everything set here overrides the config file.
///
/// Column numbers are 1-based, like `cut -f` or `awk`.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// HCL configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Access log to analyse; `-` reads stdin
    #[arg(short, long)]
    pub log: Option<PathBuf>,

    /// Column layout preset
    #[arg(short = 't', long, value_enum)]
    pub preset: Option<LogPreset>,

    /// Column holding the virtual host name
    #[arg(short, long, value_parser = parse_column)]
    pub vhost_column: Option<usize>,

    /// Column holding the unique session id
    #[arg(short, long, value_parser = parse_column)]
    pub session_column: Option<usize>,

    /// User agent substring marking a bot (repeatable)
    #[arg(short = 'b', long = "skip-bot")]
    pub skip_bots: Vec<String>,

    /// Request extension to skip (repeatable)
    #[arg(short = 'e', long = "skip-ext")]
    pub skip_exts: Vec<String>,

    /// URL substring to skip (repeatable)
    #[arg(short = 'u', long = "skip-url")]
    pub skip_urls: Vec<String>,

    /// Site hostname; the first is the domain, later ones are aliases
    #[arg(short = 'n', long = "hostname")]
    pub hostnames: Vec<String>,

    /// Skip hits whose virtual host is not a declared hostname
    #[arg(long)]
    pub skip_undeclared_hosts: bool,

    /// Also treat agents woothee knows as crawlers as bots
    #[arg(long)]
    pub detect_crawlers: bool,

    /// `URL<TAB>ALIAS` file with display names for URLs
    #[arg(long)]
    pub alias_file: Option<PathBuf>,

    /// Directory for the generated DOT files
    #[arg(short = 'd', long)]
    pub out_dir: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub referrer_mode: Option<ReferrerMode>,

    /// Number of referrer pairs to graph; 0 disables the pairs report
    #[arg(long)]
    pub pairs: Option<usize>,

    /// Number of sessions to graph; 0 disables session tracks
    #[arg(long)]
    pub sessions: Option<usize>,

    /// Only graph sessions visiting this URL (repeatable)
    #[arg(long = "require-url")]
    pub require_urls: Vec<String>,

    /// Re-render reports every N accepted lines (10 when no value is given)
    #[arg(long, num_args = 0..=1, default_missing_value = "10")]
    pub continuous: Option<u64>,

    /// Write the resolved configuration to this path (.hcl is appended)
    #[arg(long)]
    pub write_config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl RunArgs {
    /// Resolves the effective configuration: file first, then flags.
    pub fn resolve(&self) -> Result<ClicktrailConfig, ConfigError> {
        let mut cfg = match &self.config {
            Some(path) => load_config(path)?,
            None => ClicktrailConfig::default(),
        };
        self.apply(&mut cfg);
        Ok(cfg)
    }

    pub fn apply(&self, cfg: &mut ClicktrailConfig) {
        //----------------------------------------------------------------------
        // Log layout
        //----------------------------------------------------------------------
        if let Some(path) = &self.log {
            cfg.log.path = Some(path.clone());
        }
        if let Some(preset) = self.preset {
            cfg.log.preset = Some(preset);
            preset.apply(&mut cfg.log);
        }
        if let Some(column) = self.vhost_column {
            cfg.log.vhost_column = Some(column);
        }
        if let Some(column) = self.session_column {
            cfg.log.session_column = column;
        }

        //----------------------------------------------------------------------
        // Cleaning
        //----------------------------------------------------------------------
        let cleaning = &mut cfg.cleaning;
        for token in &self.skip_bots {
            push_unique(&mut cleaning.skip_bot_tokens, token.clone());
        }
        for ext in &self.skip_exts {
            push_unique(&mut cleaning.skip_extensions, ext.clone());
        }
        for url in &self.skip_urls {
            push_unique(&mut cleaning.skip_urls, url.clone());
        }
        for host in &self.hostnames {
            if cleaning.domain.is_none() {
                cleaning.domain = Some(host.clone());
            } else if cleaning.domain.as_deref() != Some(host.as_str()) {
                push_unique(&mut cleaning.host_aliases, host.clone());
            }
        }
        if self.skip_undeclared_hosts {
            cleaning.skip_undeclared_hosts = true;
        }
        if self.detect_crawlers {
            cleaning.detect_crawlers = true;
        }
        if let Some(path) = &self.alias_file {
            cleaning.url_alias_file = Some(path.clone());
        }
        if let Some(mode) = self.referrer_mode {
            cleaning.referrer_mode = mode;
        }

        //----------------------------------------------------------------------
        // Reports
        //----------------------------------------------------------------------
        let reports = &mut cfg.reports;
        if let Some(dir) = &self.out_dir {
            reports.output_dir = Some(dir.clone());
        }
        if let Some(pairs) = self.pairs {
            reports.pairs = pairs;
        }
        if let Some(sessions) = self.sessions {
            reports.sessions = sessions;
        }
        for url in &self.require_urls {
            push_unique(&mut reports.session_require_urls, url.clone());
        }
        if let Some(every) = self.continuous {
            reports.continuous_every = every;
        }
    }
}

/// 1-based column number on the command line, 0-based index in the config.
fn parse_column(value: &str) -> Result<usize, String> {
    let column: usize = value
        .parse()
        .map_err(|_| format!("'{value}' is not a column number"))?;

    column
        .checked_sub(1)
        .ok_or_else(|| "columns are numbered from 1".to_string())
}

pub fn run(args: RunArgs) -> Result<()> {
    let cfg = args.resolve()?;

    if let Some(path) = &args.write_config {
        let written = write_config(&cfg, path)?;
        tracing::info!(path = %written.display(), "configuration written");
    }

    let summary = analyze(&cfg)?;
    print!("{}", render_run_summary(&summary));

    Ok(())
}

/// Analyses the configured log, writing DOT reports as scheduled.
pub fn analyze(cfg: &ClicktrailConfig) -> Result<RunSummary, AnalyzeError> {
    let log_path = cfg.log.path.clone().ok_or(ConfigError::MissingLogPath)?;

    let mut analyzer = Analyzer::from_config(cfg)?;
    let mut sink = DotFileSink::new(
        cfg.reports.output_dir.as_deref(),
        cfg.cleaning.domain.as_deref(),
    )?;

    tracing::info!(log = %log_path.display(), "analysing log");

    if log_path == Path::new(STDIN_LOG) {
        let stdin = io::stdin();
        analyzer.run(stdin.lock(), &mut sink)
    } else {
        let file = File::open(&log_path).map_err(|e| AnalyzeError::OpenInput {
            path: log_path.clone(),
            source: e,
        })?;
        analyzer.run(BufReader::new(file), &mut sink)
    }
}
