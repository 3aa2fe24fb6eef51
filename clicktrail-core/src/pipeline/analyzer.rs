use crate::aggregate::{Click, DateRange, SkipCounters};
use crate::classify::{LineClassifier, SkipReason, Verdict};
use crate::conf::{ClicktrailConfig, ConfigError, ReferrerMode, ReportsConfig, load_url_aliases};
use crate::error::{AnalyzeError, LineError, ReportError};
use crate::ingest::{ColumnMap, LogRecord, parse_timestamp};
use crate::normalization::{Canonicalizer, UrlAliases};
use crate::pipeline::context::AnalysisContext;
use crate::pipeline::sink::{RenderPass, ReportSink};
use crate::report::{
    PairsReport, ReportMode, ReportScheduler, build_session_reports, select_dirty,
    select_top_sessions,
};
use std::io::BufRead;

/// Lines between two progress messages.
pub const PROGRESS_EVERY: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Blank,
    Skipped(SkipReason),
    /// `render_due` is set when a continuous render pass should follow.
    Accepted { render_due: bool },
}

/// End-of-run counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub lines_read: u64,
    pub blank_lines: u64,
    pub accepted: u64,
    pub skipped: SkipCounters,
    pub external_referrers_dropped: u64,
    pub untracked_clicks: u64,
    pub distinct_pairs: usize,
    pub sessions: usize,
    pub render_passes: u64,
    pub date_range: DateRange,
}

/// Drives one log through classification, normalization and aggregation,
/// and triggers render passes.
#[derive(Debug)]
pub struct Analyzer {
    columns: ColumnMap,
    classifier: LineClassifier,
    canonicalizer: Canonicalizer,
    referrer_mode: ReferrerMode,
    reports: ReportsConfig,
    domain: Option<String>,
    scheduler: ReportScheduler,
    ctx: AnalysisContext,
    render_passes: u64,
}

impl Analyzer {
    /// Builds an analyzer, reading the URL alias file named by the config.
    pub fn from_config(cfg: &ClicktrailConfig) -> Result<Self, ConfigError> {
        let aliases = load_url_aliases(cfg.cleaning.url_alias_file.as_deref())?;
        Self::new(cfg, aliases)
    }

    pub fn new(cfg: &ClicktrailConfig, aliases: UrlAliases) -> Result<Self, ConfigError> {
        let columns = ColumnMap::from_config(&cfg.log)?;
        let classifier = LineClassifier::new(columns, &cfg.cleaning)?;

        Ok(Self {
            columns,
            classifier,
            canonicalizer: Canonicalizer::from_config(&cfg.cleaning, aliases),
            referrer_mode: cfg.cleaning.referrer_mode,
            reports: cfg.reports.clone(),
            domain: cfg.cleaning.domain.clone(),
            scheduler: ReportScheduler::new(ReportMode::from_every(cfg.reports.continuous_every)),
            ctx: AnalysisContext::new(&cfg.log.no_session),
            render_passes: 0,
        })
    }

    pub fn context(&self) -> &AnalysisContext {
        &self.ctx
    }

    pub fn into_context(self) -> AnalysisContext {
        self.ctx
    }

    pub fn scheduler(&self) -> &ReportScheduler {
        &self.scheduler
    }

    /// Feeds one raw line (trailing newline optional).
    pub fn process_line(&mut self, raw: &str) -> Result<LineOutcome, AnalyzeError> {
        self.ctx.lines_read += 1;
        let line_no = self.ctx.lines_read;

        let line = raw.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            self.ctx.blank_lines += 1;
            return Ok(LineOutcome::Blank);
        }

        let record = LogRecord::parse(line);
        if self.ctx.lines_read - self.ctx.blank_lines == 1 {
            self.log_preview(&record);
        }

        //----------------------------------------------------------------------
        // Cleaning
        //----------------------------------------------------------------------
        let verdict = self
            .classifier
            .classify(&record, line_no)
            .map_err(|e| malformed(line_no, e))?;

        if let Verdict::Skip(reason) = verdict {
            self.ctx.skipped.increment(reason);
            tracing::trace!(line = line_no, %reason, "line skipped");
            return Ok(LineOutcome::Skipped(reason));
        }

        //----------------------------------------------------------------------
        // Normalization
        //----------------------------------------------------------------------
        let (session_id, click, external) = self
            .normalize(&record)
            .map_err(|e| malformed(line_no, e))?;

        //----------------------------------------------------------------------
        // Aggregation
        //----------------------------------------------------------------------
        self.ctx.accepted += 1;
        self.ctx.date_range.observe(click.timestamp);

        if external && self.referrer_mode == ReferrerMode::Internal {
            self.ctx.external_referrers_dropped += 1;
        } else {
            self.ctx.pairs.record(&click.referrer, &click.page);
            if self.ctx.sessions.append(&session_id, click) {
                self.scheduler.touch(&session_id);
            } else {
                self.ctx.untracked_clicks += 1;
            }
        }

        Ok(LineOutcome::Accepted {
            render_due: self.scheduler.on_accepted(),
        })
    }

    /// Session id, the click, and whether its referrer is outside the site.
    fn normalize(&self, record: &LogRecord) -> Result<(String, Click, bool), LineError> {
        let raw_url = self.columns.url(record)?;
        let page = self
            .canonicalizer
            .normalize_url(raw_url)
            .map_err(|e| LineError::request_line(raw_url, e))?;

        let serving_host = self.columns.vhost(record).present();
        let referrer = self
            .canonicalizer
            .normalize_referrer(self.columns.referrer(record)?, serving_host);
        let external = referrer.is_external();

        let timestamp = parse_timestamp(&self.columns.timestamp(record)?)?;
        let session_id = self.columns.session(record)?.to_string();

        Ok((
            session_id,
            Click {
                referrer: referrer.into_string(),
                page,
                timestamp,
            },
            external,
        ))
    }

    fn log_preview(&self, record: &LogRecord) {
        for (name, column, value) in self.columns.preview(record) {
            tracing::info!(
                column = column + 1,
                value = value.unwrap_or("<missing>"),
                "first line {name}"
            );
        }
    }

    /// Reads every line of `reader`, rendering into `sink` as scheduled.
    ///
    /// Bytes that are not UTF-8 are replaced rather than rejected.
    pub fn run<R, S>(&mut self, mut reader: R, sink: &mut S) -> Result<RunSummary, AnalyzeError>
    where
        R: BufRead,
        S: ReportSink + ?Sized,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader.read_until(b'\n', &mut buf).map_err(AnalyzeError::Read)?;
            if read == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            let outcome = self.process_line(&line)?;

            if self.ctx.lines_read % PROGRESS_EVERY == 0 {
                tracing::info!(
                    lines = self.ctx.lines_read,
                    accepted = self.ctx.accepted,
                    skipped = self.ctx.skipped.total(),
                    "progress"
                );
            }

            if let LineOutcome::Accepted { render_due: true } = outcome {
                let pass = RenderPass::Continuous {
                    accepted: self.ctx.accepted,
                };
                self.render(sink, pass)?;
            }
        }

        self.finish(sink)
    }

    /// End of input: logs totals and, in batch mode, runs the single render.
    pub fn finish<S>(&mut self, sink: &mut S) -> Result<RunSummary, AnalyzeError>
    where
        S: ReportSink + ?Sized,
    {
        for (reason, count) in self.ctx.skipped.iter() {
            tracing::info!(reason = %reason, count, "lines skipped");
        }
        tracing::info!(
            lines = self.ctx.lines_read,
            accepted = self.ctx.accepted,
            "input exhausted"
        );

        if !self.scheduler.mode().is_continuous() {
            self.render(sink, RenderPass::Final)?;
        }

        Ok(self.summary())
    }

    /// Runs one render pass. Continuous passes drain the dirty session set.
    pub fn render<S>(&mut self, sink: &mut S, pass: RenderPass) -> Result<(), ReportError>
    where
        S: ReportSink + ?Sized,
    {
        sink.begin(pass)?;

        let histogram = self.ctx.pairs.snapshot();
        if self.reports.pairs > 0 && !histogram.is_empty() {
            let report = PairsReport::build(
                histogram,
                self.reports.pairs,
                self.ctx.date_range,
                self.domain.as_deref(),
            );
            sink.pairs(&report)?;
        }

        let tracks = match pass {
            RenderPass::Continuous { .. } => {
                let dirty = self.scheduler.take_dirty();
                select_dirty(&self.ctx.sessions, &dirty)
            }
            RenderPass::Final => select_top_sessions(
                &self.ctx.sessions,
                self.reports.sessions,
                &self.reports.session_require_urls,
            ),
        };

        if self.reports.sessions > 0 {
            for report in build_session_reports(&tracks) {
                sink.session(&report)?;
            }
        }

        self.render_passes += 1;
        Ok(())
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            lines_read: self.ctx.lines_read,
            blank_lines: self.ctx.blank_lines,
            accepted: self.ctx.accepted,
            skipped: self.ctx.skipped,
            external_referrers_dropped: self.ctx.external_referrers_dropped,
            untracked_clicks: self.ctx.untracked_clicks,
            distinct_pairs: self.ctx.pairs.snapshot().len(),
            sessions: self.ctx.sessions.len(),
            render_passes: self.render_passes,
            date_range: self.ctx.date_range,
        }
    }
}

fn malformed(line: u64, source: LineError) -> AnalyzeError {
    AnalyzeError::MalformedLine { line, source }
}
