use crate::error::ReportError;
use crate::render::{render_pairs_dot, render_session_dot};
use crate::report::{PairsReport, SessionReport};
use std::fs;
use std::path::{Path, PathBuf};

/// Which kind of render pass is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPass {
    /// Intermediate pass after `accepted` lines.
    Continuous { accepted: u64 },
    /// The single pass at end of input in batch mode.
    Final,
}

/// Receives the reports of each render pass.
pub trait ReportSink {
    fn begin(&mut self, _pass: RenderPass) -> Result<(), ReportError> {
        Ok(())
    }

    fn pairs(&mut self, report: &PairsReport) -> Result<(), ReportError>;

    fn session(&mut self, report: &SessionReport) -> Result<(), ReportError>;
}

/// Writes Graphviz files into an output directory, replacing the previous
/// pass's files of the same name.
#[derive(Debug)]
pub struct DotFileSink {
    out_dir: PathBuf,
    domain: Option<String>,
    written: Vec<PathBuf>,
}

pub const PAIRS_REPORT_FILE: &str = "pairs.dot";

impl DotFileSink {
    /// Creates `out_dir` when missing. `None` writes into the working
    /// directory.
    pub fn new(out_dir: Option<&Path>, domain: Option<&str>) -> Result<Self, ReportError> {
        let out_dir = out_dir.map(Path::to_path_buf).unwrap_or_default();

        if !out_dir.as_os_str().is_empty() {
            if out_dir.exists() && !out_dir.is_dir() {
                return Err(ReportError::NotADirectory { path: out_dir });
            }
            fs::create_dir_all(&out_dir).map_err(|e| ReportError::CreateDir {
                path: out_dir.clone(),
                source: e,
            })?;
        }

        Ok(Self {
            out_dir,
            domain: domain.map(str::to_string),
            written: Vec::new(),
        })
    }

    /// Every file written so far, in write order. Rewrites are listed again.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write(&mut self, file_name: &str, contents: &str) -> Result<(), ReportError> {
        let path = self.out_dir.join(file_name);

        fs::write(&path, contents).map_err(|e| ReportError::Write {
            path: path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), "report written");
        self.written.push(path);
        Ok(())
    }
}

impl ReportSink for DotFileSink {
    fn begin(&mut self, pass: RenderPass) -> Result<(), ReportError> {
        tracing::info!(?pass, out_dir = %self.out_dir.display(), "rendering reports");
        Ok(())
    }

    fn pairs(&mut self, report: &PairsReport) -> Result<(), ReportError> {
        let dot = render_pairs_dot(report);
        self.write(PAIRS_REPORT_FILE, &dot)
    }

    fn session(&mut self, report: &SessionReport) -> Result<(), ReportError> {
        let dot = render_session_dot(report, self.domain.as_deref());
        let file_name = session_report_file(&report.session_id);
        self.write(&file_name, &dot)
    }
}

/// `track-<id>.dot`. Bytes unsafe in file names, and `%` itself, are written
/// as `%XX` so distinct ids never share a file.
pub fn session_report_file(session_id: &str) -> String {
    let mut safe = String::with_capacity(session_id.len());
    for byte in session_id.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.') {
            safe.push(char::from(byte));
        } else {
            safe.push_str(&format!("%{byte:02X}"));
        }
    }

    format!("track-{safe}.dot")
}

/// One captured render pass.
#[derive(Debug, Clone)]
pub struct CapturedPass {
    pub pass: RenderPass,
    pub pairs: Option<PairsReport>,
    pub sessions: Vec<SessionReport>,
}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub passes: Vec<CapturedPass>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&CapturedPass> {
        self.passes.last()
    }

    fn current(&mut self) -> &mut CapturedPass {
        if self.passes.is_empty() {
            self.passes.push(CapturedPass {
                pass: RenderPass::Final,
                pairs: None,
                sessions: Vec::new(),
            });
        }
        let last = self.passes.len() - 1;
        &mut self.passes[last]
    }
}

impl ReportSink for MemorySink {
    fn begin(&mut self, pass: RenderPass) -> Result<(), ReportError> {
        self.passes.push(CapturedPass {
            pass,
            pairs: None,
            sessions: Vec::new(),
        });
        Ok(())
    }

    fn pairs(&mut self, report: &PairsReport) -> Result<(), ReportError> {
        self.current().pairs = Some(report.clone());
        Ok(())
    }

    fn session(&mut self, report: &SessionReport) -> Result<(), ReportError> {
        self.current().sessions.push(report.clone());
        Ok(())
    }
}
