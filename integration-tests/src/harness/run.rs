use crate::harness::{AccessLog, CapturedEvent, init_test_tracing};
use clicktrail_core::cli::run::analyze;
use clicktrail_core::conf::ClicktrailConfig;
use clicktrail_core::error::AnalyzeError;
use clicktrail_core::pipeline::{PAIRS_REPORT_FILE, RunSummary, session_report_file};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use tempfile::TempDir;

/// One analysis run over a generated log in its own temp directory.
pub struct TestRun {
    dir: TempDir,
    cfg: ClicktrailConfig,
}

impl TestRun {
    /// Writes `log` to `access.log` and points a default config at it.
    ///
    /// Reports go to `<tmp>/reports`.
    pub fn new(log: &AccessLog) -> Self {
        init_test_tracing(events());

        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let log_path = dir.path().join("access.log");
        fs::write(&log_path, log.contents()).expect("failed to write access log");

        let mut cfg = ClicktrailConfig::default();
        cfg.log.path = Some(log_path);
        cfg.reports.output_dir = Some(dir.path().join("reports"));

        Self { dir, cfg }
    }

    /// Adjusts the config before the run.
    pub fn configure(mut self, f: impl FnOnce(&mut ClicktrailConfig)) -> Self {
        f(&mut self.cfg);
        self
    }

    pub fn config(&self) -> &ClicktrailConfig {
        &self.cfg
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.path().join("access.log")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.dir.path().join("reports")
    }

    /// Runs the analysis, panicking on failure.
    pub fn analyze(&self) -> RunSummary {
        self.try_analyze().expect("analysis failed")
    }

    pub fn try_analyze(&self) -> Result<RunSummary, AnalyzeError> {
        analyze(&self.cfg)
    }

    pub fn pairs_report(&self) -> String {
        self.report(PAIRS_REPORT_FILE)
    }

    pub fn session_report(&self, session_id: &str) -> String {
        self.report(&session_report_file(session_id))
    }

    pub fn has_report(&self, file_name: &str) -> bool {
        self.reports_dir().join(file_name).is_file()
    }

    /// File names in the reports directory, sorted.
    pub fn report_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.reports_dir())
            .expect("failed to list reports")
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn report(&self, file_name: &str) -> String {
        let path = self.reports_dir().join(file_name);
        fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {path:?}: {e}"))
    }
}

static EVENTS: OnceLock<Arc<Mutex<Vec<CapturedEvent>>>> = OnceLock::new();

/// Every tracing event captured so far, across all tests of the binary.
pub fn events() -> Arc<Mutex<Vec<CapturedEvent>>> {
    EVENTS
        .get_or_init(|| Arc::new(Mutex::new(Vec::new())))
        .clone()
}

/// Captured events that carry `field` with exactly `value`.
pub fn events_with(field: &str, value: &str) -> Vec<CapturedEvent> {
    events()
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.field(field) == Some(value))
        .cloned()
        .collect()
}
