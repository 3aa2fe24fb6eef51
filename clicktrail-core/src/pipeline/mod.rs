mod analyzer;
mod context;
mod sink;
#[cfg(test)]
mod tests;

pub use analyzer::{Analyzer, LineOutcome, PROGRESS_EVERY, RunSummary};
pub use context::AnalysisContext;
pub use sink::{
    CapturedPass, DotFileSink, MemorySink, PAIRS_REPORT_FILE, RenderPass, ReportSink,
    session_report_file,
};
