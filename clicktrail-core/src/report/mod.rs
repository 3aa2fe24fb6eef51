mod pairs;
mod scheduler;
mod sessions;
#[cfg(test)]
mod tests;

pub use pairs::{PairsReport, RankedPair};
pub use scheduler::{DirtySessionSet, ReportMode, ReportScheduler};
pub use sessions::{
    SessionReport, build_session_reports, select_dirty, select_top_sessions, session_matches,
};
