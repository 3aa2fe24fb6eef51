use crate::aggregate::{DateRange, PairAggregator, SessionTrackStore, SkipCounters};

/// All aggregation state of one run.
///
/// Contexts built from disjoint slices of a log can be merged; histograms
/// add, tracks union, counters add and date ranges widen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisContext {
    pub pairs: PairAggregator,
    pub sessions: SessionTrackStore,
    pub skipped: SkipCounters,
    pub date_range: DateRange,

    pub lines_read: u64,
    pub blank_lines: u64,
    pub accepted: u64,
    /// Accepted lines left out of aggregation by the `internal` referrer mode.
    pub external_referrers_dropped: u64,
    /// Accepted lines carrying the no-session id.
    pub untracked_clicks: u64,
}

impl AnalysisContext {
    pub fn new(no_session: &str) -> Self {
        Self {
            pairs: PairAggregator::new(),
            sessions: SessionTrackStore::new(no_session),
            skipped: SkipCounters::default(),
            date_range: DateRange::default(),
            lines_read: 0,
            blank_lines: 0,
            accepted: 0,
            external_referrers_dropped: 0,
            untracked_clicks: 0,
        }
    }

    pub fn merge(&mut self, other: &AnalysisContext) {
        self.pairs.merge(&other.pairs);
        self.sessions.merge(&other.sessions);
        self.skipped.merge(&other.skipped);
        self.date_range.merge(&other.date_range);

        self.lines_read += other.lines_read;
        self.blank_lines += other.blank_lines;
        self.accepted += other.accepted;
        self.external_referrers_dropped += other.external_referrers_dropped;
        self.untracked_clicks += other.untracked_clicks;
    }
}
