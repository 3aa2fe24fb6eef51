use crate::aggregate::{DateRange, NodeTotals, PairHistogram};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedPair {
    pub referrer: String,
    pub page: String,
    pub count: u64,
}

/// Everything the referrer graph needs, computed from one histogram scan.
#[derive(Debug, Clone)]
pub struct PairsReport {
    pub domain: String,
    pub limit: usize,
    /// The top `limit` pairs, highest count first.
    pub pairs: Vec<RankedPair>,
    /// Per-node totals over every pair, not only the ones shown.
    pub totals: NodeTotals,
    pub max_pair_count: u64,
    pub min_pair_count: u64,
    pub top_clicks: u64,
    pub all_clicks: u64,
    pub date_range: DateRange,
}

impl PairsReport {
    pub fn build(
        histogram: &PairHistogram,
        limit: usize,
        date_range: DateRange,
        domain: Option<&str>,
    ) -> Self {
        let pairs: Vec<RankedPair> = histogram
            .ranked()
            .into_iter()
            .take(limit)
            .map(|(key, count)| RankedPair {
                referrer: key.referrer.clone(),
                page: key.page.clone(),
                count,
            })
            .collect();

        let max_pair_count = pairs.iter().map(|p| p.count).max().unwrap_or(0);
        let min_pair_count = pairs.iter().map(|p| p.count).min().unwrap_or(0);
        let top_clicks = pairs.iter().map(|p| p.count).sum();

        Self {
            domain: domain.unwrap_or_default().to_string(),
            limit,
            pairs,
            totals: NodeTotals::scan(histogram),
            max_pair_count,
            min_pair_count,
            top_clicks,
            all_clicks: histogram.total(),
            date_range,
        }
    }

    /// Share of all clicks covered by the shown pairs, in percent.
    pub fn coverage(&self) -> f64 {
        if self.all_clicks == 0 {
            return 0.0;
        }
        self.top_clicks as f64 / self.all_clicks as f64 * 100.0
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
