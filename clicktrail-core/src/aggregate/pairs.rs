use ahash::AHashMap;
use serde::Serialize;

/// One navigational hop, both ends already canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PairKey {
    pub referrer: String,
    pub page: String,
}

impl PairKey {
    pub fn new(referrer: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            referrer: referrer.into(),
            page: page.into(),
        }
    }
}

/// Referrer -> page hit counts.
///
/// Keys remember the order they were first seen in, which breaks ties when
/// ranking.
#[derive(Debug, Clone, Default)]
pub struct PairHistogram {
    entries: Vec<(PairKey, u64)>,
    index: AHashMap<PairKey, usize>,
}

impl PartialEq for PairHistogram {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for PairHistogram {}

impl PairHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: PairKey, count: u64) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += count,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, count));
            }
        }
    }

    pub fn count(&self, referrer: &str, page: &str) -> u64 {
        self.index
            .get(&PairKey::new(referrer, page))
            .map(|&i| self.entries[i].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every count.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| *c).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, u64)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    /// Entries by count, highest first; equal counts keep first-seen order.
    pub fn ranked(&self) -> Vec<(&PairKey, u64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Additive merge of another shard's counts.
    pub fn merge(&mut self, other: &PairHistogram) {
        for (key, count) in other.iter() {
            self.add(key.clone(), count);
        }
    }
}

/// Maintains the pair histogram for the whole log.
///
/// Repeated identical hops simply add weight; nothing is de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairAggregator {
    histogram: PairHistogram,
}

impl PairAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, referrer: &str, page: &str) {
        self.histogram.add(PairKey::new(referrer, page), 1);
    }

    pub fn snapshot(&self) -> &PairHistogram {
        &self.histogram
    }

    pub fn merge(&mut self, other: &PairAggregator) {
        self.histogram.merge(&other.histogram);
    }
}

/// Per-node totals derived from a full scan of a histogram.
#[derive(Debug, Clone, Default)]
pub struct NodeTotals {
    hits: AHashMap<String, u64>,
    referrals: AHashMap<String, u64>,
    pub max_hits: u64,
    pub max_referrals: u64,
}

impl NodeTotals {
    pub fn scan(histogram: &PairHistogram) -> Self {
        let mut totals = Self::default();

        for (key, count) in histogram.iter() {
            *totals.hits.entry(key.page.clone()).or_insert(0) += count;
            *totals.referrals.entry(key.referrer.clone()).or_insert(0) += count;
        }

        totals.max_hits = totals.hits.values().copied().max().unwrap_or(0);
        totals.max_referrals = totals.referrals.values().copied().max().unwrap_or(0);
        totals
    }

    /// How often `node` was the requested page.
    pub fn hits(&self, node: &str) -> Option<u64> {
        self.hits.get(node).copied()
    }

    /// How often `node` was the referrer.
    pub fn referrals(&self, node: &str) -> Option<u64> {
        self.referrals.get(node).copied()
    }
}
