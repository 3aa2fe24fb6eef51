use crate::classify::SkipReason;
use chrono::{DateTime, FixedOffset};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipCounters {
    counts: [u64; SkipReason::ALL.len()],
}

impl SkipCounters {
    pub fn increment(&mut self, reason: SkipReason) {
        self.counts[reason.index()] += 1;
    }

    pub fn get(&self, reason: SkipReason) -> u64 {
        self.counts[reason.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(reason, count)` for every reason, in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (SkipReason, u64)> + '_ {
        SkipReason::ALL.iter().map(|r| (*r, self.get(*r)))
    }

    pub fn merge(&mut self, other: &SkipCounters) {
        for (a, b) in self.counts.iter_mut().zip(other.counts) {
            *a += b;
        }
    }
}

/// First and last timestamp among accepted lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
}

impl DateRange {
    /// The start is set once; the end follows the latest accepted line.
    pub fn observe(&mut self, ts: DateTime<FixedOffset>) {
        if self.start.is_none() {
            self.start = Some(ts);
        }
        self.end = Some(ts);
    }

    /// Widens to cover another shard's range.
    pub fn merge(&mut self, other: &DateRange) {
        self.start = match (self.start, other.start) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.end = match (self.end, other.end) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }
}
