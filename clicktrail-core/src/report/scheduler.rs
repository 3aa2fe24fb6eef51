use ahash::AHashSet;
use std::num::NonZeroU64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// A single render once input is exhausted.
    Batch,
    /// Re-render every `every` accepted lines, never at end of input.
    Continuous { every: NonZeroU64 },
}

impl ReportMode {
    /// `0` means batch.
    pub fn from_every(every: u64) -> Self {
        match NonZeroU64::new(every) {
            Some(every) => ReportMode::Continuous { every },
            None => ReportMode::Batch,
        }
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self, ReportMode::Continuous { .. })
    }
}

/// Session ids touched since the last continuous render, in touch order.
#[derive(Debug, Clone, Default)]
pub struct DirtySessionSet {
    order: Vec<String>,
    seen: AHashSet<String>,
}

impl DirtySessionSet {
    pub fn insert(&mut self, session_id: &str) {
        if self.seen.insert(session_id.to_string()) {
            self.order.push(session_id.to_string());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.seen.contains(session_id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Empties the set, returning the ids in touch order.
    pub fn drain(&mut self) -> Vec<String> {
        self.seen.clear();
        std::mem::take(&mut self.order)
    }
}

/// Decides when a render pass is due.
#[derive(Debug, Clone)]
pub struct ReportScheduler {
    mode: ReportMode,
    accepted: u64,
    last_reported: u64,
    dirty: DirtySessionSet,
}

impl ReportScheduler {
    pub fn new(mode: ReportMode) -> Self {
        Self {
            mode,
            accepted: 0,
            last_reported: 0,
            dirty: DirtySessionSet::default(),
        }
    }

    pub fn mode(&self) -> ReportMode {
        self.mode
    }

    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Marks a session as changed. Only tracked in continuous mode.
    pub fn touch(&mut self, session_id: &str) {
        if self.mode.is_continuous() {
            self.dirty.insert(session_id);
        }
    }

    /// Counts one accepted line and reports whether a render is due.
    pub fn on_accepted(&mut self) -> bool {
        self.accepted += 1;

        match self.mode {
            ReportMode::Batch => false,
            ReportMode::Continuous { every } => {
                let due = self.accepted % every.get() == 0 && self.accepted != self.last_reported;
                if due {
                    self.last_reported = self.accepted;
                }
                due
            }
        }
    }

    pub fn dirty(&self) -> &DirtySessionSet {
        &self.dirty
    }

    pub fn take_dirty(&mut self) -> Vec<String> {
        self.dirty.drain()
    }
}
