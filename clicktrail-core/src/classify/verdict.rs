use serde::Serialize;
use std::fmt;

/// Why a line was left out of the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipReason {
    Bot,
    Ext,
    Url,
    Host,
    Status,
}

impl SkipReason {
    pub const ALL: [SkipReason; 5] = [
        SkipReason::Bot,
        SkipReason::Ext,
        SkipReason::Url,
        SkipReason::Host,
        SkipReason::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Bot => "bot",
            SkipReason::Ext => "ext",
            SkipReason::Url => "url",
            SkipReason::Host => "host",
            SkipReason::Status => "status",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            SkipReason::Bot => 0,
            SkipReason::Ext => 1,
            SkipReason::Url => 2,
            SkipReason::Host => 3,
            SkipReason::Status => 4,
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    Skip(SkipReason),
}
