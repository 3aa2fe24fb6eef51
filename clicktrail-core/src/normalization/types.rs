use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestLineError {
    #[error("request line has no method")]
    MissingMethod,

    #[error("invalid request method '{0}'")]
    InvalidMethod(String),

    #[error("request line has no target")]
    MissingTarget,

    #[error("request line has no HTTP protocol version")]
    MissingProtocol,
}

/// A normalized referrer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Referrer {
    /// A site path (possibly aliased) or a non-URL marker like `Direct Link`.
    Internal(String),
    /// An absolute URL on some other host.
    External(String),
}

impl Referrer {
    pub fn as_str(&self) -> &str {
        match self {
            Referrer::Internal(s) | Referrer::External(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Referrer::Internal(s) | Referrer::External(s) => s,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Referrer::External(_))
    }
}
