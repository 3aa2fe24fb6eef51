use crate::normalization::RequestLineError;

/// A tokenized `METHOD SP TARGET SP HTTP/x.y` request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLine<'a> {
    pub method: &'a str,
    pub target: &'a str,
    pub protocol: &'a str,
}

impl<'a> RequestLine<'a> {
    /// The target without its query string.
    pub fn path(&self) -> &'a str {
        let end = self.target.find(['?', ' ']).unwrap_or(self.target.len());
        &self.target[..end]
    }

    /// Extension of the last path segment, if it has one.
    pub fn extension(&self) -> Option<&'a str> {
        let path = self.path();
        let segment = path.rsplit('/').next().unwrap_or(path);
        let (_, ext) = segment.rsplit_once('.')?;

        (!ext.is_empty()).then_some(ext)
    }
}

/// Tokenizes a request line such as `GET /docs/?page=2 HTTP/1.1`.
///
/// The method must be a run of word characters and the last token must be an
/// `HTTP/` protocol version. Everything in between is the target.
pub fn parse_request_line(raw: &str) -> Result<RequestLine<'_>, RequestLineError> {
    if raw.is_empty() || raw.starts_with(' ') {
        return Err(RequestLineError::MissingMethod);
    }

    let (method, rest) = raw
        .split_once(' ')
        .ok_or(RequestLineError::MissingTarget)?;

    if !method.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(RequestLineError::InvalidMethod(method.to_string()));
    }

    let Some((target, protocol)) = rest.rsplit_once(' ') else {
        return Err(if rest.starts_with("HTTP/") {
            RequestLineError::MissingTarget
        } else {
            RequestLineError::MissingProtocol
        });
    };

    if !protocol.starts_with("HTTP/") {
        return Err(RequestLineError::MissingProtocol);
    }

    let target = target.trim();
    if target.is_empty() {
        return Err(RequestLineError::MissingTarget);
    }

    Ok(RequestLine {
        method,
        target,
        protocol,
    })
}
