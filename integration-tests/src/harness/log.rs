/// Mozilla user agent that no bot rule matches.
pub const BROWSER: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

pub const CRAWLER: &str = "Mozilla/5.0 (compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm)";

/// Builds a combined-format access log, one line at a time.
///
/// Timestamps are seconds after 2023-10-10 13:00:00 UTC.
#[derive(Debug, Default, Clone)]
pub struct AccessLog {
    lines: Vec<String>,
}

impl AccessLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A successful browser `GET`.
    pub fn hit(self, session: &str, secs: u32, path: &str, referrer: &str) -> Self {
        self.request(session, secs, &format!("GET {path} HTTP/1.1"), 200, referrer, BROWSER)
    }

    pub fn request(
        mut self,
        session: &str,
        secs: u32,
        request: &str,
        status: u16,
        referrer: &str,
        user_agent: &str,
    ) -> Self {
        self.lines.push(format!(
            "{session} - - [{}] \"{request}\" {status} 2326 \"{referrer}\" \"{user_agent}\"",
            timestamp(secs)
        ));
        self
    }

    /// A raw line, written as given.
    pub fn line(mut self, raw: &str) -> Self {
        self.lines.push(raw.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contents(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

pub fn timestamp(secs: u32) -> String {
    format!(
        "10/Oct/2023:{:02}:{:02}:{:02} +0000",
        13 + secs / 3600,
        secs / 60 % 60,
        secs % 60
    )
}
