use crate::aggregate::Click;
use chrono::{DateTime, FixedOffset, TimeZone};

pub(crate) const BROWSER: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0";
pub(crate) const GOOGLEBOT: &str = "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";

/// A combined-format line.
pub(crate) fn combined_line(
    session: &str,
    timestamp: &str,
    request: &str,
    status: u16,
    referrer: &str,
    user_agent: &str,
) -> String {
    format!(
        "{session} - - [{timestamp}] \"{request}\" {status} 512 \"{referrer}\" \"{user_agent}\""
    )
}

/// A successful `GET` from a browser, `secs` seconds after 13:00 UTC.
pub(crate) fn hit(session: &str, secs: u32, path: &str, referrer: &str) -> String {
    combined_line(
        session,
        &log_time(secs),
        &format!("GET {path} HTTP/1.1"),
        200,
        referrer,
        BROWSER,
    )
}

pub(crate) fn log_time(secs: u32) -> String {
    format!("10/Oct/2023:13:{:02}:{:02} +0000", secs / 60, secs % 60)
}

pub(crate) fn at(secs: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2023, 10, 10, 13, secs / 60, secs % 60)
        .unwrap()
}

pub(crate) fn click(referrer: &str, page: &str, secs: u32) -> Click {
    Click {
        referrer: referrer.to_string(),
        page: page.to_string(),
        timestamp: at(secs),
    }
}
