use crate::conf::CleaningConfig;
use crate::normalization::{Referrer, RequestLineError, parse_request_line};
use ahash::AHashMap;

/// Alias that every log's `-` (no referrer) resolves to.
pub const DIRECT_LINK: &str = "Direct Link";

/// Exact-match "pretty names" for URLs and referrers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlAliases {
    map: AHashMap<String, String>,
}

impl Default for UrlAliases {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlAliases {
    pub fn new() -> Self {
        let mut map = AHashMap::new();
        map.insert("-".to_string(), DIRECT_LINK.to_string());
        Self { map }
    }

    pub fn insert(&mut self, url: impl Into<String>, alias: impl Into<String>) {
        self.map.insert(url.into(), alias.into());
    }

    /// Adds `URL<TAB>ALIAS` lines. Lines missing either part are ignored.
    pub fn extend_from_tsv(&mut self, text: &str) {
        for line in text.lines() {
            let Some((url, alias)) = line.split_once('\t') else {
                continue;
            };
            let alias = alias.trim_end();
            if !url.is_empty() && !alias.is_empty() {
                self.insert(url, alias);
            }
        }
    }

    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.map.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Turns raw URL and referrer fields into comparable canonical keys.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    aliases: UrlAliases,
    index_pages: Vec<String>,
    hostnames: Vec<String>,
}

impl Canonicalizer {
    /// `hostnames` are matched in order and should already be lowercase.
    pub fn new(aliases: UrlAliases, index_pages: Vec<String>, hostnames: Vec<String>) -> Self {
        Self {
            aliases,
            index_pages,
            hostnames,
        }
    }

    pub fn from_config(cfg: &CleaningConfig, aliases: UrlAliases) -> Self {
        Self::new(aliases, cfg.index_pages.clone(), cfg.declared_hostnames())
    }

    /// The request path of a raw request line, query string removed.
    pub fn canonical_path<'a>(&self, raw: &'a str) -> Result<&'a str, RequestLineError> {
        Ok(parse_request_line(raw)?.path())
    }

    pub fn normalize_url(&self, raw: &str) -> Result<String, RequestLineError> {
        let path = self.canonical_path(raw)?;
        let aliased = self.aliases.resolve(path);

        Ok(self.collapse_index(aliased.to_string()))
    }

    /// Normalizes a referrer field.
    ///
    /// Absolute URLs pointing at one of the site's hostnames, or at the
    /// virtual host that served this hit, become site paths. Only internal
    /// referrers are alias-resolved and index-collapsed.
    pub fn normalize_referrer(&self, raw: &str, serving_host: Option<&str>) -> Referrer {
        let end = raw.find(['?', ' ']).unwrap_or(raw.len());
        let referrer = &raw[..end];

        let Some((authority, path)) = split_absolute_url(referrer) else {
            return Referrer::Internal(self.normalize_internal(referrer));
        };

        let host = host_of(authority);
        let serving = serving_host.map(host_of);
        let internal = self
            .hostnames
            .iter()
            .map(String::as_str)
            .chain(serving.as_deref())
            .any(|name| host_matches(&host, name));

        if internal {
            let path = if path.is_empty() { "/" } else { path };
            Referrer::Internal(self.normalize_internal(path))
        } else {
            Referrer::External(referrer.to_string())
        }
    }

    fn normalize_internal(&self, path: &str) -> String {
        self.collapse_index(self.aliases.resolve(path).to_string())
    }

    /// `/docs/index.html` becomes `/docs/`.
    fn collapse_index(&self, mut path: String) -> String {
        for index in &self.index_pages {
            if index.is_empty() {
                continue;
            }
            if let Some(parent) = path.strip_suffix(index.as_str()) {
                if parent.ends_with('/') {
                    path.truncate(parent.len());
                }
            }
        }
        path
    }
}

/// `http://` or `https://`, scheme matched case-insensitively.
pub fn is_absolute_url(value: &str) -> bool {
    split_absolute_url(value).is_some()
}

/// Nodes rendered as "outside the site": absolute URLs and direct hits.
pub fn is_external_node(value: &str) -> bool {
    value == DIRECT_LINK || is_absolute_url(value)
}

/// Splits an absolute http(s) URL into `(authority, path)`.
fn split_absolute_url(value: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = value.split_once("://")?;
    if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
        return None;
    }

    let end = rest.find('/').unwrap_or(rest.len());
    Some((&rest[..end], &rest[end..]))
}

/// Lowercased host of an authority, without userinfo or port.
/// Lowercased host of a URL authority or `Host` value, without user info or
/// port. A bare IPv6 address keeps all of its colons.
pub fn host_of(authority: &str) -> String {
    let host = authority.rsplit_once('@').map(|(_, h)| h).unwrap_or(authority);
    let host = match host.rsplit_once(':') {
        Some((h, port))
            if port.chars().all(|c| c.is_ascii_digit())
                && (!h.contains(':') || h.ends_with(']')) =>
        {
            h
        }
        _ => host,
    };
    host.to_ascii_lowercase()
}

/// A host matches a name when it is the name or one of its subdomains.
fn host_matches(host: &str, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    host == name
        || host
            .strip_suffix(name)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
