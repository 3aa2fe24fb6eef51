use crate::conf::{CleaningConfig, ConfigError};
use regex::{Regex, RegexBuilder};
use std::fmt;
use woothee::parser::Parser;

/// Recognizes crawler user agents.
///
/// Configured tokens are regex fragments joined into one case-insensitive
/// alternation. Optionally woothee's crawler database is consulted as well.
pub struct BotDetector {
    pattern: Option<Regex>,
    crawlers: Option<Parser>,
}

impl fmt::Debug for BotDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotDetector")
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("crawlers", &self.crawlers.is_some())
            .finish()
    }
}

impl BotDetector {
    pub fn new(tokens: &[String], detect_crawlers: bool) -> Result<Self, ConfigError> {
        let tokens: Vec<&str> = tokens
            .iter()
            .map(String::as_str)
            .filter(|t| !t.is_empty())
            .collect();

        let pattern = if tokens.is_empty() {
            None
        } else {
            let joined = tokens.join("|");
            let regex = RegexBuilder::new(&joined)
                .case_insensitive(true)
                .build()
                .map_err(|e| ConfigError::InvalidBotPattern {
                    pattern: joined.clone(),
                    source: e,
                })?;
            Some(regex)
        };

        Ok(Self {
            pattern,
            crawlers: detect_crawlers.then(Parser::new),
        })
    }

    pub fn from_config(cfg: &CleaningConfig) -> Result<Self, ConfigError> {
        Self::new(&cfg.skip_bot_tokens, cfg.detect_crawlers)
    }

    pub fn is_bot(&self, user_agent: &str) -> bool {
        if self
            .pattern
            .as_ref()
            .is_some_and(|p| p.is_match(user_agent))
        {
            return true;
        }

        self.crawlers
            .as_ref()
            .and_then(|parser| parser.parse(user_agent))
            .is_some_and(|result| result.category == "crawler")
    }
}
