use crate::classify::BotDetector;
use crate::conf::ConfigError;
use crate::test_support::{BROWSER, GOOGLEBOT};

fn tokens(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn default_tokens_match_case_insensitively() {
    // Arrange
    let bots = BotDetector::new(&tokens(&["bot", "crawler", "walker", "slurp"]), false).unwrap();

    // Act & Assert
    assert!(bots.is_bot(GOOGLEBOT));
    assert!(bots.is_bot("Mozilla/5.0 (compatible; Yahoo! Slurp)"));
    assert!(bots.is_bot("SomeCRAWLER/1.0"));
    assert!(!bots.is_bot(BROWSER));
}

#[test]
fn no_tokens_match_nothing() {
    // Arrange
    let bots = BotDetector::new(&[], false).unwrap();

    // Act & Assert
    assert!(!bots.is_bot(GOOGLEBOT));
}

#[test]
fn empty_tokens_are_ignored() {
    // Arrange
    let bots = BotDetector::new(&tokens(&["", "spider"]), false).unwrap();

    // Act & Assert
    assert!(!bots.is_bot(BROWSER));
    assert!(bots.is_bot("BaiduSpider"));
}

#[test]
fn invalid_token_is_a_config_error() {
    // Act
    let err = BotDetector::new(&tokens(&["bot("]), false).unwrap_err();

    // Assert
    assert!(
        matches!(err, ConfigError::InvalidBotPattern { ref pattern, .. } if pattern == "bot("),
        "got {err:?}"
    );
}

#[test]
fn woothee_recognizes_crawlers_without_tokens() {
    // Arrange
    let bots = BotDetector::new(&[], true).unwrap();

    // Act & Assert
    assert!(bots.is_bot(GOOGLEBOT));
    assert!(!bots.is_bot(BROWSER));
}
