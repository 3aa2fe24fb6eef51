use crate::ingest::LogRecord;
use pretty_assertions::assert_eq;

fn fields(line: &str) -> Vec<String> {
    LogRecord::parse(line).fields().to_vec()
}

#[test]
fn splits_combined_line_into_columns() {
    // Arrange
    let line = r#"10.0.0.1 - - [10/Oct/2023:13:55:36 +0000] "GET /a?b=1 HTTP/1.1" 200 512 "http://example.com/" "Mozilla/5.0 (X11)""#;

    // Act
    let record = LogRecord::parse(line);

    // Assert
    assert_eq!(record.len(), 10);
    assert_eq!(record.get(0), Some("10.0.0.1"));
    assert_eq!(record.get(3), Some("[10/Oct/2023:13:55:36"));
    assert_eq!(record.get(4), Some("+0000]"));
    assert_eq!(record.get(5), Some("GET /a?b=1 HTTP/1.1"));
    assert_eq!(record.get(6), Some("200"));
    assert_eq!(record.get(8), Some("http://example.com/"));
    assert_eq!(record.get(9), Some("Mozilla/5.0 (X11)"));
    assert_eq!(record.get(10), None);
}

#[test]
fn doubled_quote_inside_quotes_is_a_literal_quote() {
    assert_eq!(fields(r#"a "say ""hi""" b"#), vec!["a", r#"say "hi""#, "b"]);
}

#[test]
fn backslash_inside_quotes_keeps_the_next_character() {
    assert_eq!(
        fields(r#""agent \"x\" 1.0" z"#),
        vec![r#"agent \"x\" 1.0"#, "z"]
    );
}

#[test]
fn consecutive_spaces_produce_empty_fields() {
    assert_eq!(fields("a  b"), vec!["a", "", "b"]);
}

#[test]
fn empty_quoted_field_is_empty() {
    assert_eq!(fields(r#"a "" b"#), vec!["a", "", "b"]);
}

#[test]
fn unterminated_quote_runs_to_end_of_line() {
    assert_eq!(fields(r#"a "b c"#), vec!["a", "b c"]);
}

#[test]
fn trailing_newline_is_ignored() {
    assert_eq!(fields("a b\r\n"), vec!["a", "b"]);
}

#[test]
fn empty_line_has_no_fields() {
    // Act
    let record = LogRecord::parse("");

    // Assert
    assert!(record.is_empty());
}
