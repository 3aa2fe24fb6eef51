use crate::classify::SkipReason;
use crate::conf::{ClicktrailConfig, ReferrerMode};
use crate::error::AnalyzeError;
use crate::normalization::{DIRECT_LINK, UrlAliases};
use crate::pipeline::{Analyzer, LineOutcome, MemorySink, RenderPass};
use crate::test_support::{GOOGLEBOT, combined_line, hit, log_time};
use pretty_assertions::assert_eq;

fn config() -> ClicktrailConfig {
    let mut cfg = ClicktrailConfig::default();
    cfg.cleaning.domain = Some("example.com".to_string());
    cfg
}

fn analyzer(cfg: &ClicktrailConfig) -> Analyzer {
    Analyzer::new(cfg, UrlAliases::new()).unwrap()
}

fn run(cfg: &ClicktrailConfig, lines: &[String]) -> (Analyzer, MemorySink) {
    let mut analyzer = analyzer(cfg);
    let mut sink = MemorySink::new();
    let input = lines.join("\n");
    analyzer.run(input.as_bytes(), &mut sink).unwrap();
    (analyzer, sink)
}

fn browsing_log() -> Vec<String> {
    vec![
        hit("10.0.0.1", 0, "/", "-"),
        hit("10.0.0.1", 30, "/docs/", "http://example.com/"),
        hit("10.0.0.2", 40, "/", "https://google.com/search?q=x"),
        hit("10.0.0.1", 50, "/pricing", "http://example.com/"),
        hit("10.0.0.2", 70, "/docs/", "http://www.example.com/"),
    ]
}

//-----------------------------------------------------------------------------
// Line handling
//-----------------------------------------------------------------------------

#[test]
fn accepted_line_becomes_a_pair_and_a_click() {
    // Arrange
    let cfg = config();
    let mut analyzer = analyzer(&cfg);

    // Act
    let outcome = analyzer
        .process_line(&hit("10.0.0.1", 0, "/docs/index.html?x=1", "-"))
        .unwrap();

    // Assert
    assert_eq!(outcome, LineOutcome::Accepted { render_due: false });
    let ctx = analyzer.context();
    assert_eq!(ctx.pairs.snapshot().count(DIRECT_LINK, "/docs/"), 1);
    let track = ctx.sessions.get("10.0.0.1").unwrap();
    assert_eq!(track.clicks()[0].page, "/docs/");
}

#[test]
fn blank_lines_are_counted_and_ignored() {
    // Arrange
    let cfg = config();
    let mut analyzer = analyzer(&cfg);

    // Act
    let outcome = analyzer.process_line("   \r\n").unwrap();

    // Assert
    assert_eq!(outcome, LineOutcome::Blank);
    assert_eq!(analyzer.context().blank_lines, 1);
    assert_eq!(analyzer.context().accepted, 0);
}

#[test]
fn skipped_lines_are_counted_by_reason() {
    // Arrange
    let cfg = config();
    let lines = vec![
        hit("10.0.0.1", 0, "/logo.png", "-"),
        combined_line("10.0.0.1", &log_time(1), "GET / HTTP/1.1", 200, "-", GOOGLEBOT),
        combined_line("10.0.0.1", &log_time(2), "GET /missing HTTP/1.1", 404, "-", "curl/8"),
        hit("10.0.0.1", 3, "/", "-"),
    ];

    // Act
    let (analyzer, _) = run(&cfg, &lines);

    // Assert
    let ctx = analyzer.context();
    assert_eq!(ctx.skipped.get(SkipReason::Ext), 1);
    assert_eq!(ctx.skipped.get(SkipReason::Bot), 1);
    assert_eq!(ctx.skipped.get(SkipReason::Status), 1);
    assert_eq!(ctx.accepted, 1);
    assert_eq!(ctx.pairs.snapshot().total(), 1);
}

#[test]
fn unparseable_request_aborts_the_run() {
    // Arrange
    let cfg = config();
    let lines = vec![
        hit("10.0.0.1", 0, "/", "-"),
        combined_line("10.0.0.1", &log_time(1), "GARBAGE", 200, "-", "curl/8"),
    ];
    let mut analyzer = analyzer(&cfg);
    let mut sink = MemorySink::new();

    // Act
    let err = analyzer
        .run(lines.join("\n").as_bytes(), &mut sink)
        .unwrap_err();

    // Assert
    assert!(matches!(err, AnalyzeError::MalformedLine { line: 2, .. }));
    assert!(sink.passes.is_empty());
}

#[test]
fn bad_timestamp_is_malformed() {
    // Arrange
    let cfg = config();
    let mut analyzer = analyzer(&cfg);
    let line = combined_line(
        "10.0.0.1",
        "10/Foo/2023:13:00:00 +0000",
        "GET / HTTP/1.1",
        200,
        "-",
        "curl/8",
    );

    // Act
    let err = analyzer.process_line(&line).unwrap_err();

    // Assert
    assert!(matches!(err, AnalyzeError::MalformedLine { line: 1, .. }));
}

#[test]
fn invalid_utf8_is_replaced() {
    // Arrange
    let cfg = config();
    let mut analyzer = analyzer(&cfg);
    let mut sink = MemorySink::new();
    let mut input = hit("10.0.0.1", 0, "/caf", "-").into_bytes();
    let at = input.iter().position(|b| *b == b'f').unwrap() + 1;
    input.insert(at, 0xE9);

    // Act
    let summary = analyzer.run(&input[..], &mut sink).unwrap();

    // Assert
    assert_eq!(summary.accepted, 1);
    assert_eq!(
        analyzer.context().pairs.snapshot().count(DIRECT_LINK, "/caf\u{FFFD}"),
        1
    );
}

//-----------------------------------------------------------------------------
// Aggregation
//-----------------------------------------------------------------------------

#[test]
fn histogram_weight_equals_accepted_lines() {
    // Arrange
    let cfg = config();

    // Act
    let (analyzer, _) = run(&cfg, &browsing_log());

    // Assert
    let ctx = analyzer.context();
    assert_eq!(ctx.pairs.snapshot().total(), ctx.accepted);
    assert_eq!(ctx.accepted, 5);
    assert_eq!(ctx.pairs.snapshot().count("/", "/docs/"), 2);
    assert_eq!(ctx.pairs.snapshot().count("https://google.com/search", "/"), 1);
}

#[test]
fn sessions_keep_arrival_order() {
    // Arrange
    let cfg = config();

    // Act
    let (analyzer, _) = run(&cfg, &browsing_log());

    // Assert
    let pages: Vec<&str> = analyzer
        .context()
        .sessions
        .get("10.0.0.1")
        .unwrap()
        .clicks()
        .iter()
        .map(|c| c.page.as_str())
        .collect();
    assert_eq!(pages, vec!["/", "/docs/", "/pricing"]);
}

#[test]
fn no_session_clicks_are_counted_but_not_tracked() {
    // Arrange
    let cfg = config();
    let lines = vec![hit("-", 0, "/", "-"), hit("10.0.0.1", 1, "/", "-")];

    // Act
    let (analyzer, _) = run(&cfg, &lines);

    // Assert
    let ctx = analyzer.context();
    assert_eq!(ctx.untracked_clicks, 1);
    assert_eq!(ctx.sessions.len(), 1);
    assert_eq!(ctx.pairs.snapshot().total(), 2);
}

#[test]
fn internal_mode_drops_outside_referrers() {
    // Arrange
    let mut cfg = config();
    cfg.cleaning.referrer_mode = ReferrerMode::Internal;

    // Act
    let (analyzer, _) = run(&cfg, &browsing_log());

    // Assert
    let ctx = analyzer.context();
    assert_eq!(ctx.accepted, 5);
    assert_eq!(ctx.external_referrers_dropped, 1);
    assert_eq!(ctx.pairs.snapshot().total(), 4);
    assert_eq!(ctx.sessions.get("10.0.0.2").unwrap().len(), 1);
}

#[test]
fn date_range_spans_accepted_lines() {
    // Arrange
    let cfg = config();

    // Act
    let (analyzer, _) = run(&cfg, &browsing_log());

    // Assert
    let range = analyzer.context().date_range;
    assert_eq!(range.start, Some(crate::test_support::at(0)));
    assert_eq!(range.end, Some(crate::test_support::at(70)));
}

#[test]
fn rerunning_the_same_log_is_deterministic() {
    // Arrange
    let cfg = config();

    // Act
    let (first, first_sink) = run(&cfg, &browsing_log());
    let (second, second_sink) = run(&cfg, &browsing_log());

    // Assert
    assert_eq!(first.context(), second.context());
    let first_pairs = first_sink.last().unwrap().pairs.as_ref().unwrap();
    let second_pairs = second_sink.last().unwrap().pairs.as_ref().unwrap();
    assert_eq!(first_pairs.pairs, second_pairs.pairs);
}

//-----------------------------------------------------------------------------
// Rendering
//-----------------------------------------------------------------------------

#[test]
fn batch_mode_renders_once_at_the_end() {
    // Arrange
    let cfg = config();

    // Act
    let (analyzer, sink) = run(&cfg, &browsing_log());

    // Assert
    assert_eq!(sink.passes.len(), 1);
    let pass = sink.last().unwrap();
    assert_eq!(pass.pass, RenderPass::Final);
    assert_eq!(pass.pairs.as_ref().unwrap().all_clicks, 5);
    let sessions: Vec<&str> = pass.sessions.iter().map(|s| s.session_id.as_str()).collect();
    assert_eq!(sessions, vec!["10.0.0.1", "10.0.0.2"]);
    assert_eq!(analyzer.summary().render_passes, 1);
}

#[test]
fn batch_mode_applies_limits_and_required_urls() {
    // Arrange
    let mut cfg = config();
    cfg.reports.sessions = 1;
    cfg.reports.session_require_urls = vec!["/docs/".to_string()];
    cfg.reports.pairs = 2;

    // Act
    let (_, sink) = run(&cfg, &browsing_log());

    // Assert
    let pass = sink.last().unwrap();
    assert_eq!(pass.pairs.as_ref().unwrap().pairs.len(), 2);
    assert_eq!(pass.sessions.len(), 1);
    assert_eq!(pass.sessions[0].session_id, "10.0.0.1");
}

#[test]
fn zero_limits_disable_reports() {
    // Arrange
    let mut cfg = config();
    cfg.reports.pairs = 0;
    cfg.reports.sessions = 0;

    // Act
    let (_, sink) = run(&cfg, &browsing_log());

    // Assert
    let pass = sink.last().unwrap();
    assert!(pass.pairs.is_none());
    assert!(pass.sessions.is_empty());
}

#[test]
fn empty_log_renders_no_pairs() {
    // Arrange
    let cfg = config();

    // Act
    let (analyzer, sink) = run(&cfg, &[]);

    // Assert
    assert_eq!(sink.passes.len(), 1);
    assert!(sink.last().unwrap().pairs.is_none());
    assert_eq!(analyzer.summary().lines_read, 0);
}

#[test]
fn continuous_mode_renders_on_the_tenth_line() {
    // Arrange
    let mut cfg = config();
    cfg.reports.continuous_every = 10;
    let mut analyzer = analyzer(&cfg);
    let lines: Vec<String> = (0..10)
        .map(|i| hit(&format!("10.0.0.{}", i % 3), i, &format!("/p{i}"), "-"))
        .collect();

    // Act
    let due: Vec<bool> = lines
        .iter()
        .map(|l| match analyzer.process_line(l).unwrap() {
            LineOutcome::Accepted { render_due } => render_due,
            other => panic!("unexpected outcome {other:?}"),
        })
        .collect();

    // Assert
    assert!(due[..9].iter().all(|d| !d));
    assert!(due[9]);
    assert_eq!(analyzer.scheduler().dirty().len(), 3);
}

#[test]
fn continuous_mode_renders_dirty_sessions_and_skips_the_final_pass() {
    // Arrange
    let mut cfg = config();
    cfg.reports.continuous_every = 10;
    let mut lines: Vec<String> = (0..10)
        .map(|i| hit(&format!("10.0.0.{}", i % 3), i, &format!("/p{i}"), "-"))
        .collect();
    lines.extend((10..15).map(|i| hit("10.0.0.9", i, "/late", "-")));

    // Act
    let (analyzer, sink) = run(&cfg, &lines);

    // Assert
    assert_eq!(sink.passes.len(), 1);
    let pass = sink.last().unwrap();
    assert_eq!(pass.pass, RenderPass::Continuous { accepted: 10 });
    let sessions: Vec<&str> = pass.sessions.iter().map(|s| s.session_id.as_str()).collect();
    assert_eq!(sessions, vec!["10.0.0.0", "10.0.0.1", "10.0.0.2"]);
    assert_eq!(pass.pairs.as_ref().unwrap().all_clicks, 10);

    // The late session stays dirty for the next pass, which never comes.
    assert!(analyzer.scheduler().dirty().contains("10.0.0.9"));
    assert_eq!(analyzer.summary().render_passes, 1);
}

#[test]
fn continuous_passes_only_repeat_touched_sessions() {
    // Arrange
    let mut cfg = config();
    cfg.reports.continuous_every = 2;
    let lines = vec![
        hit("a", 0, "/", "-"),
        hit("b", 1, "/", "-"),
        hit("a", 2, "/x", "http://example.com/"),
        hit("a", 3, "/y", "http://example.com/x"),
    ];

    // Act
    let (_, sink) = run(&cfg, &lines);

    // Assert
    let passes: Vec<Vec<&str>> = sink
        .passes
        .iter()
        .map(|p| p.sessions.iter().map(|s| s.session_id.as_str()).collect())
        .collect();
    assert_eq!(passes, vec![vec!["a", "b"], vec!["a"]]);
}
