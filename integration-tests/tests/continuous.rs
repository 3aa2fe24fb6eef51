use integration_tests::harness::{AccessLog, TestRun};
use pretty_assertions::assert_eq;

fn visits(count: u32) -> AccessLog {
    (0..count).fold(AccessLog::new(), |log, i| {
        log.hit(&format!("s{}", i % 2), i * 10, &format!("/p{i}"), "-")
    })
}

#[test]
fn renders_every_n_accepted_lines() {
    // Arrange
    let run = TestRun::new(&visits(7)).configure(|cfg| cfg.reports.continuous_every = 3);

    // Act
    let summary = run.analyze();

    // Assert
    assert_eq!(summary.accepted, 7);
    assert_eq!(summary.render_passes, 2);
}

#[test]
fn last_partial_batch_is_not_rendered() {
    // Arrange
    let run = TestRun::new(&visits(7)).configure(|cfg| cfg.reports.continuous_every = 3);

    // Act
    run.analyze();

    // Assert
    let dot = run.pairs_report();
    assert!(dot.contains("of 6 clicks"));
    assert!(!dot.contains("\"/p6\""));
}

#[test]
fn fewer_lines_than_the_interval_render_nothing() {
    // Arrange
    let run = TestRun::new(&visits(9)).configure(|cfg| cfg.reports.continuous_every = 10);

    // Act
    let summary = run.analyze();

    // Assert
    assert_eq!(summary.render_passes, 0);
    assert!(!run.reports_dir().join("pairs.dot").exists());
}

#[test]
fn tenth_line_triggers_exactly_one_render() {
    // Arrange
    let run = TestRun::new(&visits(10)).configure(|cfg| cfg.reports.continuous_every = 10);

    // Act
    let summary = run.analyze();

    // Assert
    assert_eq!(summary.render_passes, 1);
    assert_eq!(
        run.report_files(),
        vec!["pairs.dot", "track-s0.dot", "track-s1.dot"]
    );
}

#[test]
fn skipped_lines_do_not_count_towards_the_interval() {
    // Arrange
    let log = visits(2)
        .hit("s0", 100, "/style.css", "-")
        .hit("s0", 110, "/script.js", "-")
        .hit("s1", 120, "/p9", "-");
    let run = TestRun::new(&log).configure(|cfg| cfg.reports.continuous_every = 3);

    // Act
    let summary = run.analyze();

    // Assert
    assert_eq!(summary.render_passes, 1);
    assert!(run.pairs_report().contains("of 3 clicks"));
}

#[test]
fn session_graphs_grow_between_passes() {
    // Arrange
    let run = TestRun::new(&visits(6)).configure(|cfg| cfg.reports.continuous_every = 2);

    // Act
    run.analyze();

    // Assert
    let dot = run.session_report("s0");
    assert!(dot.contains("3 Clicks."));
}
