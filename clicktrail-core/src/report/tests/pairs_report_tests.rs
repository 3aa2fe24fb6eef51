use crate::aggregate::{DateRange, PairAggregator};
use crate::report::{PairsReport, RankedPair};
use crate::test_support::at;
use pretty_assertions::assert_eq;

fn histogram(pairs: &[(&str, &str, u64)]) -> PairAggregator {
    let mut agg = PairAggregator::new();
    for (referrer, page, count) in pairs {
        for _ in 0..*count {
            agg.record(referrer, page);
        }
    }
    agg
}

fn ranked(referrer: &str, page: &str, count: u64) -> RankedPair {
    RankedPair {
        referrer: referrer.to_string(),
        page: page.to_string(),
        count,
    }
}

#[test]
fn keeps_the_top_pairs_by_count() {
    // Arrange
    let agg = histogram(&[("-", "/a", 3), ("/a", "/b", 5), ("/b", "/c", 1), ("/a", "/c", 2)]);

    // Act
    let report = PairsReport::build(agg.snapshot(), 2, DateRange::default(), Some("example.com"));

    // Assert
    assert_eq!(report.pairs, vec![ranked("/a", "/b", 5), ranked("-", "/a", 3)]);
    assert_eq!(report.max_pair_count, 5);
    assert_eq!(report.min_pair_count, 3);
    assert_eq!(report.top_clicks, 8);
    assert_eq!(report.all_clicks, 11);
    assert_eq!(report.domain, "example.com");
}

#[test]
fn coverage_is_the_shown_share_in_percent() {
    // Arrange
    let agg = histogram(&[("-", "/a", 3), ("/a", "/b", 1)]);

    // Act
    let report = PairsReport::build(agg.snapshot(), 1, DateRange::default(), None);

    // Assert
    assert_eq!(report.coverage(), 75.0);
    assert_eq!(report.domain, "");
}

#[test]
fn node_totals_cover_hidden_pairs() {
    // Arrange
    let agg = histogram(&[("/a", "/b", 4), ("/c", "/b", 1)]);

    // Act
    let report = PairsReport::build(agg.snapshot(), 1, DateRange::default(), None);

    // Assert
    assert_eq!(report.pairs.len(), 1);
    assert_eq!(report.totals.hits("/b"), Some(5));
    assert_eq!(report.totals.referrals("/c"), Some(1));
}

#[test]
fn limit_above_distinct_pairs_shows_everything() {
    // Arrange
    let agg = histogram(&[("-", "/a", 1), ("/a", "/b", 1)]);

    // Act
    let report = PairsReport::build(agg.snapshot(), 15, DateRange::default(), None);

    // Assert
    assert_eq!(report.pairs.len(), 2);
    assert_eq!(report.coverage(), 100.0);
}

#[test]
fn empty_histogram_builds_an_empty_report() {
    // Arrange
    let agg = PairAggregator::new();

    // Act
    let report = PairsReport::build(agg.snapshot(), 15, DateRange::default(), None);

    // Assert
    assert!(report.is_empty());
    assert_eq!(report.coverage(), 0.0);
    assert_eq!(report.max_pair_count, 0);
}

#[test]
fn date_range_is_carried_through() {
    // Arrange
    let agg = histogram(&[("-", "/a", 1)]);
    let mut range = DateRange::default();
    range.observe(at(5));
    range.observe(at(65));

    // Act
    let report = PairsReport::build(agg.snapshot(), 15, range, None);

    // Assert
    assert_eq!(report.date_range.start, Some(at(5)));
    assert_eq!(report.date_range.end, Some(at(65)));
}
