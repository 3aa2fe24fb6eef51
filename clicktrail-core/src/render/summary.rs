use crate::ingest::format_timestamp;
use crate::pipeline::RunSummary;

/// Plain-text end-of-run report printed by `clicktrail run`.
pub fn render_run_summary(summary: &RunSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Clicktrail Summary\n\
         ==================\n\
         lines: {} | accepted: {} | skipped: {} | blank: {}\n\n",
        summary.lines_read,
        summary.accepted,
        summary.skipped.total(),
        summary.blank_lines
    ));

    if summary.skipped.total() > 0 {
        out.push_str("Skipped by rule: ");
        for (reason, count) in summary.skipped.iter() {
            out.push_str(&format!("{reason}={count} "));
        }
        out.push('\n');
    }

    if summary.external_referrers_dropped > 0 {
        out.push_str(&format!(
            "External referrers dropped: {}\n",
            summary.external_referrers_dropped
        ));
    }

    match (summary.date_range.start, summary.date_range.end) {
        (Some(start), Some(end)) => out.push_str(&format!(
            "Dates: {} .. {}\n",
            format_timestamp(&start),
            format_timestamp(&end)
        )),
        _ => out.push_str("Dates: <no accepted lines>\n"),
    }

    out.push_str(&format!(
        "\nPairs: {} distinct | Sessions: {} tracked ({} clicks without session)\n",
        summary.distinct_pairs, summary.sessions, summary.untracked_clicks
    ));
    out.push_str(&format!("Render passes: {}\n", summary.render_passes));

    out
}
