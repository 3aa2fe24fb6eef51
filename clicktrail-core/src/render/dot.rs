use crate::ingest::format_timestamp;
use crate::normalization::is_external_node;
use crate::report::{PairsReport, SessionReport};
use crate::track::{EdgeKind, NodeRole};
use chrono::TimeDelta;

//------------------------------------------------------------------------------
// Referrer pairs graph
//------------------------------------------------------------------------------

/// Minimum relative weight of an edge, so faint links stay visible.
const MIN_EDGE_WEIGHT: f64 = 0.10;
const MIN_REFERRER_WEIGHT: f64 = 0.30;
const MIN_PAGE_WEIGHT: f64 = 0.05;

pub fn render_pairs_dot(report: &PairsReport) -> String {
    let mut out = String::new();

    out.push_str(
        "digraph navipairs {\n\
         \tgraph [splines=true overlap=false rankdir=TB size=\"10,8\"]\n\
         \tnode [style=filled]\n\
         \tedge [style=bold, arrowsize=2.0]\n",
    );

    for pair in &report.pairs {
        let w = weight255(pair.count, report.max_pair_count, MIN_EDGE_WEIGHT);
        out.push_str(&format!(
            "\"{}\" -> \"{}\" [label=\"{}\", fontcolor=\"#{:02x}00{:02x}\" color=\"#{:02x}00{:02x}{:02x}\"];\n",
            escape(&pair.referrer),
            escape(&pair.page),
            pair.count,
            w,
            255 - w,
            w,
            255 - w,
            w
        ));
    }

    // Page declarations replace an earlier referrer declaration of the same
    // node but keep its position.
    let mut nodes: Vec<(&str, String)> = Vec::new();
    for pair in &report.pairs {
        if !nodes.iter().any(|(name, _)| *name == pair.referrer) {
            nodes.push((&pair.referrer, referrer_node(report, &pair.referrer)));
        }

        let decl = page_node(report, &pair.page);
        match nodes.iter_mut().find(|(name, _)| *name == pair.page) {
            Some(slot) => slot.1 = decl,
            None => nodes.push((&pair.page, decl)),
        }
    }
    for (_, decl) in nodes {
        out.push_str(&decl);
    }

    out.push_str(&format!(
        "graph [labelloc=t, label=\"{} Top {} Referrer Graph\\n\\n\
         Dates Analyzed:\\nStart: {}\\nEnd: {}\\n\
         Top Pairs account for {} of {} clicks ({}%)\\n\\n\
         Legend:\\n\
         Referrers shown as brown boxes; intensity shows relative number of referrals.\\n\
         Site Pages shown in ovals, colored from red to blue, representing popularity of page.\\n\
         Hit and Referral Counts are totals for period, not just those shown on graph.\\n\\n\"]\n",
        escape(&report.domain),
        report.limit,
        date_or_na(report.date_range.start.as_ref()),
        date_or_na(report.date_range.end.as_ref()),
        report.top_clicks,
        report.all_clicks,
        round2(report.coverage()),
    ));
    out.push_str("}\n");

    out
}

fn referrer_node(report: &PairsReport, name: &str) -> String {
    let referrals = report.totals.referrals(name).unwrap_or(0);
    let alpha = weight255(referrals, report.totals.max_referrals, MIN_REFERRER_WEIGHT);
    let referrals_str = format!("({})\\n", plural(referrals, "referral"));

    if is_external_node(name) {
        format!(
            "\"{0}\" [label=\"{0}\\n{1}\", color=\"#999966{2:02x}\", shape=box];\n",
            escape(name),
            referrals_str,
            alpha
        )
    } else {
        let hits_str = report
            .totals
            .hits(name)
            .map(|h| format!("({})", plural(h, "hit")))
            .unwrap_or_default();
        format!(
            "\"{0}\" [label=\"{0}\\n{1}{2}\", color=\"#330099{3:02x}\"];\n",
            escape(name),
            referrals_str,
            hits_str,
            alpha
        )
    }
}

fn page_node(report: &PairsReport, name: &str) -> String {
    let hits = report.totals.hits(name).unwrap_or(0);
    let w = weight255(hits, report.totals.max_hits, MIN_PAGE_WEIGHT);
    let referrals_str = report
        .totals
        .referrals(name)
        .map(|r| format!("({})\\n", plural(r, "referral")))
        .unwrap_or_default();

    format!(
        "\"{0}\" [label=\"{0}\\n{1}({2})\", color=\"#{3:02x}00{4:02x}{3:02x}\"];\n",
        escape(name),
        referrals_str,
        plural(hits, "hit"),
        w,
        255 - w
    )
}

//------------------------------------------------------------------------------
// Session clickstream graph
//------------------------------------------------------------------------------

pub fn render_session_dot(report: &SessionReport, domain: Option<&str>) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "digraph sessionTrack{0} {{\n\
         \tgraph [splines=true overlap=false rankdir=TB label=\"{1} Session Track #{0}\" labelloc=t]\n\
         \tnode [style=filled]\n\
         \tedge [style=bold]\n",
        report.sequence,
        escape(domain.unwrap_or_default()),
    ));

    for node in &report.graph.nodes {
        out.push_str(&format!(
            "\"{}\" [color={}];\n",
            escape(&node.name),
            node_color(node.role)
        ));
    }

    for edge in &report.graph.edges {
        match edge.kind {
            EdgeKind::Forward => {
                let at = edge
                    .at
                    .map(|ts| ts.format("%-I:%M:%S %p").to_string())
                    .unwrap_or_default();
                out.push_str(&format!(
                    "\t\"{}\" -> \"{}\" [label=\"{} - {}\", color=\"#{}\"];\n",
                    escape(&edge.from),
                    escape(&edge.to),
                    edge.step,
                    at,
                    edge.color
                ));
            }
            EdgeKind::Back | EdgeKind::ReEntrance => {
                out.push_str(&format!(
                    "\"{}\" -> \"{}\" [label=\"{} BACK\", color=\"#{}\", style=\"dashed\"];\n",
                    escape(&edge.from),
                    escape(&edge.to),
                    edge.step,
                    edge.color
                ));
            }
        }
    }

    out.push_str(&format!(
        "\"Session Length: {} minutes. {} Clicks.\\nSessionID: {}\" [shape=box];\n",
        format_minutes(report.duration),
        report.click_count,
        escape(&report.session_id)
    ));
    out.push_str("}\n");

    out
}

fn node_color(role: NodeRole) -> &'static str {
    match role {
        NodeRole::Entry | NodeRole::EntryExit => "green",
        NodeRole::Exit => "red",
        NodeRole::ExternalReferrer => "khaki4",
        NodeRole::Page | NodeRole::Referrer => "lightblue2",
    }
}

//------------------------------------------------------------------------------
// Helpers
//------------------------------------------------------------------------------

/// `value / max` scaled to 0..=255, never below `min`.
pub(crate) fn weight255(value: u64, max: u64, min: f64) -> u8 {
    let ratio = if max == 0 {
        min
    } else {
        (value as f64 / max as f64).max(min)
    };
    (ratio * 255.0).ceil().clamp(0.0, 255.0) as u8
}

/// Escapes a value for use inside a double-quoted DOT string.
pub(crate) fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' | '\r' => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

/// `m:ss`, e.g. `4:07`.
pub(crate) fn format_minutes(duration: TimeDelta) -> String {
    let secs = duration.num_seconds().max(0);
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn plural(n: u64, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn date_or_na(ts: Option<&chrono::DateTime<chrono::FixedOffset>>) -> String {
    ts.map(format_timestamp).unwrap_or_else(|| "n/a".to_string())
}
