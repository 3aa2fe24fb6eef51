use crate::aggregate::Click;
use crate::normalization::is_external_node;
use crate::track::gradient::{Rgb, TRACK_END, TRACK_START, gradient};
use chrono::{DateTime, FixedOffset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// First page of the session.
    Entry,
    /// Last page of the session.
    Exit,
    /// A one-click session's only page.
    EntryExit,
    Page,
    Referrer,
    ExternalReferrer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Forward,
    /// The visitor went back to a page already on the track.
    Back,
    /// The referrer never appeared on the track: a re-entrance or a hop
    /// through an outside page.
    ReEntrance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackNode {
    pub name: String,
    pub role: NodeRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEdge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
    pub step: usize,
    pub color: Rgb,
    /// Click time; only forward edges carry one.
    pub at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackGraph {
    pub nodes: Vec<TrackNode>,
    pub edges: Vec<TrackEdge>,
}

impl TrackGraph {
    pub fn node(&self, name: &str) -> Option<&TrackNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn edges_of(&self, kind: EdgeKind) -> impl Iterator<Item = &TrackEdge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    fn declare(&mut self, name: &str, role: NodeRole) {
        if self.node(name).is_none() {
            self.nodes.push(TrackNode {
                name: name.to_string(),
                role,
            });
        }
    }

    fn redeclare(&mut self, name: &str, role: NodeRole) {
        match self.nodes.iter_mut().find(|n| n.name == name) {
            Some(node) => node.role = role,
            None => self.declare(name, role),
        }
    }
}

/// Rebuilds the navigation graph of one session track, inferring the
/// back-button hops a server log never sees.
pub fn reconstruct(clicks: &[Click]) -> TrackGraph {
    let mut graph = TrackGraph::default();
    let count = clicks.len();
    let colors = gradient(TRACK_START, TRACK_END, count);

    for (j, click) in clicks.iter().enumerate() {
        let step = j + 1;

        let referrer_role = if is_external_node(&click.referrer) {
            NodeRole::ExternalReferrer
        } else {
            NodeRole::Referrer
        };
        graph.declare(&click.referrer, referrer_role);

        if step == count {
            let role = if count == 1 {
                NodeRole::EntryExit
            } else {
                NodeRole::Exit
            };
            graph.redeclare(&click.page, role);
        } else if step == 1 {
            graph.redeclare(&click.page, NodeRole::Entry);
        } else {
            graph.declare(&click.page, NodeRole::Page);
        }

        if j > 0 {
            let previous = &clicks[j - 1];
            if click.referrer != previous.page {
                // Never looks at the previous click or this one.
                let back_to = clicks[..j - 1]
                    .iter()
                    .rev()
                    .find(|c| c.page == click.referrer);

                let (to, kind) = match back_to {
                    Some(target) => (target.page.clone(), EdgeKind::Back),
                    None => (click.referrer.clone(), EdgeKind::ReEntrance),
                };
                graph.edges.push(TrackEdge {
                    from: previous.page.clone(),
                    to,
                    kind,
                    step: j,
                    color: colors[j - 1],
                    at: None,
                });
            }
        }

        graph.edges.push(TrackEdge {
            from: click.referrer.clone(),
            to: click.page.clone(),
            kind: EdgeKind::Forward,
            step,
            color: colors[j],
            at: Some(click.timestamp),
        });
    }

    graph
}
