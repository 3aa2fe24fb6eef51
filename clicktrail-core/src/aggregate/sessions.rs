use ahash::AHashMap;
use chrono::{DateTime, FixedOffset, TimeDelta};
use serde::Serialize;

/// A single normalized site visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Click {
    pub referrer: String,
    pub page: String,
    pub timestamp: DateTime<FixedOffset>,
}

/// Every click of one session, in log-arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTrack {
    session_id: String,
    clicks: Vec<Click>,
}

impl SessionTrack {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            clicks: Vec::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn clicks(&self) -> &[Click] {
        &self.clicks
    }

    pub fn len(&self) -> usize {
        self.clicks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clicks.is_empty()
    }

    /// Time between the first and the last click.
    pub fn duration(&self) -> TimeDelta {
        match (self.clicks.first(), self.clicks.last()) {
            (Some(first), Some(last)) => last.timestamp - first.timestamp,
            _ => TimeDelta::zero(),
        }
    }

    pub fn visits(&self, page: &str) -> bool {
        self.clicks.iter().any(|c| c.page == page)
    }

    fn push(&mut self, click: Click) {
        self.clicks.push(click);
    }
}

/// All session tracks, keyed by session id, in first-seen order.
#[derive(Debug, Clone)]
pub struct SessionTrackStore {
    no_session: String,
    tracks: Vec<SessionTrack>,
    index: AHashMap<String, usize>,
}

impl PartialEq for SessionTrackStore {
    fn eq(&self, other: &Self) -> bool {
        self.no_session == other.no_session && self.tracks == other.tracks
    }
}

impl Eq for SessionTrackStore {}

impl SessionTrackStore {
    /// `no_session` is the id that means "no session"; it is never tracked.
    pub fn new(no_session: impl Into<String>) -> Self {
        Self {
            no_session: no_session.into(),
            tracks: Vec::new(),
            index: AHashMap::new(),
        }
    }

    /// Appends a click. Returns false when the id is the no-session sentinel.
    pub fn append(&mut self, session_id: &str, click: Click) -> bool {
        if session_id == self.no_session {
            return false;
        }

        let i = match self.index.get(session_id) {
            Some(&i) => i,
            None => {
                self.index.insert(session_id.to_string(), self.tracks.len());
                self.tracks.push(SessionTrack::new(session_id));
                self.tracks.len() - 1
            }
        };
        self.tracks[i].push(click);
        true
    }

    pub fn get(&self, session_id: &str) -> Option<&SessionTrack> {
        self.index.get(session_id).map(|&i| &self.tracks[i])
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SessionTrack> {
        self.tracks.iter()
    }

    /// Union with another shard's tracks. Shards are expected to be
    /// partitioned by session id; a shared id gets the other's clicks
    /// appended.
    pub fn merge(&mut self, other: &SessionTrackStore) {
        for track in other.iter() {
            for click in track.clicks() {
                self.append(track.session_id(), click.clone());
            }
        }
    }
}
