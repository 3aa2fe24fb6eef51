use crate::aggregate::{SessionTrack, SessionTrackStore};
use crate::track::{TrackGraph, reconstruct};
use chrono::TimeDelta;

/// One session graph of a render pass.
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// 1-based position within the render pass.
    pub sequence: usize,
    pub session_id: String,
    pub graph: TrackGraph,
    pub click_count: usize,
    pub duration: TimeDelta,
}

impl SessionReport {
    pub fn build(sequence: usize, track: &SessionTrack) -> Self {
        Self {
            sequence,
            session_id: track.session_id().to_string(),
            graph: reconstruct(track.clicks()),
            click_count: track.len(),
            duration: track.duration(),
        }
    }
}

/// True when the track visits one of `required`, or when nothing is required.
pub fn session_matches(track: &SessionTrack, required: &[String]) -> bool {
    required.is_empty() || required.iter().any(|url| track.visits(url))
}

/// The `limit` longest tracks that pass the required-URL filter. Equal
/// lengths keep first-seen order.
pub fn select_top_sessions<'a>(
    store: &'a SessionTrackStore,
    limit: usize,
    required: &[String],
) -> Vec<&'a SessionTrack> {
    let mut tracks: Vec<&SessionTrack> = store.iter().collect();
    tracks.sort_by(|a, b| b.len().cmp(&a.len()));

    tracks
        .into_iter()
        .filter(|t| session_matches(t, required))
        .take(limit)
        .collect()
}

/// Tracks for the given ids, in the given order. Unknown ids are skipped.
pub fn select_dirty<'a>(store: &'a SessionTrackStore, dirty: &[String]) -> Vec<&'a SessionTrack> {
    dirty.iter().filter_map(|sid| store.get(sid)).collect()
}

pub fn build_session_reports(tracks: &[&SessionTrack]) -> Vec<SessionReport> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, track)| SessionReport::build(i + 1, track))
        .collect()
}
