mod gradient;
mod reconstruct;

pub use gradient::{Rgb, TRACK_END, TRACK_START, gradient};
pub use reconstruct::{EdgeKind, NodeRole, TrackEdge, TrackGraph, TrackNode, reconstruct};
