mod dot;
mod summary;

pub use dot::{render_pairs_dot, render_session_dot};
pub use summary::render_run_summary;
