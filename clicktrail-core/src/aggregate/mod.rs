mod counters;
mod pairs;
mod sessions;

pub use counters::*;
pub use pairs::*;
pub use sessions::*;
