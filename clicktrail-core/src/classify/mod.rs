mod bot;
mod classifier;
#[cfg(test)]
mod tests;
mod verdict;

pub use bot::BotDetector;
pub use classifier::LineClassifier;
pub use verdict::{SkipReason, Verdict};
