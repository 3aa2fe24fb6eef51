//! Raw log input: tokenizing lines into records, typed column access and
//! timestamp parsing.

mod columns;
mod record;
#[cfg(test)]
mod tests;
mod timestamp;

pub use columns::*;
pub use record::*;
pub use timestamp::*;
