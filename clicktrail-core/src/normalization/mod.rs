mod canonicalizer;
mod request_line;
mod types;

pub use canonicalizer::*;
pub use request_line::*;
pub use types::*;
