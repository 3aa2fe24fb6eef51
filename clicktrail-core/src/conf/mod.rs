mod error;
mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_url_aliases, render_config, write_config};
pub use types::*;
