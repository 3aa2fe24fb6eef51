pub mod log;
pub mod run;
pub mod tracing;

pub use self::log::AccessLog;
pub use run::TestRun;
pub use self::tracing::{CapturedEvent, init_test_tracing};
