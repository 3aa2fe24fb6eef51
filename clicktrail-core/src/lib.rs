pub mod aggregate;
pub mod classify;
pub mod cli;
pub mod conf;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod normalization;
pub mod pipeline;
pub mod render;
pub mod report;
#[cfg(test)]
mod test_support;
pub mod track;
