pub mod conf;
pub mod run;
#[cfg(test)]
mod tests;
