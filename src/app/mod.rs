mod runner;
pub(crate) mod summary;

pub use runner::{RunReport, run_local};
