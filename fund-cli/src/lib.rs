pub mod app;
pub mod logging;
pub mod prompt;
pub mod report;
pub mod utils;

pub use app::{RunOptions, run};
