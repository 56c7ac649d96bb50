//! Terminal output: progress bars and summaries

pub mod progress;
pub mod report;

pub use progress::ProgressReporter;
