//! Discharge-summary extraction pipeline and CLI support.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod pipeline;
pub mod progress;

pub use pipeline::{
    ExtractError, ExtractProgress, ExtractSummary, PROGRESS_INTERVAL, extract,
    extract_with_progress,
};
