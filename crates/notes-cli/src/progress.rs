//! Terminal progress for long extractions, using `indicatif`.
//!
//! The pipeline only knows about [`ExtractProgress`] callbacks; this module
//! turns them into a spinner showing rows read and throughput.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::pipeline::ExtractProgress;

/// Spinner layout: elapsed time, rows read, row rate and records written.
pub const ROW_SPINNER_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] {human_pos} rows ({per_sec}) {msg}";

/// Create the row spinner, or a hidden bar when progress is disabled.
#[must_use]
pub fn create_row_spinner(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    match ProgressStyle::with_template(ROW_SPINNER_TEMPLATE) {
        Ok(style) => spinner.set_style(style),
        Err(error) => warn!(%error, "invalid progress template, using default style"),
    }
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Mirror pipeline counters on the spinner.
pub fn report_progress(spinner: &ProgressBar, progress: ExtractProgress) {
    spinner.set_position(progress.rows_read);
    spinner.set_message(format!("{} discharge summaries", progress.records_written));
}
