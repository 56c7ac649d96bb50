//! Progress reporting

use crate::executor::ExecutionEvent;
use crate::sync::ScanEvent;
use indicatif::{HumanBytes, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::cell::Cell;
use std::time::{Duration, Instant};

/// Spinner while scanning, bar while applying
///
/// All methods take `&self` so the reporter can be borrowed by the scan and
/// execution callbacks at the same time.
pub struct ProgressReporter {
    scan_bar: ProgressBar,
    apply_bar: ProgressBar,
    apply_started_at: Cell<Option<Instant>>,
    copied_bytes: Cell<u64>,
}

impl ProgressReporter {
    /// Create a reporter drawing to stderr
    pub fn new() -> Self {
        let scan_bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            scan_bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }

        let apply_bar = ProgressBar::new(0);
        if let Ok(style) =
            ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} files | {msg}")
        {
            apply_bar.set_style(style.progress_chars("=>-"));
        }

        Self {
            scan_bar,
            apply_bar,
            apply_started_at: Cell::new(None),
            copied_bytes: Cell::new(0),
        }
    }

    /// Create a reporter that never draws (quiet mode, tests)
    pub fn hidden() -> Self {
        let reporter = Self::new();
        reporter.scan_bar.set_draw_target(ProgressDrawTarget::hidden());
        reporter.apply_bar.set_draw_target(ProgressDrawTarget::hidden());
        reporter
    }

    /// Feed a scan event into the spinner
    pub fn on_scan(&self, event: &ScanEvent) {
        match event {
            ScanEvent::Started { side } => {
                self.scan_bar.enable_steady_tick(Duration::from_millis(120));
                self.scan_bar
                    .set_message(format!("Scanning {}...", side.label()));
            }
            ScanEvent::Progress { side, files, bytes } => {
                self.scan_bar.set_message(format!(
                    "Scanning {}... {} files | {}",
                    side.label(),
                    files,
                    HumanBytes(*bytes)
                ));
            }
            ScanEvent::Finished { side, files } => {
                self.scan_bar
                    .set_message(format!("Scanned {}: {} files", side.label(), files));
            }
        }
    }

    /// Switch from scanning to applying `total_actions` actions
    ///
    /// Called automatically when the first action of a plan starts.
    pub fn start_apply(&self, total_actions: u64) {
        self.scan_bar.finish_and_clear();
        self.apply_started_at.set(Some(Instant::now()));
        self.copied_bytes.set(0);
        self.apply_bar.set_length(total_actions);
        self.apply_bar.set_position(0);
        self.apply_bar.set_message("Starting...".to_string());
    }

    /// Feed an execution event into the apply bar
    pub fn on_event(&self, event: &ExecutionEvent<'_>) {
        match event {
            ExecutionEvent::ActionStart {
                index,
                total,
                action,
                path,
            } => {
                if *index == 1 {
                    self.start_apply(*total as u64);
                }
                self.apply_bar.set_message(format!("{} {}", action, path));
            }
            ExecutionEvent::ActionSuccess { bytes_copied, .. } => {
                self.copied_bytes
                    .set(self.copied_bytes.get().saturating_add(*bytes_copied));
                self.apply_bar.inc(1);
                self.apply_bar.set_message(format!(
                    "{} copied | {}/s",
                    HumanBytes(self.copied_bytes.get()),
                    HumanBytes(self.throughput_bps())
                ));
            }
            ExecutionEvent::ActionError {
                action,
                path,
                error,
                ..
            } => {
                self.apply_bar.inc(1);
                self.apply_bar
                    .println(format!("ERROR {} {}: {}", action, path, error));
            }
            ExecutionEvent::Complete { stats } if stats.total_actions == 0 => {
                // Nothing was applied, so nothing should be left on screen.
                self.apply_bar.finish_and_clear();
            }
            ExecutionEvent::Complete { stats } => {
                self.apply_bar.finish_with_message(format!(
                    "{} succeeded, {} failed | {} copied",
                    stats.completed_actions,
                    stats.failed_actions,
                    HumanBytes(stats.bytes_copied)
                ));
            }
        }
    }

    /// Clear whatever is still on screen
    pub fn finish(&self) {
        if !self.scan_bar.is_finished() {
            self.scan_bar.finish_and_clear();
        }
    }

    fn throughput_bps(&self) -> u64 {
        match self.apply_started_at.get() {
            Some(started) => {
                let secs = started.elapsed().as_secs_f64();
                if secs > 0.0 {
                    (self.copied_bytes.get() as f64 / secs) as u64
                } else {
                    0
                }
            }
            None => 0,
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}
