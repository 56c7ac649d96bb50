//! Human-readable summaries printed to stdout

use crate::config::Config;
use crate::diff::ThreeWayDiff;
use crate::sync::{ApplyReport, WipeReport};
use crate::types::SyncError;
use console::style;
use indicatif::HumanBytes;
use std::io::ErrorKind;

/// Longest conflict list printed before truncating
pub const MAX_LISTED_CONFLICTS: usize = 25;

/// Where each kind of data lives
pub fn format_locations(config: &Config) -> String {
    [
        "Storage locations:".to_string(),
        format!("  Local live data:           {}", config.local_root.display()),
        format!("  Repo mirror (git-tracked): {}", config.mirror_root.display()),
        format!("  Sync baseline:             {}", config.state_path.display()),
        format!("  Settings:                  {}", config.config_path.display()),
    ]
    .join("\n")
}

/// Bucket counts plus the conflict list, if any
pub fn format_status(diff: &ThreeWayDiff) -> String {
    let counts = diff.counts();
    let conflicts = if counts.conflicts > 0 {
        style(counts.conflicts).red().bold().to_string()
    } else {
        style(counts.conflicts).green().to_string()
    };

    let mut lines = vec![
        "Status summary:".to_string(),
        format!("  local-only files:   {}", counts.only_local),
        format!("  mirror-only files:  {}", counts.only_mirror),
        format!("  local changes:      {}", counts.changed_local),
        format!("  mirror changes:     {}", counts.changed_mirror),
        format!("  conflicts:          {}", conflicts),
    ];

    if diff.has_conflicts() {
        lines.push(String::new());
        lines.push(format_conflicts(
            "Conflicts (manual resolution required):",
            &diff.conflicts,
        ));
    } else if diff.is_clean() {
        lines.push(format!("  {}", style("Everything in sync.").green().dim()));
    }

    lines.join("\n")
}

/// Heading followed by at most [`MAX_LISTED_CONFLICTS`] paths
pub fn format_conflicts(heading: &str, paths: &[String]) -> String {
    let mut lines = vec![style(heading).red().bold().to_string()];
    for path in paths.iter().take(MAX_LISTED_CONFLICTS) {
        lines.push(format!("  - {}", path));
    }
    if paths.len() > MAX_LISTED_CONFLICTS {
        lines.push(format!(
            "  ... and {} more",
            paths.len() - MAX_LISTED_CONFLICTS
        ));
    }
    lines.join("\n")
}

/// One-line result of an applied plan
pub fn format_apply(label: &str, report: &ApplyReport) -> String {
    if report.is_noop() {
        return format!("{} {}: nothing to change.", style("✓").green(), label);
    }
    format!(
        "{} {}: {} copied, {} removed ({}), baseline now tracks {} file(s).",
        style("✓").green(),
        label,
        report.plan.copy_count,
        report.plan.remove_count,
        HumanBytes(report.stats.bytes_copied),
        report.baseline_entries
    )
}

pub fn format_wipe(report: &WipeReport) -> String {
    let mut lines = vec![format!(
        "{} Wiped {} mirror entr{}; baseline reset.",
        style("✓").green(),
        report.removed.len(),
        if report.removed.len() == 1 { "y" } else { "ies" }
    )];
    for path in &report.removed {
        lines.push(format!("  - {}", path.display()));
    }
    lines.join("\n")
}

/// Error message plus an optional hint on how to get unstuck
pub fn format_error(error: &SyncError) -> String {
    let mut text = format!("{} {}", style("error:").red().bold(), error);
    if let Some(hint) = hint_for(error) {
        text.push_str(&format!("\n  {} {}", style("hint:").yellow(), hint));
    }
    text
}

fn hint_for(error: &SyncError) -> Option<&'static str> {
    match error {
        SyncError::MissingSource { .. } => {
            Some("Check local_base_dir / mirror_dir in .orcasync/config.toml.")
        }
        SyncError::MissingConfirmation(_) => Some("Re-run with --yes if you really mean it."),
        SyncError::Config(_) => Some("Edit .orcasync/config.toml and retry."),
        SyncError::Baseline { .. } => {
            Some("Delete .orcasync/state.json to start from an empty baseline.")
        }
        SyncError::Io { source, .. } => match source.kind() {
            ErrorKind::PermissionDenied => {
                Some("Check file permissions or run as a user that has access.")
            }
            ErrorKind::NotFound => Some("A file vanished mid-sync; re-run the command."),
            _ => None,
        },
        SyncError::Apply { .. } => {
            Some("Fix the files listed above and re-run; the baseline was not updated.")
        }
        SyncError::External { .. } => None,
    }
}
