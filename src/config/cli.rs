//! Command-line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default commit message for `push`
pub const DEFAULT_PUSH_MESSAGE: &str = "Sync OrcaSlicer profiles";
/// Default commit message for `wipe-profiles`
pub const DEFAULT_WIPE_MESSAGE: &str = "Wipe synced OrcaSlicer profiles";

/// Sync a live settings directory with a git-tracked mirror
#[derive(Debug, Parser)]
#[command(name = "orcasync", version, about, long_about = None)]
pub struct Cli {
    /// Repository holding the mirror and `.orcasync/` (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Show progress details (info-level logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show differences and conflicts without changing anything
    Status,

    /// Sync local -> mirror, then git commit and push
    Push {
        /// Commit message
        #[arg(short, long, default_value = DEFAULT_PUSH_MESSAGE)]
        message: String,
    },

    /// git pull --rebase, then sync mirror -> local
    Pull,

    /// Sync mirror -> local without touching git
    Apply {
        /// Also delete local files that are absent from the mirror
        #[arg(long)]
        prune: bool,

        /// Skip the conflict check (the mirror always wins)
        #[arg(long)]
        force: bool,
    },

    /// Delete every mirrored profile and reset the baseline
    WipeProfiles {
        /// Confirm the wipe; nothing happens without it
        #[arg(long)]
        yes: bool,

        /// Commit message
        #[arg(short, long, default_value = DEFAULT_WIPE_MESSAGE)]
        message: String,

        /// Push the wipe commit
        #[arg(long)]
        push: bool,
    },
}
