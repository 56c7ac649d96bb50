//! `pull`: git pull --rebase, then mirror → local

use super::Context;
use crate::sync::{self, ApplyOptions, Outcome};
use crate::types::SyncError;
use crate::ui::report::{format_apply, format_conflicts};

/// Conflict-gated and non-destructive: local-only files are kept
pub fn run(ctx: &Context<'_>) -> Result<i32, SyncError> {
    ctx.vcs.pull_rebase()?;

    let outcome = ctx.with_progress(|hooks| {
        sync::pull_apply(ctx.config, ApplyOptions::default(), hooks)
    })?;
    ctx.print_locations();

    match &outcome {
        Outcome::Blocked(conflicts) => {
            println!("{}", format_conflicts("Pull blocked due to conflicts:", conflicts));
            println!("Resolve manually, then rerun pull.");
        }
        Outcome::Applied(report) => {
            println!("{}", format_apply("Pull", report));
            println!("Pull sync applied to local directory.");
        }
    }

    Ok(outcome.exit_code())
}
