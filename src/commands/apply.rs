//! `apply`: mirror → local without git

use super::Context;
use crate::sync::{self, ApplyOptions, Outcome};
use crate::types::SyncError;
use crate::ui::report::{format_apply, format_conflicts};

pub fn run(ctx: &Context<'_>, prune: bool, force: bool) -> Result<i32, SyncError> {
    let options = ApplyOptions { prune, force };
    let outcome = ctx.with_progress(|hooks| sync::pull_apply(ctx.config, options, hooks))?;
    ctx.print_locations();

    match &outcome {
        Outcome::Blocked(conflicts) => {
            println!("{}", format_conflicts("Apply blocked due to conflicts:", conflicts));
            println!("Resolve manually, or rerun with --force to let the mirror win.");
        }
        Outcome::Applied(report) => {
            let label = if prune { "Apply (prune)" } else { "Apply" };
            println!("{}", format_apply(label, report));
        }
    }

    Ok(outcome.exit_code())
}
