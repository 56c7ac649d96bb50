//! `push`: local → mirror, then commit and push

use super::Context;
use crate::sync::{self, Outcome};
use crate::types::SyncError;
use crate::ui::report::{format_apply, format_conflicts};
use crate::vcs::commit_if_needed;

pub fn run(ctx: &Context<'_>, message: &str) -> Result<i32, SyncError> {
    let outcome = ctx.with_progress(|hooks| sync::push(ctx.config, hooks))?;
    ctx.print_locations();

    match &outcome {
        Outcome::Blocked(conflicts) => {
            println!("{}", format_conflicts("Push blocked due to conflicts:", conflicts));
            println!("Resolve manually, then rerun push.");
            return Ok(outcome.exit_code());
        }
        Outcome::Applied(report) => println!("{}", format_apply("Push", report)),
    }

    if commit_if_needed(ctx.vcs, message)? {
        println!("Committed: {}", message);
    } else {
        println!("No git changes to commit.");
    }
    ctx.vcs.push()?;
    println!("Pushed to remote.");

    Ok(0)
}
