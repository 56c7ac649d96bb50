//! `wipe-profiles`: delete the mirror scope and reset the baseline

use super::Context;
use crate::sync;
use crate::types::SyncError;
use crate::ui::report::format_wipe;
use crate::vcs::commit_if_needed;

pub fn run(ctx: &Context<'_>, confirmed: bool, message: &str, push: bool) -> Result<i32, SyncError> {
    let report = sync::wipe(ctx.config, confirmed)?;
    ctx.print_locations();
    println!("{}", format_wipe(&report));

    if commit_if_needed(ctx.vcs, message)? {
        println!("Committed: {}", message);
    } else {
        println!("No git changes to commit.");
    }

    if push {
        ctx.vcs.push()?;
        println!("Pushed to remote.");
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::ui::ProgressReporter;
    use crate::vcs::fake::FakeVcs;

    #[test]
    fn test_wipe_commits_without_push() {
        let ws = workspace();
        write(&ws.config.mirror_root, "machine/p.json", "p");

        let vcs = FakeVcs::default();
        vcs.dirty.set(true);
        let progress = ProgressReporter::hidden();
        let ctx = Context::new(&ws.config, &vcs, &progress);

        assert_eq!(run(&ctx, true, "Wipe", false).unwrap(), 0);
        assert!(!ws.config.mirror_root.join("machine").exists());
        assert_eq!(*vcs.calls.borrow(), vec!["status", "commit Wipe"]);
    }

    #[test]
    fn test_wipe_with_push() {
        let ws = workspace();
        let vcs = FakeVcs::default();
        let progress = ProgressReporter::hidden();
        let ctx = Context::new(&ws.config, &vcs, &progress);

        assert_eq!(run(&ctx, true, "Wipe", true).unwrap(), 0);
        assert_eq!(*vcs.calls.borrow(), vec!["status", "push"]);
        assert!(ws.config.state_path.exists());
    }

    #[test]
    fn test_wipe_requires_yes() {
        let ws = workspace();
        write(&ws.config.mirror_root, "machine/p.json", "p");
        let vcs = FakeVcs::default();
        let progress = ProgressReporter::hidden();
        let ctx = Context::new(&ws.config, &vcs, &progress);

        let err = run(&ctx, false, "Wipe", false).unwrap_err();
        assert!(matches!(err, SyncError::MissingConfirmation(_)));
        assert!(ws.config.mirror_root.join("machine/p.json").exists());
    }
}
