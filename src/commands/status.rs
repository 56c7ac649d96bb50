//! `status`: report differences without touching anything

use super::Context;
use crate::sync;
use crate::types::SyncError;
use crate::ui::report::format_status;

/// Exit code is 1 when conflicts exist, 0 otherwise
pub fn run(ctx: &Context<'_>) -> Result<i32, SyncError> {
    let diff = ctx.with_progress(|hooks| sync::status(ctx.config, hooks))?;

    ctx.print_locations();
    println!("{}", format_status(&diff));

    Ok(if diff.has_conflicts() { 1 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::baseline::save_baseline;
    use crate::types::FingerprintMap;
    use crate::ui::ProgressReporter;
    use crate::vcs::fake::FakeVcs;

    #[test]
    fn test_status_conflict_exits_one() {
        let ws = workspace();
        write(&ws.config.local_root, "machine/p.json", "local edit");
        write(&ws.config.mirror_root, "machine/p.json", "mirror edit");
        let mut baseline = FingerprintMap::new();
        baseline.insert("machine/p.json", "0000");
        save_baseline(&ws.config.state_path, &baseline).unwrap();

        let vcs = FakeVcs::default();
        let progress = ProgressReporter::hidden();
        let ctx = Context::new(&ws.config, &vcs, &progress);
        assert_eq!(run(&ctx).unwrap(), 1);
    }

    #[test]
    fn test_status_is_read_only() {
        let ws = workspace();
        write(&ws.config.local_root, "machine/p.json", "x");

        let vcs = FakeVcs::default();
        let progress = ProgressReporter::hidden();
        let ctx = Context::new(&ws.config, &vcs, &progress);
        assert_eq!(run(&ctx).unwrap(), 0);

        assert!(!ws.config.mirror_root.exists());
        assert!(!ws.config.state_path.exists());
    }
}
