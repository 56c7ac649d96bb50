//! Apply plan generation

use crate::diff::ThreeWayDiff;
use crate::types::{FingerprintMap, Scope, SyncAction};
use std::collections::BTreeSet;

/// Ordered list of copy/remove actions between two roots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyPlan {
    /// Actions to execute (removals first, then copies; each group sorted by path)
    pub actions: Vec<SyncAction>,

    /// Aggregate statistics about the plan
    pub stats: PlanStats,
}

/// Statistics about an apply plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlanStats {
    /// Number of Copy actions
    pub copy_count: usize,

    /// Number of Remove actions
    pub remove_count: usize,
}

impl ApplyPlan {
    /// Create a new empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an action to the plan and update statistics
    pub fn add_action(&mut self, action: SyncAction) {
        match &action {
            SyncAction::Copy(_) => self.stats.copy_count += 1,
            SyncAction::Remove(_) => self.stats.remove_count += 1,
        }
        self.actions.push(action);
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Removals run first so a path that switched between file and folder is
    /// cleared before the copy needs it.
    fn from_sets(copies: BTreeSet<&str>, removals: BTreeSet<&str>) -> Self {
        let mut plan = Self::new();
        for path in removals {
            plan.add_action(SyncAction::Remove(path.to_string()));
        }
        for path in copies {
            plan.add_action(SyncAction::Copy(path.to_string()));
        }
        plan
    }
}

/// Plan that makes the mirror match local (local is authoritative)
///
/// Every mirror-only path is removed from the mirror: it is either a local
/// deletion or a mirror addition, and local wins both. Every other changed
/// path (`only_local`, `changed_local`, `changed_mirror`) still exists
/// locally and is copied over. A `changed_mirror` path is overwritten with the
/// local content rather than deleted, which is intentional: after execution
/// the mirror holds exactly the local content, so an immediate second push
/// plans nothing.
///
/// Conflicts are never part of the plan; callers must refuse to push first.
pub fn push_plan(diff: &ThreeWayDiff) -> ApplyPlan {
    let removals: BTreeSet<&str> = diff.only_mirror.iter().map(String::as_str).collect();

    let copies: BTreeSet<&str> = diff
        .only_local
        .iter()
        .chain(&diff.changed_local)
        .chain(&diff.changed_mirror)
        .map(String::as_str)
        .filter(|path| !removals.contains(path))
        .collect();

    ApplyPlan::from_sets(copies, removals)
}

/// Plan that makes local match the mirror (mirror is authoritative)
///
/// Copies every mirror path whose local content is missing or different.
/// With `prune`, in-scope local paths absent from the mirror are removed too;
/// without it local-only files are left alone, except those sitting where a
/// mirror file needs a folder (or a mirror folder needs a file).
pub fn pull_plan(
    local: &FingerprintMap,
    mirror: &FingerprintMap,
    scope: &Scope,
    prune: bool,
) -> ApplyPlan {
    let copies: BTreeSet<&str> = mirror
        .iter()
        .filter(|(path, digest)| local.get(path) != Some(*digest))
        .map(|(path, _)| path)
        .collect();

    let removals: BTreeSet<&str> = local
        .paths()
        .filter(|path| !mirror.contains(path))
        .filter(|path| {
            (prune && scope.contains(path))
                || copies
                    .iter()
                    .any(|copy| is_nested_under(copy, path) || is_nested_under(path, copy))
        })
        .collect();

    ApplyPlan::from_sets(copies, removals)
}

/// Whether `path` lies inside the folder named `dir`
fn is_nested_under(path: &str, dir: &str) -> bool {
    path.strip_prefix(dir)
        .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::reconcile;

    fn map(entries: &[(&str, &str)]) -> FingerprintMap {
        entries
            .iter()
            .map(|(p, h)| (p.to_string(), h.to_string()))
            .collect()
    }

    #[test]
    fn test_new_plan() {
        let plan = ApplyPlan::new();
        assert!(plan.is_empty());
        assert_eq!(plan.stats, PlanStats::default());
    }

    #[test]
    fn test_add_action_updates_stats() {
        let mut plan = ApplyPlan::new();
        plan.add_action(SyncAction::Copy("a".to_string()));
        plan.add_action(SyncAction::Copy("b".to_string()));
        plan.add_action(SyncAction::Remove("c".to_string()));

        assert_eq!(plan.len(), 3);
        assert_eq!(plan.stats.copy_count, 2);
        assert_eq!(plan.stats.remove_count, 1);
    }

    #[test]
    fn test_push_plan_new_local_file() {
        let diff = reconcile(
            &map(&[("machine/printer.json", "h1")]),
            &map(&[]),
            &map(&[]),
        );
        let plan = push_plan(&diff);
        assert_eq!(
            plan.actions,
            vec![SyncAction::Copy("machine/printer.json".to_string())]
        );
    }

    #[test]
    fn test_push_plan_local_deletion_removes_from_mirror() {
        let diff = reconcile(&map(&[]), &map(&[("f", "h1")]), &map(&[("f", "h1")]));
        let plan = push_plan(&diff);
        assert_eq!(plan.actions, vec![SyncAction::Remove("f".to_string())]);
    }

    #[test]
    fn test_push_plan_new_mirror_file_is_removed() {
        let diff = reconcile(&map(&[]), &map(&[("g", "h1")]), &map(&[]));
        let plan = push_plan(&diff);
        assert_eq!(plan.actions, vec![SyncAction::Remove("g".to_string())]);
    }

    #[test]
    fn test_push_plan_mirror_modification_restores_local_content() {
        let diff = reconcile(&map(&[("f", "h1")]), &map(&[("f", "h2")]), &map(&[("f", "h1")]));
        let plan = push_plan(&diff);
        assert_eq!(plan.actions, vec![SyncAction::Copy("f".to_string())]);
    }

    #[test]
    fn test_push_plan_mirror_deletion_is_restored() {
        let diff = reconcile(&map(&[("f", "h1")]), &map(&[]), &map(&[("f", "h1")]));
        let plan = push_plan(&diff);
        assert_eq!(plan.actions, vec![SyncAction::Copy("f".to_string())]);
    }

    #[test]
    fn test_push_plan_orders_removals_before_copies() {
        let diff = reconcile(
            &map(&[("b", "2"), ("a", "1"), ("keep", "k")]),
            &map(&[("z", "9"), ("keep", "k")]),
            &map(&[("z", "9"), ("keep", "k")]),
        );
        let plan = push_plan(&diff);
        assert_eq!(
            plan.actions,
            vec![
                SyncAction::Remove("z".to_string()),
                SyncAction::Copy("a".to_string()),
                SyncAction::Copy("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_push_plan_file_replaced_by_folder() {
        let diff = reconcile(
            &map(&[("machine/a/x.json", "2")]),
            &map(&[("machine/a", "1")]),
            &map(&[("machine/a", "1")]),
        );
        assert_eq!(
            push_plan(&diff).actions,
            vec![
                SyncAction::Remove("machine/a".to_string()),
                SyncAction::Copy("machine/a/x.json".to_string()),
            ]
        );
    }

    #[test]
    fn test_push_plan_ignores_conflicts() {
        let diff = reconcile(&map(&[("f", "h2")]), &map(&[("f", "h3")]), &map(&[("f", "h1")]));
        assert!(push_plan(&diff).is_empty());
    }

    #[test]
    fn test_pull_plan_copies_differing_paths_only() {
        let local = map(&[("same", "1"), ("old", "1")]);
        let mirror = map(&[("same", "1"), ("old", "2"), ("new", "3")]);
        let plan = pull_plan(&local, &mirror, &Scope::whole(), false);

        assert_eq!(
            plan.actions,
            vec![
                SyncAction::Copy("new".to_string()),
                SyncAction::Copy("old".to_string()),
            ]
        );
    }

    #[test]
    fn test_pull_plan_keeps_local_only_without_prune() {
        let local = map(&[("mine", "1")]);
        let plan = pull_plan(&local, &FingerprintMap::new(), &Scope::whole(), false);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_pull_plan_prune_removes_local_only() {
        let local = map(&[("mine", "1"), ("shared", "2")]);
        let mirror = map(&[("shared", "2")]);
        let plan = pull_plan(&local, &mirror, &Scope::whole(), true);
        assert_eq!(plan.actions, vec![SyncAction::Remove("mine".to_string())]);
    }

    #[test]
    fn test_pull_plan_clears_local_file_in_the_way_of_mirror_folder() {
        let local = map(&[("machine/a", "1"), ("machine/keep.json", "k")]);
        let mirror = map(&[("machine/a/x.json", "2")]);
        let plan = pull_plan(&local, &mirror, &Scope::whole(), false);
        assert_eq!(
            plan.actions,
            vec![
                SyncAction::Remove("machine/a".to_string()),
                SyncAction::Copy("machine/a/x.json".to_string()),
            ]
        );
    }

    #[test]
    fn test_pull_plan_clears_local_folder_in_the_way_of_mirror_file() {
        let local = map(&[("machine/a/x.json", "1"), ("machine/a/y.json", "2")]);
        let mirror = map(&[("machine/a", "3")]);
        let plan = pull_plan(&local, &mirror, &Scope::whole(), false);
        assert_eq!(
            plan.actions,
            vec![
                SyncAction::Remove("machine/a/x.json".to_string()),
                SyncAction::Remove("machine/a/y.json".to_string()),
                SyncAction::Copy("machine/a".to_string()),
            ]
        );
    }

    #[test]
    fn test_pull_plan_prune_respects_scope() {
        let local = map(&[("machine/a.json", "1"), ("other/b.json", "2")]);
        let scope = Scope::new(["machine"]);
        let plan = pull_plan(&local, &FingerprintMap::new(), &scope, true);
        assert_eq!(
            plan.actions,
            vec![SyncAction::Remove("machine/a.json".to_string())]
        );
    }
}
