//! Diff engine - three-way reconciliation and apply planning

mod plan;
mod reconcile;

pub use plan::{pull_plan, push_plan, ApplyPlan, PlanStats};
pub use reconcile::{reconcile, DiffCounts, ThreeWayDiff};
