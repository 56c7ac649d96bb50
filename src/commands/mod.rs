//! CLI command handlers
//!
//! Each handler prints the storage locations and a summary to stdout, calls
//! version control where the command needs it, and returns the process exit
//! code. Errors are left to the caller.

pub mod apply;
pub mod pull;
pub mod push;
pub mod status;
pub mod wipe;

use crate::config::{Commands, Config};
use crate::executor::{ExecutionCallback, ExecutionEvent};
use crate::sync::{Hooks, ScanCallback, ScanEvent};
use crate::types::SyncError;
use crate::ui::report::format_locations;
use crate::ui::ProgressReporter;
use crate::vcs::VersionControl;

/// Everything a command handler needs
pub struct Context<'a> {
    pub config: &'a Config,
    pub vcs: &'a dyn VersionControl,
    pub progress: &'a ProgressReporter,
}

impl<'a> Context<'a> {
    pub fn new(
        config: &'a Config,
        vcs: &'a dyn VersionControl,
        progress: &'a ProgressReporter,
    ) -> Self {
        Self {
            config,
            vcs,
            progress,
        }
    }

    /// Run `op` with scan and apply progress wired to the reporter
    fn with_progress<T>(&self, op: impl FnOnce(&Hooks<'_>) -> T) -> T {
        let on_scan: &ScanCallback<'_> = &|event: &ScanEvent| self.progress.on_scan(event);
        let on_event: &ExecutionCallback<'_> =
            &|event: &ExecutionEvent<'_>| self.progress.on_event(event);

        let hooks = Hooks::none().with_scan(on_scan).with_events(on_event);
        let result = op(&hooks);
        self.progress.finish();
        result
    }

    fn print_locations(&self) {
        println!("{}", format_locations(self.config));
        println!();
    }
}

/// Run one parsed subcommand
pub fn dispatch(command: &Commands, ctx: &Context<'_>) -> Result<i32, SyncError> {
    match command {
        Commands::Status => status::run(ctx),
        Commands::Push { message } => push::run(ctx, message),
        Commands::Pull => pull::run(ctx),
        Commands::Apply { prune, force } => apply::run(ctx, *prune, *force),
        Commands::WipeProfiles { yes, message, push } => wipe::run(ctx, *yes, message, *push),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::Config;
    use crate::types::Scope;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    pub struct Workspace {
        pub _temp: TempDir,
        pub config: Config,
    }

    pub fn workspace() -> Workspace {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        let local = temp.path().join("live");
        fs::create_dir_all(&repo).unwrap();
        fs::create_dir_all(&local).unwrap();
        let config = Config::new(&repo, &local, repo.join("profiles"))
            .with_scope(Scope::new(["filament", "machine", "process"]));
        Workspace {
            _temp: temp,
            config,
        }
    }

    pub fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}
