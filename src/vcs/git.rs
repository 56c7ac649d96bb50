//! Git via the `git` executable

use super::VersionControl;
use crate::types::SyncError;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

/// Runs `git -C <repo_root> ...` and captures its output
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_root: PathBuf,
    program: String,
}

impl GitCli {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            program: "git".to_string(),
        }
    }

    /// Use a different executable (tests, or a git wrapper)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    fn run(&self, args: &[&str]) -> Result<Output, SyncError> {
        let command = format!("{} {}", self.program, args.join(" "));
        debug!(%command, repo = %self.repo_root.display(), "running");

        let output = Command::new(&self.program)
            .arg("-C")
            .arg(&self.repo_root)
            .args(args)
            .output()
            .map_err(|e| SyncError::External {
                command: command.clone(),
                code: None,
                output: e.to_string(),
            })?;

        if output.status.success() {
            Ok(output)
        } else {
            Err(SyncError::External {
                command,
                code: output.status.code(),
                output: failure_output(&output),
            })
        }
    }
}

/// stderr if it has anything to say, stdout otherwise
fn failure_output(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout).into_owned()
    } else {
        stderr.into_owned()
    }
}

impl VersionControl for GitCli {
    fn has_uncommitted_changes(&self) -> Result<bool, SyncError> {
        let output = self.run(&["status", "--porcelain"])?;
        Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
    }

    fn commit_all(&self, message: &str) -> Result<(), SyncError> {
        self.run(&["add", "-A"])?;
        self.run(&["commit", "-m", message])?;
        Ok(())
    }

    fn push(&self) -> Result<(), SyncError> {
        self.run(&["push"]).map(|_| ())
    }

    fn pull_rebase(&self) -> Result<(), SyncError> {
        self.run(&["pull", "--rebase"]).map(|_| ())
    }
}
