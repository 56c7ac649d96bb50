use anyhow::{Context as _, Result};
use clap::Parser;
use orcasync::commands::{self, Context};
use orcasync::config::Cli;
use orcasync::ui::report::format_error;
use orcasync::ui::ProgressReporter;
use orcasync::vcs::GitCli;
use orcasync::{Config, SyncError};
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => match err.downcast_ref::<SyncError>() {
            Some(sync_err) => {
                eprintln!("{}", format_error(sync_err));
                sync_err.exit_code()
            }
            None => {
                eprintln!("error: {:#}", err);
                2
            }
        },
    };

    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<i32> {
    init_logging(cli.verbose, cli.quiet)?;

    let repo_root = resolve_repo_root(cli.repo.clone())?;
    let config = Config::load(&repo_root)?;
    tracing::info!(
        repo = %config.repo_root.display(),
        local = %config.local_root.display(),
        mirror = %config.mirror_root.display(),
        "configuration loaded"
    );

    let vcs = GitCli::new(&config.repo_root);
    let progress = if cli.quiet {
        ProgressReporter::hidden()
    } else {
        ProgressReporter::new()
    };
    let ctx = Context::new(&config, &vcs, &progress);

    Ok(commands::dispatch(&cli.command, &ctx)?)
}

fn init_logging(verbose: bool, quiet: bool) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if verbose {
        "info"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("invalid log filter")?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// `--repo` or the current directory, made absolute
fn resolve_repo_root(repo: Option<PathBuf>) -> Result<PathBuf> {
    let raw = match repo {
        Some(path) => path,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    raw.canonicalize()
        .with_context(|| format!("repository directory {} is not accessible", raw.display()))
}
