//! CLI definition, tracing setup, and the sync command.

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use skillsync_core::{FsWorkspace, SyncOutcome, SyncReadmeConfig, SyncReport, sync_readme};
use skillsync_discovery::{ContextInputs, GitCli};
use skillsync_shared::{SyncConfig, load_config, load_config_from};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// skillsync: keep a README's skill structure block in step with its reference files.
#[derive(Parser)]
#[command(
    name = "skillsync",
    version,
    about = "Rebuild the README `## Skill Structure` tree when reference files change.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Base reference to diff against (overrides the env var and event payload).
    #[arg(long)]
    pub base_ref: Option<String>,

    /// CI event payload file (overrides the env var; must exist).
    #[arg(long)]
    pub event_path: Option<PathBuf>,

    /// Config file (defaults to .skillsync.toml in the working directory).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report whether the README is stale without writing it; exits non-zero if stale.
    #[arg(long)]
    pub check: bool,

    /// Rebuild the block even if no reference file changed.
    #[arg(long)]
    pub force: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "skillsync=info",
        1 => "skillsync=debug",
        _ => "skillsync=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Run the sync in the current working directory.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().wrap_err("cannot determine working directory")?;
    let config = resolve_config(cli.config.as_deref(), &cwd)?;
    require_event_path(cli.event_path.as_deref())?;

    let context = ContextInputs::from_env(&config.git)
        .with_base_ref(cli.base_ref)
        .with_event_path(cli.event_path);

    let detector = GitCli::new(&cwd, config.git.remote.clone());
    let workspace = FsWorkspace::new(&cwd);

    let sync_config = SyncReadmeConfig {
        config,
        context,
        check: cli.check,
        force: cli.force,
    };

    info!(root = %cwd.display(), "syncing README");
    let report = sync_readme(&sync_config, &detector, &workspace)?;
    print_report(&report);
    exit_status(report.outcome)
}

/// A stale README in check mode fails the run.
fn exit_status(outcome: SyncOutcome) -> Result<()> {
    if outcome == SyncOutcome::WouldUpdate {
        return Err(eyre!(
            "README is out of date; run skillsync without --check to update it"
        ));
    }
    Ok(())
}

/// Explicit `--event-path` must exist; a missing path from the env var is ignored later.
fn require_event_path(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) if !p.is_file() => Err(eyre!("event payload not found: {}", p.display())),
        _ => Ok(()),
    }
}

/// Explicit `--config` must exist; the default location is optional.
fn resolve_config(path: Option<&Path>, cwd: &Path) -> Result<SyncConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config(cwd)?,
    };
    Ok(config)
}

fn print_report(report: &SyncReport) {
    match report.outcome {
        SyncOutcome::NoChanges => {
            println!("No reference file changes detected. Skipping README sync.");
        }
        SyncOutcome::UpToDate => println!("README already up to date."),
        SyncOutcome::Updated => println!("README updated with latest reference files."),
        SyncOutcome::WouldUpdate => println!("README would be updated (check mode)."),
    }

    if matches!(report.outcome, SyncOutcome::Updated | SyncOutcome::WouldUpdate) {
        if let Some(base_ref) = &report.base_ref {
            println!("  Base:       {} ({})", base_ref.name, base_ref.source);
        }
        println!("  Changes:    {}", report.changes.len());
        println!("  References: {}", report.reference_count);
        if !report.placeholders.is_empty() {
            println!("  Missing descriptions: {}", report.placeholders.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn zero_arguments_parse() {
        let cli = Cli::try_parse_from(["skillsync"]).unwrap();
        assert!(!cli.check);
        assert!(!cli.force);
        assert!(cli.base_ref.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "skillsync",
            "--base-ref",
            "develop",
            "--check",
            "-vv",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.base_ref.as_deref(), Some("develop"));
        assert!(cli.check);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.log_format, LogFormat::Json));
    }

    #[test]
    fn explicit_missing_config_is_error() {
        let missing = Path::new("/nonexistent/skillsync.toml");
        assert!(resolve_config(Some(missing), Path::new("/")).is_err());
    }

    #[test]
    fn explicit_missing_event_path_is_error() {
        let missing = Path::new("/nonexistent/skillsync/event.json");
        let err = require_event_path(Some(missing)).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/skillsync/event.json"));
        assert!(require_event_path(None).is_ok());
    }

    #[test]
    fn existing_event_path_is_accepted() {
        let path = std::env::temp_dir()
            .join(format!("skillsync-cli-event-{}.json", std::process::id()));
        std::fs::write(&path, "{}").expect("write payload");
        let result = require_event_path(Some(&path));
        std::fs::remove_file(&path).ok();
        assert!(result.is_ok());
    }

    #[test]
    fn stale_readme_in_check_mode_fails() {
        let err = exit_status(SyncOutcome::WouldUpdate).unwrap_err();
        assert!(err.to_string().contains("README is out of date"));
    }

    #[test]
    fn other_outcomes_succeed() {
        for outcome in [SyncOutcome::NoChanges, SyncOutcome::UpToDate, SyncOutcome::Updated] {
            assert!(exit_status(outcome).is_ok());
        }
    }
}
