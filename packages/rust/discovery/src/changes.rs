//! Change detection via `git diff --name-status`.

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info, instrument};

use skillsync_shared::{ChangeKind, ChangedPath, Result, SkillSyncError};

/// Source of the raw name-status diff for a scoped path.
pub trait ChangeDetector {
    /// Raw, trimmed `--name-status` output for `pathspec` between `base_ref`
    /// and `HEAD`. Empty when nothing under `pathspec` changed.
    fn name_status(&self, base_ref: &str, pathspec: &str) -> Result<String>;
}

/// [`ChangeDetector`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_dir: PathBuf,
    remote: String,
}

impl GitCli {
    /// Run git in `repo_dir`, comparing against `<remote>/<base_ref>`.
    pub fn new(repo_dir: impl Into<PathBuf>, remote: impl Into<String>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            remote: remote.into(),
        }
    }

    fn diff_args(&self, base_ref: &str, pathspec: &str) -> Vec<String> {
        vec![
            "diff".into(),
            format!("{}/{base_ref}...HEAD", self.remote),
            "--name-status".into(),
            "--".into(),
            pathspec.into(),
        ]
    }
}

impl ChangeDetector for GitCli {
    #[instrument(skip(self), fields(repo = %self.repo_dir.display()))]
    fn name_status(&self, base_ref: &str, pathspec: &str) -> Result<String> {
        let args = self.diff_args(base_ref, pathspec);
        let command_line = format!("git {}", args.join(" "));
        debug!(command = %command_line, "running git");

        let output = Command::new("git")
            .args(&args)
            .current_dir(&self.repo_dir)
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| SkillSyncError::git(&command_line, format!("failed to execute git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let code = output
                .status
                .code()
                .map_or_else(|| "signal".to_string(), |c| c.to_string());
            return Err(SkillSyncError::git(
                command_line,
                format!("exit status {code}: {}", stderr.trim()),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Changes reported for the references directory.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    /// Raw diff text as returned by the detector.
    pub raw: String,
    /// Parsed entries; lines that did not parse are left out.
    pub paths: Vec<ChangedPath>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Ask `detector` what changed under `pathspec` since `base_ref`.
pub fn detect_changes(
    detector: &dyn ChangeDetector,
    base_ref: &str,
    pathspec: &str,
) -> Result<ChangeSet> {
    let raw = detector.name_status(base_ref, pathspec)?;
    let paths = parse_name_status(&raw);

    for change in &paths {
        debug!(kind = %change.kind, path = %change.path, from = ?change.from, "reference change");
    }
    info!(base_ref, pathspec, changed = paths.len(), "detected reference changes");

    Ok(ChangeSet { raw, paths })
}

/// Parse `git diff --name-status` output.
///
/// Lines are `<status>\t<path>` or, for renames and copies,
/// `<status><score>\t<from>\t<to>`.
pub fn parse_name_status(raw: &str) -> Vec<ChangedPath> {
    raw.lines()
        .filter_map(|line| {
            let mut fields = line.trim_end_matches('\r').split('\t');
            let kind = ChangeKind::from_status(fields.next()?.trim())?;
            let first = fields.next().filter(|p| !p.is_empty())?;
            if kind.has_two_paths() {
                let to = fields.next().filter(|p| !p.is_empty())?;
                Some(ChangedPath {
                    kind,
                    path: to.to_string(),
                    from: Some(first.to_string()),
                })
            } else {
                Some(ChangedPath {
                    kind,
                    path: first.to_string(),
                    from: None,
                })
            }
        })
        .collect()
}
