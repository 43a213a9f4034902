//! Sync integration tests against a real directory tree and git repository.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use skillsync_core::{FsWorkspace, SyncOutcome, SyncReadmeConfig, Workspace, sync_readme};
use skillsync_discovery::{ContextInputs, GitCli};

const README: &str = "# Swift Concurrency Skill\n\
\n\
## Skill Structure\n\
\n\
```\n\
swift-concurrency/\n\
├── SKILL.md   # Main skill file\n\
└── references/\n    \
└── old.md   # Old description\n\
```\n\
\n\
## Contributing\n\
\n\
PRs welcome.\n";

// ============================================================================
// Helper Functions
// ============================================================================

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args([
            "-c",
            "user.email=test@example.com",
            "-c",
            "user.name=Test User",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, content).expect("write file");
}

/// A repo whose `origin/main` points at the initial commit with `old.md` only.
fn init_repo() -> TempDir {
    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path();
    write(dir, "README.md", README);
    write(dir, "swift-concurrency/SKILL.md", "# Skill\n");
    write(dir, "swift-concurrency/references/old.md", "# Old\n");

    git(dir, &["init", "-q"]);
    git(dir, &["add", "."]);
    git(dir, &["commit", "-q", "-m", "Initial commit"]);
    git(dir, &["update-ref", "refs/remotes/origin/main", "HEAD"]);
    tmp
}

fn config() -> SyncReadmeConfig {
    SyncReadmeConfig {
        context: ContextInputs::default(),
        ..SyncReadmeConfig::default()
    }
}

// ============================================================================
// Filesystem Tests
// ============================================================================

#[test]
fn fs_workspace_lists_only_markdown_files() {
    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path();
    write(dir, "refs/b.md", "");
    write(dir, "refs/a.md", "");
    write(dir, "refs/image.png", "");
    fs::create_dir_all(dir.join("refs/nested.md")).expect("dir");

    let ws = FsWorkspace::new(dir);
    let mut names = ws.markdown_files("refs").expect("list");
    names.sort();

    assert_eq!(names, vec!["a.md".to_string(), "b.md".to_string()]);
}

#[test]
fn fs_workspace_write_replaces_content() {
    let tmp = TempDir::new().expect("tempdir");
    let ws = FsWorkspace::new(tmp.path());
    write(tmp.path(), "README.md", "old");

    ws.write_text("README.md", "new").expect("write");

    assert_eq!(ws.read_text("README.md").expect("read"), "new");
    let leftovers: Vec<_> = fs::read_dir(tmp.path())
        .expect("read dir")
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[cfg(unix)]
#[test]
fn fs_workspace_write_follows_symlinked_readme() {
    use std::os::unix::fs::{PermissionsExt, symlink};

    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path();
    write(dir, "docs/README.md", "old");
    fs::set_permissions(dir.join("docs/README.md"), fs::Permissions::from_mode(0o600))
        .expect("chmod");
    symlink("docs/README.md", dir.join("README.md")).expect("symlink");

    FsWorkspace::new(dir)
        .write_text("README.md", "new")
        .expect("write");

    let link = fs::symlink_metadata(dir.join("README.md")).expect("lstat");
    assert!(link.file_type().is_symlink());
    assert_eq!(fs::read_to_string(dir.join("docs/README.md")).expect("read"), "new");
    let mode = fs::metadata(dir.join("docs/README.md"))
        .expect("stat")
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

// ============================================================================
// Git Tests
// ============================================================================

#[test]
fn added_reference_updates_readme() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    let tmp = init_repo();
    let dir = tmp.path();
    write(dir, "swift-concurrency/references/new.md", "# New\n");
    git(dir, &["add", "."]);
    git(dir, &["commit", "-q", "-m", "Add new reference"]);

    let report = sync_readme(&config(), &GitCli::new(dir, "origin"), &FsWorkspace::new(dir))
        .expect("sync");

    assert_eq!(report.outcome, SyncOutcome::Updated);
    assert_eq!(report.changes.len(), 1);
    assert_eq!(report.changes[0].path, "swift-concurrency/references/new.md");

    let readme = fs::read_to_string(dir.join("README.md")).expect("read README");
    assert!(readme.contains(
        "    ├── new.md     # TODO: Add description\n    └── old.md     # Old description\n```"
    ));
    assert!(readme.starts_with("# Swift Concurrency Skill\n\n## Skill Structure\n\n```\n"));
    assert!(readme.ends_with("## Contributing\n\nPRs welcome.\n"));
}

#[test]
fn unrelated_changes_are_ignored() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    let tmp = init_repo();
    let dir = tmp.path();
    write(dir, "swift-concurrency/SKILL.md", "# Skill, revised\n");
    git(dir, &["commit", "-q", "-am", "Edit skill"]);

    let report = sync_readme(&config(), &GitCli::new(dir, "origin"), &FsWorkspace::new(dir))
        .expect("sync");

    assert_eq!(report.outcome, SyncOutcome::NoChanges);
    assert_eq!(fs::read_to_string(dir.join("README.md")).expect("read"), README);
}

#[test]
fn unknown_base_ref_is_fatal() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    let tmp = init_repo();
    let dir = tmp.path();
    let config = SyncReadmeConfig {
        context: ContextInputs {
            base_ref: Some("does-not-exist".into()),
            event_path: None,
        },
        ..SyncReadmeConfig::default()
    };

    let err = sync_readme(&config, &GitCli::new(dir, "origin"), &FsWorkspace::new(dir))
        .unwrap_err();

    assert!(err.to_string().contains("origin/does-not-exist...HEAD"));
}
