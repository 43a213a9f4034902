//! File access for the sync pipeline.
//!
//! All paths are relative to the workspace root and use `/` separators, the
//! same form the config file and git pathspecs use.

use std::path::PathBuf;

use tracing::{debug, warn};

use skillsync_shared::{Result, SkillSyncError};

/// Narrow filesystem seam used by [`crate::pipeline::sync_readme`].
pub trait Workspace {
    /// Whether `rel` names an existing regular file.
    fn is_file(&self, rel: &str) -> bool;

    /// Whether `rel` names an existing directory.
    fn is_dir(&self, rel: &str) -> bool;

    fn read_text(&self, rel: &str) -> Result<String>;

    /// Overwrite the contents of `rel` in place, following symlinks and
    /// keeping the existing file's permissions.
    fn write_text(&self, rel: &str, content: &str) -> Result<()>;

    /// Names of the regular `.md` files directly inside `rel_dir`, in no
    /// particular order.
    fn markdown_files(&self, rel_dir: &str) -> Result<Vec<String>>;
}

/// [`Workspace`] rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct FsWorkspace {
    root: PathBuf,
}

impl FsWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, rel: &str) -> PathBuf {
        rel.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }
}

impl Workspace for FsWorkspace {
    fn is_file(&self, rel: &str) -> bool {
        self.resolve(rel).is_file()
    }

    fn is_dir(&self, rel: &str) -> bool {
        self.resolve(rel).is_dir()
    }

    fn read_text(&self, rel: &str) -> Result<String> {
        let path = self.resolve(rel);
        std::fs::read_to_string(&path).map_err(|e| SkillSyncError::io(&path, e))
    }

    fn write_text(&self, rel: &str, content: &str) -> Result<()> {
        let target = self.resolve(rel);

        // Rewrite the existing inode so symlinks and permissions survive.
        std::fs::write(&target, content).map_err(|e| SkillSyncError::io(&target, e))?;

        debug!(path = %target.display(), size = content.len(), "wrote file");
        Ok(())
    }

    fn markdown_files(&self, rel_dir: &str) -> Result<Vec<String>> {
        let dir = self.resolve(rel_dir);
        let entries = std::fs::read_dir(&dir).map_err(|e| SkillSyncError::io(&dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SkillSyncError::io(&dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if name.ends_with(".md") => names.push(name),
                Ok(_) => {}
                Err(name) => warn!(?name, "skipping non UTF-8 file name"),
            }
        }

        debug!(dir = %dir.display(), count = names.len(), "listed reference files");
        Ok(names)
    }
}
