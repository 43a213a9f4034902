//! Configuration for skillsync.
//!
//! An optional `.skillsync.toml` in the working directory overrides the
//! built-in layout. CLI flags override config file values, which override
//! defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkillSyncError};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".skillsync.toml";

// ---------------------------------------------------------------------------
// Config structs (matching .skillsync.toml schema)
// ---------------------------------------------------------------------------

/// Top-level sync config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Where the README and the skill directory live.
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Version-control settings.
    #[serde(default)]
    pub git: GitConfig,
}

/// `[layout]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// README path relative to the working directory.
    #[serde(default = "default_readme")]
    pub readme: String,

    /// Skill directory; also the root line of the rendered tree.
    #[serde(default = "default_skill_dir")]
    pub skill_dir: String,

    /// References subdirectory name inside `skill_dir`.
    #[serde(default = "default_references_dir")]
    pub references_dir: String,

    /// Main skill file, always listed first.
    #[serde(default = "default_main_file")]
    pub main_file: String,

    /// Description used for the main file when the README has none.
    #[serde(default = "default_main_description")]
    pub main_description: String,

    /// Description used for reference files the README does not describe yet.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            readme: default_readme(),
            skill_dir: default_skill_dir(),
            references_dir: default_references_dir(),
            main_file: default_main_file(),
            main_description: default_main_description(),
            placeholder: default_placeholder(),
        }
    }
}

impl LayoutConfig {
    /// References directory relative to the working directory, with `/`
    /// separators (this is also the pathspec handed to git).
    pub fn references_path(&self) -> String {
        format!(
            "{}/{}",
            self.skill_dir.trim_end_matches('/'),
            self.references_dir.trim_matches('/')
        )
    }
}

fn default_readme() -> String {
    "README.md".into()
}
fn default_skill_dir() -> String {
    "swift-concurrency".into()
}
fn default_references_dir() -> String {
    "references".into()
}
fn default_main_file() -> String {
    "SKILL.md".into()
}
fn default_main_description() -> String {
    "Main skill file with decision trees".into()
}
fn default_placeholder() -> String {
    "TODO: Add description".into()
}

/// `[git]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    /// Base reference used when neither the env nor the event payload names one.
    #[serde(default = "default_base_ref")]
    pub default_base_ref: String,

    /// Remote whose copy of the base reference is compared against `HEAD`.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Name of the env var holding an explicit base reference.
    #[serde(default = "default_base_ref_env")]
    pub base_ref_env: String,

    /// Name of the env var holding the CI event payload path.
    #[serde(default = "default_event_path_env")]
    pub event_path_env: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            default_base_ref: default_base_ref(),
            remote: default_remote(),
            base_ref_env: default_base_ref_env(),
            event_path_env: default_event_path_env(),
        }
    }
}

fn default_base_ref() -> String {
    "main".into()
}
fn default_remote() -> String {
    "origin".into()
}
fn default_base_ref_env() -> String {
    "GITHUB_BASE_REF".into()
}
fn default_event_path_env() -> String {
    "GITHUB_EVENT_PATH".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path of the default config file inside `root`.
pub fn config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Load config from `root/.skillsync.toml`. Returns defaults if the file does not exist.
pub fn load_config(root: &Path) -> Result<SyncConfig> {
    let path = config_file_path(root);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(SyncConfig::default());
    }

    load_config_from(&path)
}

/// Load config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<SyncConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SkillSyncError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| SkillSyncError::config(format!("failed to parse {}: {e}", path.display())))
}
