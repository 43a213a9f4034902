//! Base-reference resolution from CI context.
//!
//! Precedence:
//! 1. an explicit base reference (CLI flag or `GITHUB_BASE_REF`)
//! 2. `pull_request.base.ref` from the event payload file (`GITHUB_EVENT_PATH`)
//! 3. the configured default (`main`)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, instrument};

use skillsync_shared::{GitConfig, Result, SkillSyncError};

/// JSON pointer to the pull request's base branch inside an event payload.
const PAYLOAD_BASE_REF_POINTER: &str = "/pull_request/base/ref";

/// Raw inputs for base-reference resolution, captured once from the environment.
#[derive(Debug, Clone, Default)]
pub struct ContextInputs {
    /// Explicit base reference; empty strings count as unset.
    pub base_ref: Option<String>,
    /// Path to a JSON event payload.
    pub event_path: Option<PathBuf>,
}

impl ContextInputs {
    /// Read the env vars named in `git`.
    pub fn from_env(git: &GitConfig) -> Self {
        Self::from_lookup(git, |name| std::env::var(name).ok())
    }

    /// Read the variables named in `git` through `lookup`.
    pub fn from_lookup(git: &GitConfig, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            base_ref: lookup(&git.base_ref_env),
            event_path: lookup(&git.event_path_env)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Replace the explicit base reference when `base_ref` is `Some`.
    pub fn with_base_ref(mut self, base_ref: Option<String>) -> Self {
        if base_ref.is_some() {
            self.base_ref = base_ref;
        }
        self
    }

    /// Replace the event payload path when `event_path` is `Some`.
    pub fn with_event_path(mut self, event_path: Option<PathBuf>) -> Self {
        if event_path.is_some() {
            self.event_path = event_path;
        }
        self
    }
}

/// Where the resolved base reference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseRefSource {
    Explicit,
    EventPayload,
    Default,
}

impl std::fmt::Display for BaseRefSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit => write!(f, "explicit"),
            Self::EventPayload => write!(f, "event payload"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// A resolved base reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseRef {
    pub name: String,
    pub source: BaseRefSource,
}

/// Resolve the base reference to diff against.
///
/// A payload path that does not exist is ignored. A payload that exists but is
/// not valid JSON is an error.
#[instrument(skip_all)]
pub fn resolve_base_ref(inputs: &ContextInputs, default_ref: &str) -> Result<BaseRef> {
    if let Some(name) = inputs.base_ref.as_deref().filter(|s| !s.is_empty()) {
        debug!(base_ref = name, "using explicit base ref");
        return Ok(BaseRef {
            name: name.to_string(),
            source: BaseRefSource::Explicit,
        });
    }

    if let Some(path) = inputs.event_path.as_deref() {
        if let Some(name) = read_payload_base_ref(path)? {
            debug!(base_ref = %name, path = %path.display(), "using event payload base ref");
            return Ok(BaseRef {
                name,
                source: BaseRefSource::EventPayload,
            });
        }
    }

    debug!(base_ref = default_ref, "falling back to default base ref");
    Ok(BaseRef {
        name: default_ref.to_string(),
        source: BaseRefSource::Default,
    })
}

/// Read `pull_request.base.ref` from an event payload, if the file exists and has it.
fn read_payload_base_ref(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        debug!(path = %path.display(), "event payload not found, ignoring");
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| SkillSyncError::io(path, e))?;
    let payload: Value =
        serde_json::from_str(&content).map_err(|e| SkillSyncError::payload(path, e))?;

    Ok(payload
        .pointer(PAYLOAD_BASE_REF_POINTER)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string))
}
