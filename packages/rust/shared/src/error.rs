//! Error types for skillsync.
//!
//! Library crates use [`SkillSyncError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all skillsync operations.
#[derive(Debug, thiserror::Error)]
pub enum SkillSyncError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// A file or directory the tool maintains is absent.
    #[error("{what} not found at {path:?}")]
    MissingInput { what: &'static str, path: PathBuf },

    /// The CI event payload exists but is not valid JSON.
    #[error("invalid event payload at {path:?}: {source}")]
    Payload {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The version-control diff could not run or exited non-zero.
    #[error("git error running `{command}`: {message}")]
    Git { command: String, message: String },

    /// The README has no `## Skill Structure` fenced block.
    #[error("malformed README: {message}")]
    MissingSection { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SkillSyncError>;

impl SkillSyncError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Report a required input (README, references directory) as missing.
    pub fn missing_input(what: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::MissingInput {
            what,
            path: path.into(),
        }
    }

    /// Wrap a payload parse failure with the offending path.
    pub fn payload(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Payload {
            path: path.into(),
            source,
        }
    }

    /// Create a git error for the given command line.
    pub fn git(command: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Git {
            command: command.into(),
            message: msg.into(),
        }
    }

    /// Create a malformed-README error.
    pub fn missing_section(msg: impl Into<String>) -> Self {
        Self::MissingSection {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
