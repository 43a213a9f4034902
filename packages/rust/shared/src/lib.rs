//! Shared types, error model, and configuration for skillsync.
//!
//! This crate is the foundation depended on by all other skillsync crates.
//! It provides:
//! - [`SkillSyncError`] — the unified error type
//! - Domain types ([`DescriptionMap`], [`ChangedPath`], [`ChangeKind`])
//! - Configuration ([`SyncConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    CONFIG_FILE_NAME, GitConfig, LayoutConfig, SyncConfig, config_file_path, load_config,
    load_config_from,
};
pub use error::{Result, SkillSyncError};
pub use types::{ChangeKind, ChangedPath, DescriptionMap};
