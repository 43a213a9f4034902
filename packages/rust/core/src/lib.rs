//! Core pipeline orchestration for skillsync.
//!
//! This crate ties together change discovery, description extraction, tree
//! rendering, and README patching into the end-to-end [`pipeline::sync_readme`]
//! workflow, over a narrow [`workspace::Workspace`] filesystem seam.

pub mod pipeline;
pub mod workspace;

pub use pipeline::{SyncOutcome, SyncReadmeConfig, SyncReport, sync_readme};
pub use workspace::{FsWorkspace, Workspace};
