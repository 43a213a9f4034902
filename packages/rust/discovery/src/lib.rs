//! Revision context and reference change discovery.
//!
//! Before touching the README, skillsync works out which revision to compare
//! against ([`resolve_base_ref`]) and whether anything under the references
//! directory changed since then ([`detect_changes`]). An empty change set lets
//! the caller skip the README entirely.

mod changes;
mod context;

pub use changes::{ChangeDetector, ChangeSet, GitCli, detect_changes, parse_name_status};
pub use context::{BaseRef, BaseRefSource, ContextInputs, resolve_base_ref};
