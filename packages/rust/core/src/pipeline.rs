//! End-to-end sync pipeline: context → change detection → extract → render → patch.

use tracing::{info, instrument, warn};

use skillsync_discovery::{BaseRef, ChangeDetector, ContextInputs, detect_changes, resolve_base_ref};
use skillsync_markdown::{Patch, extract_descriptions, patch_readme, render_tree};
use skillsync_shared::{ChangedPath, Result, SkillSyncError, SyncConfig};

use crate::workspace::Workspace;

/// Configuration for [`sync_readme`].
#[derive(Debug, Clone, Default)]
pub struct SyncReadmeConfig {
    /// Layout and git settings (file + defaults).
    pub config: SyncConfig,
    /// Base-reference inputs captured from the environment and CLI.
    pub context: ContextInputs,
    /// Compute the new README but never write it.
    pub check: bool,
    /// Skip change detection and always rebuild the block.
    pub force: bool,
}

/// What the pipeline ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing under the references directory changed; README not read.
    NoChanges,
    /// The rendered block already matches the README.
    UpToDate,
    /// The README was rewritten.
    Updated,
    /// Check mode: the README is stale and would be rewritten.
    WouldUpdate,
}

/// Result of [`sync_readme`].
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub outcome: SyncOutcome,
    /// Base reference diffed against; `None` when change detection was skipped.
    pub base_ref: Option<BaseRef>,
    /// Parsed reference changes.
    pub changes: Vec<ChangedPath>,
    /// Reference files listed in the rendered block.
    pub reference_count: usize,
    /// Reference files rendered with the placeholder description.
    pub placeholders: Vec<String>,
}

impl SyncReport {
    fn new(outcome: SyncOutcome, base_ref: Option<BaseRef>, changes: Vec<ChangedPath>) -> Self {
        Self {
            outcome,
            base_ref,
            changes,
            reference_count: 0,
            placeholders: Vec::new(),
        }
    }
}

/// Run the README sync.
///
/// 1. Check that the README and references directory exist
/// 2. Resolve the base reference and diff the references directory
///    (short-circuits with [`SyncOutcome::NoChanges`] on an empty diff)
/// 3. Extract existing descriptions from the README's structure block
/// 4. Render the new block from the sorted reference files
/// 5. Write the README only if the text changed (never in check mode)
#[instrument(skip_all, fields(readme = %config.config.layout.readme, check = config.check, force = config.force))]
pub fn sync_readme(
    config: &SyncReadmeConfig,
    detector: &dyn ChangeDetector,
    workspace: &dyn Workspace,
) -> Result<SyncReport> {
    let layout = &config.config.layout;
    let references = layout.references_path();

    // --- Phase 1: Required inputs ---
    if !workspace.is_file(&layout.readme) {
        return Err(SkillSyncError::missing_input("README", &layout.readme));
    }
    if !workspace.is_dir(&references) {
        return Err(SkillSyncError::missing_input("references directory", &references));
    }

    // --- Phase 2: Context + change detection ---
    let (base_ref, changes) = if config.force {
        info!("change detection skipped (forced)");
        (None, Vec::new())
    } else {
        let base_ref = resolve_base_ref(&config.context, &config.config.git.default_base_ref)?;
        info!(base_ref = %base_ref.name, source = %base_ref.source, "resolved base ref");

        let change_set = detect_changes(detector, &base_ref.name, &references)?;
        if change_set.is_empty() {
            info!("no reference file changes detected");
            return Ok(SyncReport::new(SyncOutcome::NoChanges, Some(base_ref), Vec::new()));
        }
        (Some(base_ref), change_set.paths)
    };

    // --- Phase 3: Existing descriptions ---
    let readme = workspace.read_text(&layout.readme)?;
    let descriptions = extract_descriptions(&readme)?;

    // --- Phase 4: Render ---
    let mut reference_files = workspace.markdown_files(&references)?;
    reference_files.sort();
    let rendered = render_tree(layout, &reference_files, &descriptions);

    for name in &rendered.placeholders {
        warn!(file = %name, "reference file has no description");
    }

    // --- Phase 5: Patch ---
    let outcome = match patch_readme(&readme, &rendered.content)? {
        Patch::Unchanged => SyncOutcome::UpToDate,
        Patch::Changed(_) if config.check => SyncOutcome::WouldUpdate,
        Patch::Changed(updated) => {
            workspace.write_text(&layout.readme, &updated)?;
            SyncOutcome::Updated
        }
    };

    info!(
        outcome = ?outcome,
        references = reference_files.len(),
        placeholders = rendered.placeholders.len(),
        "README sync complete"
    );

    Ok(SyncReport {
        outcome,
        base_ref,
        changes,
        reference_count: reference_files.len(),
        placeholders: rendered.placeholders,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
