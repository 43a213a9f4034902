//! Skill structure block handling for README files.
//!
//! Three pure steps, none of which touch the filesystem:
//! 1. [`locate_block`] finds the fenced block under `## Skill Structure`
//! 2. [`parse_descriptions`] recovers per-file descriptions from its tree lines
//! 3. [`render_tree`] + [`patch_readme`] produce the replacement README text

mod block;
mod descriptions;
mod tree;

pub use block::{Patch, SECTION_HEADING, StructureBlock, fence, locate_block, patch_readme};
pub use descriptions::{TreeEntry, parse_descriptions, parse_entry};
pub use tree::{RenderedTree, render_tree};

use tracing::instrument;

use skillsync_shared::{DescriptionMap, Result};

/// Locate the README's structure block and parse its descriptions in one go.
#[instrument(skip_all, fields(readme_len = readme.len()))]
pub fn extract_descriptions(readme: &str) -> Result<DescriptionMap> {
    let block = locate_block(readme)?;
    let descriptions = parse_descriptions(block.content);
    tracing::debug!(entries = descriptions.len(), "extracted existing descriptions");
    Ok(descriptions)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
