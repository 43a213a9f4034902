//! Locating and replacing the `## Skill Structure` fenced block in a README.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use skillsync_shared::{Result, SkillSyncError};

/// Heading that anchors the maintained block.
pub const SECTION_HEADING: &str = "## Skill Structure";

const FENCE: &str = "```";

/// The heading, anything up to the first fence, then the fenced body.
/// Both spans are lazy so the first fenced block after the heading wins.
static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(## Skill Structure.*?)```(.*?)```").expect("skill structure regex")
});

/// The existing skill structure block inside a README.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureBlock<'a> {
    /// Text between the fences, trimmed.
    pub content: &'a str,
    /// Byte range of the fenced block, opening through closing fence.
    pub fence_range: Range<usize>,
}

/// Result of applying a rendered block to a README.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    /// The README already contains exactly this block.
    Unchanged,
    /// New README text.
    Changed(String),
}

/// Find the first fenced block following the skill structure heading.
pub fn locate_block(readme: &str) -> Result<StructureBlock<'_>> {
    if !readme.contains(SECTION_HEADING) {
        return Err(SkillSyncError::missing_section(format!(
            "no `{SECTION_HEADING}` heading in README"
        )));
    }

    let (heading, body) = BLOCK_RE
        .captures(readme)
        .and_then(|caps| Some((caps.get(1)?, caps.get(2)?)))
        .ok_or_else(|| {
            SkillSyncError::missing_section("Skill Structure code block not found in README")
        })?;

    Ok(StructureBlock {
        content: body.as_str().trim(),
        fence_range: heading.end()..body.end() + FENCE.len(),
    })
}

/// Wrap tree content in a bare fence.
pub fn fence(content: &str) -> String {
    format!("{FENCE}\n{content}\n{FENCE}")
}

/// Replace the skill structure block with `content`, keeping every other byte.
pub fn patch_readme(readme: &str, content: &str) -> Result<Patch> {
    let block = locate_block(readme)?;

    let mut updated = String::with_capacity(readme.len() + content.len());
    updated.push_str(&readme[..block.fence_range.start]);
    updated.push_str(&fence(content));
    updated.push_str(&readme[block.fence_range.end..]);

    if updated == readme {
        Ok(Patch::Unchanged)
    } else {
        Ok(Patch::Changed(updated))
    }
}
