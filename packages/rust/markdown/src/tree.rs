//! Aligned tree rendering of the skill structure.
//!
//! ```text
//! swift-concurrency/
//! ├── SKILL.md    # Main skill file with decision trees
//! └── references/
//!     ├── actors.md   # Actor isolation
//!     └── tasks.md    # TODO: Add description
//! ```

use tracing::debug;

use skillsync_shared::{DescriptionMap, LayoutConfig};

const BRANCH: &str = "├──";
const LAST_BRANCH: &str = "└──";
const NESTED_INDENT: &str = "    ";
/// Gap between the padded name and the `#` marker.
const COMMENT_GAP: &str = "   ";

/// Output of [`render_tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTree {
    /// Tree text, one entry per line, not fence-wrapped.
    pub content: String,
    /// Reference files that received the placeholder description.
    pub placeholders: Vec<String>,
    /// Column the names were padded to.
    pub width: usize,
}

/// Render the tree block for `reference_files`.
///
/// `reference_files` is rendered in the order given; callers sort it. The
/// main file always comes first. Descriptions that are missing or empty fall
/// back to the layout's main description or placeholder.
pub fn render_tree(
    layout: &LayoutConfig,
    reference_files: &[String],
    descriptions: &DescriptionMap,
) -> RenderedTree {
    let width = std::iter::once(layout.main_file.as_str())
        .chain(reference_files.iter().map(String::as_str))
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(reference_files.len() + 3);
    lines.push(format!("{}/", layout.skill_dir.trim_end_matches('/')));

    let main_description = descriptions
        .described(&layout.main_file)
        .unwrap_or(layout.main_description.as_str());
    lines.push(entry_line("", BRANCH, &layout.main_file, width, main_description));
    lines.push(format!(
        "{LAST_BRANCH} {}/",
        layout.references_dir.trim_matches('/')
    ));

    let mut placeholders = Vec::new();
    for (index, file_name) in reference_files.iter().enumerate() {
        let glyph = if index + 1 == reference_files.len() {
            LAST_BRANCH
        } else {
            BRANCH
        };
        let description = match descriptions.described(file_name) {
            Some(d) => d,
            None => {
                placeholders.push(file_name.clone());
                layout.placeholder.as_str()
            }
        };
        lines.push(entry_line(NESTED_INDENT, glyph, file_name, width, description));
    }

    debug!(
        references = reference_files.len(),
        width,
        placeholders = placeholders.len(),
        "rendered skill structure"
    );

    RenderedTree {
        content: lines.join("\n"),
        placeholders,
        width,
    }
}

/// One `<indent><glyph> <name padded>   # <description>` line.
///
/// The gap and marker are only written for a non-empty description.
fn entry_line(indent: &str, glyph: &str, name: &str, width: usize, description: &str) -> String {
    let line = if description.is_empty() {
        format!("{indent}{glyph} {name}")
    } else {
        format!("{indent}{glyph} {name:<width$}{COMMENT_GAP}# {description}")
    };
    line.trim_end().to_string()
}
