//! Tree-diagram line parser.
//!
//! Recovers `file name -> description` pairs from the lines of an existing
//! skill structure block:
//! - `├── alpha.md   # does X`  ->  (`alpha.md`, `does X`)
//! - `    └── beta.md`          ->  (`beta.md`, ``)
//! - anything without a branch glyph and a `.md` name is skipped

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use skillsync_shared::DescriptionMap;

/// Matches a branch glyph, a `.md` file name, and an optional `# comment`.
///
/// The name must be followed by the comment, whitespace, or end of line, so
/// `notes.mdx` is not mistaken for `notes.md`.
static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:├──|└──)\s+([^\s#]+\.md)(?:\s*#\s*(.*)|\s.*)?$").expect("tree entry regex")
});

/// One listed file recovered from a tree line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub file_name: String,
    /// Trimmed comment text; empty when the line has no comment.
    pub description: String,
}

/// Parse a single tree line. Returns `None` for lines that do not list a file.
pub fn parse_entry(line: &str) -> Option<TreeEntry> {
    let caps = ENTRY_RE.captures(line)?;
    Some(TreeEntry {
        file_name: caps[1].to_string(),
        description: caps
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
    })
}

/// Parse every line of a block into a [`DescriptionMap`].
///
/// Later entries for the same file name replace earlier ones.
pub fn parse_descriptions(block: &str) -> DescriptionMap {
    let mut map = DescriptionMap::new();
    for line in block.lines() {
        match parse_entry(line) {
            Some(entry) => map.insert(entry.file_name, entry.description),
            None => trace!(line, "skipping non-entry line"),
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entry_with_comment() {
        let entry = parse_entry("├── alpha.md   # does X").unwrap();
        assert_eq!(entry.file_name, "alpha.md");
        assert_eq!(entry.description, "does X");
    }

    #[test]
    fn parses_nested_terminal_entry() {
        let entry = parse_entry("    └── old.md   # Old description  ").unwrap();
        assert_eq!(entry.file_name, "old.md");
        assert_eq!(entry.description, "Old description");
    }

    #[test]
    fn entry_without_comment_has_empty_description() {
        let entry = parse_entry("    ├── bare.md").unwrap();
        assert_eq!(entry.description, "");

        let entry = parse_entry("    ├── bare.md   ").unwrap();
        assert_eq!(entry.description, "");
    }

    #[test]
    fn comment_without_spacing() {
        let entry = parse_entry("├── tight.md#Tight").unwrap();
        assert_eq!(entry.file_name, "tight.md");
        assert_eq!(entry.description, "Tight");
    }

    #[test]
    fn description_may_contain_hashes() {
        let entry = parse_entry("├── actors.md   # Actors, #isolated and @MainActor").unwrap();
        assert_eq!(entry.description, "Actors, #isolated and @MainActor");
    }

    #[test]
    fn ignores_non_entries() {
        assert!(parse_entry("swift-concurrency/").is_none());
        assert!(parse_entry("└── references/").is_none());
        assert!(parse_entry("├── notes.mdx   # not markdown").is_none());
        assert!(parse_entry("- alpha.md # no glyph").is_none());
        assert!(parse_entry("").is_none());
    }

    #[test]
    fn handles_crlf_lines() {
        let entry = parse_entry("├── win.md   # Windows\r").unwrap();
        assert_eq!(entry.description, "Windows");
    }

    #[test]
    fn parse_descriptions_collects_block() {
        let block = "swift-concurrency/\n\
                     ├── SKILL.md   # Main skill file\n\
                     └── references/\n    \
                     ├── actors.md  # Actor isolation\n    \
                     └── old.md     # Old description";
        let map = parse_descriptions(block);
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("SKILL.md"), Some("Main skill file"));
        assert_eq!(map.get("actors.md"), Some("Actor isolation"));
        assert_eq!(map.get("old.md"), Some("Old description"));
    }

    #[test]
    fn duplicate_names_keep_last() {
        let map = parse_descriptions("├── a.md # first\n└── a.md # second");
        assert_eq!(map.get("a.md"), Some("second"));
    }
}
