//! Core domain types for skillsync.

use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// DescriptionMap
// ---------------------------------------------------------------------------

/// File name to human-written description, recovered from the README's tree block.
///
/// Rebuilt from the README on every run and only ever written back through a
/// freshly rendered block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionMap(BTreeMap<String, String>);

impl DescriptionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a description, replacing any earlier entry for the same file.
    pub fn insert(&mut self, file_name: impl Into<String>, description: impl Into<String>) {
        self.0.insert(file_name.into(), description.into());
    }

    /// Description for `file_name`, if the file was listed.
    ///
    /// May return an empty string for files listed without a comment.
    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.0.get(file_name).map(String::as_str)
    }

    /// Non-empty description for `file_name`, if any.
    pub fn described(&self, file_name: &str) -> Option<&str> {
        self.get(file_name).filter(|d| !d.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DescriptionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

// ---------------------------------------------------------------------------
// ChangedPath
// ---------------------------------------------------------------------------

/// Status letter of one `git diff --name-status` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    /// Rename with similarity score (0-100).
    Renamed(u8),
    /// Copy with similarity score (0-100).
    Copied(u8),
    TypeChanged,
    Unmerged,
    Unknown(char),
}

impl ChangeKind {
    /// Parse a status field such as `M`, `A`, or `R087`.
    pub fn from_status(status: &str) -> Option<Self> {
        let mut chars = status.chars();
        let letter = chars.next()?;
        let score = || chars.as_str().parse::<u8>().unwrap_or(0);
        Some(match letter {
            'A' => Self::Added,
            'M' => Self::Modified,
            'D' => Self::Deleted,
            'R' => Self::Renamed(score()),
            'C' => Self::Copied(score()),
            'T' => Self::TypeChanged,
            'U' => Self::Unmerged,
            other => Self::Unknown(other),
        })
    }

    /// Whether the line carries a source and a destination path.
    pub fn has_two_paths(self) -> bool {
        matches!(self, Self::Renamed(_) | Self::Copied(_))
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Modified => write!(f, "modified"),
            Self::Deleted => write!(f, "deleted"),
            Self::Renamed(score) => write!(f, "renamed ({score}%)"),
            Self::Copied(score) => write!(f, "copied ({score}%)"),
            Self::TypeChanged => write!(f, "type changed"),
            Self::Unmerged => write!(f, "unmerged"),
            Self::Unknown(c) => write!(f, "unknown ({c})"),
        }
    }
}

/// One changed file reported by the change detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedPath {
    pub kind: ChangeKind,
    /// Path as reported by git (the destination for renames and copies).
    pub path: String,
    /// Source path for renames and copies.
    pub from: Option<String>,
}
