//! Changed-file and submodule status models

use serde::{Deserialize, Serialize};

/// Metadata for one changed path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    /// Post-image path
    pub path: String,
    /// Pre-image path when the file was renamed
    pub old_path: Option<String>,
    pub is_tracked: bool,
    pub is_submodule: bool,
    /// Blob id when the entry was listed from a specific commit's tree
    pub tree_object_id: Option<String>,
}

impl StatusEntry {
    /// A plain tracked file with no rename, submodule, or tree listing
    pub fn tracked(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            old_path: None,
            is_tracked: true,
            is_submodule: false,
            tree_object_id: None,
        }
    }

    pub fn untracked(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            old_path: None,
            is_tracked: false,
            is_submodule: false,
            tree_object_id: None,
        }
    }
}

/// How a submodule pointer moved between the two sides of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmoduleChange {
    Added,
    Removed,
    Changed,
    Unchanged,
}

/// Structured status of a nested repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmoduleStatus {
    pub path: String,
    pub old_commit: Option<String>,
    pub new_commit: Option<String>,
    pub change: SubmoduleChange,
    pub is_dirty: bool,
}

impl SubmoduleStatus {
    pub fn new(
        path: impl Into<String>,
        old_commit: Option<String>,
        new_commit: Option<String>,
        is_dirty: bool,
    ) -> Self {
        let change = match (&old_commit, &new_commit) {
            (None, Some(_)) => SubmoduleChange::Added,
            (Some(_), None) => SubmoduleChange::Removed,
            (Some(old), Some(new)) if old == new => SubmoduleChange::Unchanged,
            _ => SubmoduleChange::Changed,
        };
        Self {
            path: path.into(),
            old_commit,
            new_commit,
            change,
            is_dirty,
        }
    }

    /// Parse a `Subproject commit` pointer patch body.
    ///
    /// Returns `None` when the text carries no pointer lines, in which case
    /// callers keep the raw patch text.
    pub fn from_patch_text(path: &str, patch: &str) -> Option<Self> {
        let mut old_commit = None;
        let mut new_commit = None;
        let mut is_dirty = false;

        for line in patch.lines() {
            if let Some(rest) = line.strip_prefix("-Subproject commit ") {
                old_commit = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix("+Subproject commit ") {
                let rest = rest.trim();
                if let Some(oid) = rest.strip_suffix("-dirty") {
                    is_dirty = true;
                    new_commit = Some(oid.to_string());
                } else {
                    new_commit = Some(rest.to_string());
                }
            }
        }

        if old_commit.is_none() && new_commit.is_none() {
            return None;
        }
        Some(Self::new(path, old_commit, new_commit, is_dirty))
    }

    /// Human-readable submodule status text for the presentation surface
    pub fn to_text(&self) -> String {
        let mut text = match self.change {
            SubmoduleChange::Added => format!(
                "Submodule {} added at {}",
                self.path,
                short(self.new_commit.as_deref())
            ),
            SubmoduleChange::Removed => format!(
                "Submodule {} removed (was {})",
                self.path,
                short(self.old_commit.as_deref())
            ),
            SubmoduleChange::Changed => format!(
                "Submodule {} changed from {} to {}",
                self.path,
                short(self.old_commit.as_deref()),
                short(self.new_commit.as_deref())
            ),
            SubmoduleChange::Unchanged => format!(
                "Submodule {} unchanged at {}",
                self.path,
                short(self.new_commit.as_deref())
            ),
        };
        if self.is_dirty {
            text.push_str(" (dirty)");
        }
        text
    }
}

fn short(oid: Option<&str>) -> &str {
    match oid {
        Some(oid) if oid.len() > 7 => &oid[..7],
        Some(oid) => oid,
        None => "<none>",
    }
}
