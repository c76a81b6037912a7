//! Revision selection models

use serde::{Deserialize, Serialize};

/// An immutable point-in-time snapshot of the tree, identified by an opaque
/// id with an optional first parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub id: String,
    pub parent_id: Option<String>,
}

impl Revision {
    pub fn new(id: impl Into<String>, parent_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.map(|p| p.to_string()),
        }
    }
}

/// How many revisions a comparison needs and which extra flags apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiffMode {
    /// Diff the two explicitly selected revisions against each other
    SelectedPair,
    /// Diff a single selected revision against its first parent
    ParentOfSelected,
    /// Diff a single selected revision through the working-tree
    /// pseudo-revision; untracked content is included
    WorkingTree,
}

impl DiffMode {
    /// Number of selected revisions this mode requires
    pub fn required_selections(&self) -> usize {
        match self {
            DiffMode::SelectedPair => 2,
            DiffMode::ParentOfSelected | DiffMode::WorkingTree => 1,
        }
    }

    /// Fixed mapping from mode to comparison flags. Never depends on the
    /// selection contents.
    pub fn args(&self) -> DiffArgs {
        match self {
            DiffMode::SelectedPair | DiffMode::ParentOfSelected => DiffArgs {
                find_renames: true,
                ignore_whitespace: false,
                include_untracked: false,
            },
            DiffMode::WorkingTree => DiffArgs {
                find_renames: true,
                ignore_whitespace: false,
                include_untracked: true,
            },
        }
    }
}

/// Extra comparison flags passed through to the query collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffArgs {
    pub find_renames: bool,
    pub ignore_whitespace: bool,
    pub include_untracked: bool,
}

/// A resolved comparison range.
///
/// `base = None` means no baseline is available; callers must show the
/// target's content directly instead of a two-sided diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionRange {
    pub base: Option<String>,
    pub target: Option<String>,
    pub args: DiffArgs,
}
