//! Per-file patch retrieval

use async_trait::async_trait;
use encoding_rs::Encoding;
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::models::{PatchOutput, RevisionRange, StatusEntry, SubmoduleStatus};

/// Arguments for one comparison query
#[derive(Debug, Clone)]
pub struct PatchRequest {
    pub base: Option<String>,
    pub target: Option<String>,
    /// Post-image path
    pub path: String,
    /// Pre-image path when renamed
    pub old_path: Option<String>,
    pub args: crate::models::DiffArgs,
    pub encoding: &'static Encoding,
    pub include_untracked_content: bool,
    pub tracked: bool,
}

/// External comparison-query collaborator. Pure query; no mutation.
#[async_trait]
pub trait PatchQuery: Send + Sync {
    /// Returns the patch text, or `None` when the comparison produces none
    async fn patch(&self, request: &PatchRequest) -> Result<Option<String>>;
}

/// External nested-repository probe collaborator
pub trait SubrepoProbe: Send + Sync {
    /// Whether `path` is an existing directory that is itself a repo root
    fn is_repo_root(&self, path: &str) -> bool;
    /// Descriptive status text for a nested repository at `path`
    fn status_text(&self, path: &str) -> String;
}

/// A nested-repository status computation that may already be in flight.
/// Yields `None` when the path turns out not to be a nested repository.
pub type SubmoduleStatusTask = JoinHandle<Option<SubmoduleStatus>>;

/// Whether the file is diffed as tracked.
///
/// A file listed from a specific commit's tree is always treated as tracked
/// when a concrete target revision exists, regardless of what a live status
/// query reports. Historical tree listings get uniform treatment; the rule
/// is not applied beyond that condition.
pub fn effective_tracked(entry: &StatusEntry, range: &RevisionRange) -> bool {
    entry.is_tracked || (entry.tree_object_id.is_some() && range.target.is_some())
}

/// Retrieve the patch for one changed path.
///
/// Decision order, first match wins:
/// 1. untracked path that is itself a repository root → probe status text
/// 2. submodule with a pending status computation → join it and format
/// 3. comparison query; no patch → `Empty`, submodule patch → reformatted
///    pointer status, anything else → raw diff text
pub async fn retrieve_file_diff(
    range: &RevisionRange,
    entry: &StatusEntry,
    encoding: &'static Encoding,
    query: &dyn PatchQuery,
    probe: &dyn SubrepoProbe,
    pending_status: Option<SubmoduleStatusTask>,
) -> Result<PatchOutput> {
    // An untracked directory that is an independent repository cannot be
    // detected by a status query alone; the filesystem probe decides.
    if !entry.is_tracked && probe.is_repo_root(&entry.path) {
        tracing::debug!(path = %entry.path, "Untracked path is a nested repository root");
        return Ok(PatchOutput::Submodule(probe.status_text(&entry.path)));
    }

    if entry.is_submodule {
        if let Some(task) = pending_status {
            // The wait is bounded by the status computation's own lifecycle.
            if let Some(status) = task.await? {
                return Ok(PatchOutput::Submodule(status.to_text()));
            }
            // Not a nested repository after all; fall through to the query.
        }
    }

    let request = PatchRequest {
        base: range.base.clone(),
        target: range.target.clone(),
        path: entry.path.clone(),
        old_path: entry.old_path.clone(),
        args: range.args,
        encoding,
        include_untracked_content: range.args.include_untracked,
        tracked: effective_tracked(entry, range),
    };

    let Some(text) = query.patch(&request).await? else {
        return Ok(PatchOutput::Empty);
    };

    if entry.is_submodule {
        // Submodules compare by recorded pointer, not line content
        if let Some(status) = SubmoduleStatus::from_patch_text(&entry.path, &text) {
            return Ok(PatchOutput::Submodule(status.to_text()));
        }
    }

    Ok(PatchOutput::Text(text))
}
