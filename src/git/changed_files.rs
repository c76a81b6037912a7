//! Changed-file listing for a resolved comparison range

use std::path::Path;

use crate::error::Result;
use crate::models::{RevisionRange, StatusEntry};

/// List the changed paths for a resolved range, in the shape the presenter
/// consumes.
///
/// For historical ranges (a concrete target revision) each entry carries the
/// post-image blob id as its tree object id; renames carry the pre-image
/// path.
pub fn changed_files(repo_path: &Path, range: &RevisionRange) -> Result<Vec<StatusEntry>> {
    let repo = git2::Repository::open(repo_path)?;

    let base_tree = resolve_tree(&repo, range.base.as_deref())?;
    let target_tree = resolve_tree(&repo, range.target.as_deref())?;

    let mut opts = git2::DiffOptions::new();
    if range.args.include_untracked {
        opts.include_untracked(true).recurse_untracked_dirs(true);
    }
    if range.args.ignore_whitespace {
        opts.ignore_whitespace(true);
    }

    let mut diff = match (&base_tree, &target_tree) {
        (base, Some(target)) => {
            repo.diff_tree_to_tree(base.as_ref(), Some(target), Some(&mut opts))?
        }
        (Some(base), None) => {
            repo.diff_tree_to_workdir_with_index(Some(base), Some(&mut opts))?
        }
        (None, None) => repo.diff_index_to_workdir(None, Some(&mut opts))?,
    };

    if range.args.find_renames {
        let mut find = git2::DiffFindOptions::new();
        find.renames(true);
        diff.find_similar(Some(&mut find))?;
    }

    let historical = range.target.is_some();
    let mut entries = Vec::new();

    for delta in diff.deltas() {
        let path = delta
            .new_file()
            .path()
            .or_else(|| delta.old_file().path())
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();

        let old_path = if delta.status() == git2::Delta::Renamed {
            delta
                .old_file()
                .path()
                .map(|p| p.to_string_lossy().to_string())
        } else {
            None
        };

        let is_submodule = delta.new_file().mode() == git2::FileMode::Commit
            || delta.old_file().mode() == git2::FileMode::Commit;

        let tree_object_id = if historical && !delta.new_file().id().is_zero() {
            Some(delta.new_file().id().to_string())
        } else {
            None
        };

        entries.push(StatusEntry {
            path,
            old_path,
            is_tracked: delta.status() != git2::Delta::Untracked,
            is_submodule,
            tree_object_id,
        });
    }

    tracing::debug!(count = entries.len(), "Listed changed files");
    Ok(entries)
}

fn resolve_tree<'r>(
    repo: &'r git2::Repository,
    revision: Option<&str>,
) -> Result<Option<git2::Tree<'r>>> {
    let Some(revision) = revision else {
        return Ok(None);
    };
    Ok(Some(
        repo.revparse_single(revision)?.peel_to_commit()?.tree()?,
    ))
}
