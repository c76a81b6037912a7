//! git2-backed comparison-query collaborator

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::diff::retrieve::{PatchQuery, PatchRequest};
use crate::encoding::decode_bytes;
use crate::error::{Result, SeadiffError};

/// Comparison query backed by a local git repository.
///
/// Opens the repository per query; diffs run under `spawn_blocking` so the
/// async caller never blocks on libgit2.
pub struct GitPatchQuery {
    repo_path: PathBuf,
}

impl GitPatchQuery {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }
}

#[async_trait]
impl PatchQuery for GitPatchQuery {
    async fn patch(&self, request: &PatchRequest) -> Result<Option<String>> {
        let repo_path = self.repo_path.clone();
        let request = request.clone();
        tokio::task::spawn_blocking(move || compute_patch(&repo_path, &request)).await?
    }
}

fn compute_patch(repo_path: &Path, request: &PatchRequest) -> Result<Option<String>> {
    let repo = git2::Repository::open(repo_path)?;

    let mut opts = git2::DiffOptions::new();
    opts.pathspec(&request.path);
    if let Some(old_path) = &request.old_path {
        // The pre-image of a rename lives under the old name
        opts.pathspec(old_path);
    }
    if request.args.ignore_whitespace {
        opts.ignore_whitespace(true);
    }
    if !request.tracked && request.include_untracked_content {
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .show_untracked_content(true);
    }

    let base_tree = resolve_tree(&repo, request.base.as_deref())?;
    let target_tree = resolve_tree(&repo, request.target.as_deref())?;

    let mut diff = match (&base_tree, &target_tree) {
        (base, Some(target)) => {
            repo.diff_tree_to_tree(base.as_ref(), Some(target), Some(&mut opts))?
        }
        (Some(base), None) => {
            repo.diff_tree_to_workdir_with_index(Some(base), Some(&mut opts))?
        }
        (None, None) => repo.diff_index_to_workdir(None, Some(&mut opts))?,
    };

    if request.args.find_renames {
        let mut find = git2::DiffFindOptions::new();
        find.renames(true);
        diff.find_similar(Some(&mut find))?;
    }

    let text = render_patch(&diff, request)?;
    if !text.is_empty() {
        return Ok(Some(text));
    }

    // A live comparison can miss a brand-new untracked file when the caller
    // did not ask for untracked content; synthesize its patch from disk.
    if request.target.is_none() && !request.tracked {
        return synthesize_untracked_patch(repo_path, request);
    }

    Ok(None)
}

fn resolve_tree<'r>(
    repo: &'r git2::Repository,
    revision: Option<&str>,
) -> Result<Option<git2::Tree<'r>>> {
    let Some(revision) = revision else {
        return Ok(None);
    };
    let tree = repo
        .revparse_single(revision)?
        .peel_to_commit()
        .map_err(|_| {
            SeadiffError::OperationFailed(format!("'{revision}' does not point to a commit"))
        })?
        .tree()?;
    Ok(Some(tree))
}

/// Render the whole diff as raw patch text, decoded with the requested
/// encoding
fn render_patch(diff: &git2::Diff, request: &PatchRequest) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    diff.print(git2::DiffFormat::Patch, |_delta, _hunk, line| {
        match line.origin() {
            '+' | '-' | ' ' => buf.push(line.origin() as u8),
            _ => {}
        }
        buf.extend_from_slice(line.content());
        true
    })?;
    Ok(decode_bytes(&buf, request.encoding))
}

/// Whole-file additions patch for an untracked file on disk
fn synthesize_untracked_patch(
    repo_path: &Path,
    request: &PatchRequest,
) -> Result<Option<String>> {
    let full_path = repo_path.join(&request.path);
    if !full_path.is_file() {
        return Ok(None);
    }

    let data = std::fs::read(&full_path)?;
    if crate::encoding::is_binary_data(&data) {
        return Ok(Some(format!("Binary file {} differs\n", request.path)));
    }
    let content = decode_bytes(&data, request.encoding);

    let lines: Vec<&str> = content.lines().collect();
    let mut patch = format!(
        "--- /dev/null\n+++ b/{}\n@@ -0,0 +1,{} @@\n",
        request.path,
        lines.len()
    );
    for line in &lines {
        patch.push('+');
        patch.push_str(line);
        patch.push('\n');
    }

    tracing::debug!(path = %request.path, "Synthesized patch for untracked file");
    Ok(Some(patch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiffMode, RevisionRange};
    use crate::test_utils::TestRepo;

    fn request(range: &RevisionRange, path: &str, tracked: bool) -> PatchRequest {
        PatchRequest {
            base: range.base.clone(),
            target: range.target.clone(),
            path: path.to_string(),
            old_path: None,
            args: range.args,
            encoding: encoding_rs::UTF_8,
            include_untracked_content: range.args.include_untracked,
            tracked,
        }
    }

    fn range_between(base: git2::Oid, target: git2::Oid) -> RevisionRange {
        RevisionRange {
            base: Some(base.to_string()),
            target: Some(target.to_string()),
            args: DiffMode::SelectedPair.args(),
        }
    }

    #[tokio::test]
    async fn test_patch_between_two_commits() {
        let repo = TestRepo::with_initial_commit();
        let first = repo.create_commit("Add file", &[("x.txt", "old line\n")]);
        let second = repo.create_commit("Change file", &[("x.txt", "new line\n")]);

        let query = GitPatchQuery::new(&repo.path);
        let range = range_between(first, second);
        let text = query
            .patch(&request(&range, "x.txt", true))
            .await
            .unwrap()
            .expect("expected a patch");

        assert!(text.contains("-old line"));
        assert!(text.contains("+new line"));
    }

    #[tokio::test]
    async fn test_unchanged_file_yields_none() {
        let repo = TestRepo::with_initial_commit();
        let first = repo.create_commit("Add file", &[("x.txt", "same\n")]);
        let second = repo.create_commit("Other file", &[("y.txt", "other\n")]);

        let query = GitPatchQuery::new(&repo.path);
        let range = range_between(first, second);
        let result = query.patch(&request(&range, "x.txt", true)).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_rename_is_detected_under_both_pathspecs() {
        let repo = TestRepo::with_initial_commit();
        let content = "line one\nline two\nline three\nline four\n";
        let first = repo.create_commit("Add old", &[("old.txt", content)]);
        let second = repo.commit_rename("old.txt", "new.txt", "Rename file");

        let query = GitPatchQuery::new(&repo.path);
        let range = range_between(first, second);
        let mut req = request(&range, "new.txt", true);
        req.old_path = Some("old.txt".to_string());

        let text = query
            .patch(&req)
            .await
            .unwrap()
            .expect("expected a rename patch");

        assert!(text.contains("old.txt"));
        assert!(text.contains("new.txt"));
    }

    #[tokio::test]
    async fn test_untracked_file_patch_from_working_tree() {
        let repo = TestRepo::with_initial_commit();
        repo.create_file("fresh.txt", "hello untracked\n");

        let query = GitPatchQuery::new(&repo.path);
        let range = RevisionRange {
            base: None,
            target: None,
            args: DiffMode::WorkingTree.args(),
        };
        let text = query
            .patch(&request(&range, "fresh.txt", false))
            .await
            .unwrap()
            .expect("expected an untracked patch");

        assert!(text.contains("+hello untracked"));
    }

    #[tokio::test]
    async fn test_missing_path_yields_none() {
        let repo = TestRepo::with_initial_commit();
        let first = repo.create_commit("A", &[("a.txt", "a\n")]);
        let second = repo.create_commit("B", &[("b.txt", "b\n")]);

        let query = GitPatchQuery::new(&repo.path);
        let range = range_between(first, second);
        let result = query
            .patch(&request(&range, "does-not-exist.txt", false))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_bad_revision_is_an_error() {
        let repo = TestRepo::with_initial_commit();
        let query = GitPatchQuery::new(&repo.path);

        let range = RevisionRange {
            base: Some("not-a-revision".to_string()),
            target: Some("also-bad".to_string()),
            args: DiffMode::SelectedPair.args(),
        };
        let result = query.patch(&request(&range, "x.txt", true)).await;

        assert!(result.is_err());
    }
}
