//! Nested-repository probe and status computation

use std::path::{Path, PathBuf};

use crate::diff::retrieve::{SubmoduleStatusTask, SubrepoProbe};
use crate::models::SubmoduleStatus;

/// Filesystem probe for nested repositories backed by git2
pub struct GitSubrepoProbe {
    repo_path: PathBuf,
}

impl GitSubrepoProbe {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }
}

impl SubrepoProbe for GitSubrepoProbe {
    fn is_repo_root(&self, path: &str) -> bool {
        let full_path = self.repo_path.join(path);
        full_path.is_dir() && git2::Repository::open(&full_path).is_ok()
    }

    fn status_text(&self, path: &str) -> String {
        let full_path = self.repo_path.join(path);
        match describe_nested_repo(&full_path, path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(path, %err, "Failed to describe nested repository");
                format!("Nested repository at {path}")
            }
        }
    }
}

fn describe_nested_repo(full_path: &Path, path: &str) -> crate::error::Result<String> {
    let repo = git2::Repository::open(full_path)?;

    let head = match repo.head() {
        Ok(head) => {
            let oid = head
                .target()
                .map(|oid| oid.to_string()[..7].to_string())
                .unwrap_or_else(|| "<none>".to_string());
            let branch = head.shorthand().unwrap_or("HEAD").to_string();
            format!("HEAD {oid} on {branch}")
        }
        Err(_) => "no commits yet".to_string(),
    };

    let mut opts = git2::StatusOptions::new();
    opts.include_untracked(true);
    let dirty = repo
        .statuses(Some(&mut opts))
        .map(|statuses| statuses.iter().any(|entry| !entry.status().is_empty()))
        .unwrap_or(false);

    let cleanliness = if dirty { "dirty" } else { "clean" };
    Ok(format!("Nested repository at {path} ({head}, {cleanliness})"))
}

/// Start the asynchronous nested-repository status computation.
///
/// Compares the pointer recorded in the superproject index with the
/// submodule's checked-out HEAD. Yields `None` when the path is not a
/// registered submodule.
pub fn spawn_submodule_status(
    repo_path: impl Into<PathBuf>,
    submodule_path: impl Into<String>,
) -> SubmoduleStatusTask {
    let repo_path = repo_path.into();
    let submodule_path = submodule_path.into();

    tokio::task::spawn_blocking(move || {
        let repo = git2::Repository::open(&repo_path).ok()?;
        let submodule = repo.find_submodule(&submodule_path).ok()?;

        let recorded = submodule.index_id().map(|oid| oid.to_string());

        let (checked_out, is_dirty) = match submodule.open() {
            Ok(sub_repo) => {
                let head = sub_repo
                    .head()
                    .ok()
                    .and_then(|h| h.target())
                    .map(|oid| oid.to_string());
                let mut opts = git2::StatusOptions::new();
                opts.include_untracked(true);
                let dirty = sub_repo
                    .statuses(Some(&mut opts))
                    .map(|statuses| statuses.iter().any(|entry| !entry.status().is_empty()))
                    .unwrap_or(false);
                (head, dirty)
            }
            Err(_) => (None, false),
        };

        Some(SubmoduleStatus::new(
            submodule_path,
            recorded,
            checked_out,
            is_dirty,
        ))
    })
}
