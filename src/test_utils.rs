//! Test utilities for creating temporary git repositories

#![cfg(test)]

use std::path::PathBuf;
use tempfile::TempDir;

/// A temporary git repository for testing
pub struct TestRepo {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    /// Create a new empty git repository
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().to_path_buf();

        let repo = git2::Repository::init(&path).expect("Failed to init repo");

        let mut config = repo.config().expect("Failed to get config");
        config
            .set_str("user.name", "Test User")
            .expect("Failed to set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Failed to set user.email");

        Self { dir, path }
    }

    /// Create a repository with an initial commit
    pub fn with_initial_commit() -> Self {
        let test_repo = Self::new();
        test_repo.create_commit("Initial commit", &[("README.md", "# Test Repo")]);
        test_repo
    }

    /// Get the git2 repository
    pub fn repo(&self) -> git2::Repository {
        git2::Repository::open(&self.path).expect("Failed to open repo")
    }

    /// Create a file with content
    pub fn create_file(&self, name: &str, content: &str) {
        let file_path = self.path.join(name);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Stage a file
    pub fn stage_file(&self, name: &str) {
        let repo = self.repo();
        let mut index = repo.index().expect("Failed to get index");
        index
            .add_path(std::path::Path::new(name))
            .expect("Failed to stage file");
        index.write().expect("Failed to write index");
    }

    /// Create a commit with the given files
    pub fn create_commit(&self, message: &str, files: &[(&str, &str)]) -> git2::Oid {
        let repo = self.repo();

        for (name, content) in files {
            self.create_file(name, content);
            self.stage_file(name);
        }

        let mut index = repo.index().expect("Failed to get index");
        let tree_oid = index.write_tree().expect("Failed to write tree");
        let tree = repo.find_tree(tree_oid).expect("Failed to find tree");
        let sig = repo.signature().expect("Failed to get signature");

        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.as_ref().into_iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Commit a rename of `old_name` to `new_name`, content unchanged
    pub fn commit_rename(&self, old_name: &str, new_name: &str, message: &str) -> git2::Oid {
        let repo = self.repo();

        let old_path = self.path.join(old_name);
        let content = std::fs::read(&old_path).expect("Failed to read old file");
        std::fs::remove_file(&old_path).expect("Failed to remove old file");
        std::fs::write(self.path.join(new_name), &content).expect("Failed to write new file");

        let mut index = repo.index().expect("Failed to get index");
        index
            .remove_path(std::path::Path::new(old_name))
            .expect("Failed to unstage old file");
        index
            .add_path(std::path::Path::new(new_name))
            .expect("Failed to stage new file");
        index.write().expect("Failed to write index");

        let tree_oid = index.write_tree().expect("Failed to write tree");
        let tree = repo.find_tree(tree_oid).expect("Failed to find tree");
        let sig = repo.signature().expect("Failed to get signature");
        let parent = repo
            .head()
            .expect("Failed to get HEAD")
            .peel_to_commit()
            .expect("Failed to get commit");

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])
            .expect("Failed to create commit")
    }

    /// Initialize an independent, committed git repository in a
    /// subdirectory. The outer repository sees it as an untracked path.
    pub fn init_nested_repo(&self, name: &str) -> git2::Oid {
        let nested_path = self.path.join(name);
        std::fs::create_dir_all(&nested_path).expect("Failed to create nested dir");

        let nested = git2::Repository::init(&nested_path).expect("Failed to init nested repo");
        let mut config = nested.config().expect("Failed to get config");
        config
            .set_str("user.name", "Nested User")
            .expect("Failed to set user.name");
        config
            .set_str("user.email", "nested@example.com")
            .expect("Failed to set user.email");

        std::fs::write(nested_path.join("inner.txt"), "inner content\n")
            .expect("Failed to write nested file");

        let mut index = nested.index().expect("Failed to get index");
        index
            .add_path(std::path::Path::new("inner.txt"))
            .expect("Failed to stage nested file");
        index.write().expect("Failed to write index");

        let tree_oid = index.write_tree().expect("Failed to write tree");
        let tree = nested.find_tree(tree_oid).expect("Failed to find tree");
        let sig = nested.signature().expect("Failed to get signature");

        nested
            .commit(Some("HEAD"), &sig, &sig, "Nested initial commit", &tree, &[])
            .expect("Failed to commit in nested repo")
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_repo() {
        let repo = TestRepo::new();
        assert!(repo.path.exists());
        assert!(repo.path.join(".git").exists());
    }

    #[test]
    fn test_create_commit() {
        let repo = TestRepo::with_initial_commit();
        let git_repo = repo.repo();
        let head = git_repo.head().expect("No HEAD");
        assert!(head.target().is_some());
    }

    #[test]
    fn test_init_nested_repo_is_untracked_in_outer() {
        let repo = TestRepo::with_initial_commit();
        repo.init_nested_repo("mod");

        assert!(repo.path.join("mod").join(".git").exists());

        let outer = repo.repo();
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true);
        let statuses = outer.statuses(Some(&mut opts)).expect("statuses");
        let entry = statuses
            .iter()
            .find(|s| s.path() == Some("mod/"))
            .or_else(|| statuses.iter().find(|s| s.path() == Some("mod")));
        assert!(entry.is_some(), "nested repo should show as untracked");
    }
}
