//! git2-backed implementations of the external collaborators

pub mod changed_files;
pub mod content;
pub mod patch_query;
pub mod subrepo;

pub use changed_files::changed_files;
pub use content::{load_object_content, load_revision_content};
pub use patch_query::GitPatchQuery;
pub use subrepo::{spawn_submodule_status, GitSubrepoProbe};
