//! seadiff - revision diff core for a Git GUI client
//!
//! Resolves an ordered revision selection and a comparison mode into a
//! concrete range, then retrieves per-file patch text: raw diffs for
//! ordinary files, pointer status for nested repositories, and direct
//! content when no baseline exists. Retrieval is deferred behind lazy
//! producers so a rendering surface only pays for the diffs it shows.

pub mod diff;
pub mod encoding;
pub mod error;
pub mod git;
pub mod models;

#[cfg(test)]
mod test_utils;

pub use diff::{
    effective_tracked, resolve_selection, retrieve_file_diff, DiffPresenter,
    DisplayInstruction, PatchProducer, PatchQuery, PatchRequest, SubmoduleStatusTask,
    SubrepoProbe,
};
pub use error::{ErrorResponse, Result, SeadiffError};
pub use models::{
    DiffArgs, DiffMode, PatchOutput, Revision, RevisionRange, StatusEntry, SubmoduleChange,
    SubmoduleStatus,
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing for host applications.
///
/// Respects `RUST_LOG`; defaults to debug-level crate logs with libgit2
/// noise filtered down.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seadiff=debug,git2=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
