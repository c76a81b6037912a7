//! Deferred presentation of a single file's diff

use std::fmt;
use std::sync::Arc;

use encoding_rs::Encoding;

use crate::diff::resolve::resolve_selection;
use crate::diff::retrieve::{
    retrieve_file_diff, PatchQuery, SubmoduleStatusTask, SubrepoProbe,
};
use crate::error::{Result, SeadiffError};
use crate::models::{DiffMode, Revision, RevisionRange, StatusEntry};

/// What the presentation surface should render
pub enum DisplayInstruction {
    /// Nothing selected; render nothing
    Nothing,
    /// Show a tree object's content directly, no diff
    ObjectContent { object_id: String },
    /// Show a single revision's content for a path directly, no diff
    RevisionContent { revision: String, path: String },
    /// Invoke the producer when ready to render
    Deferred(PatchProducer),
}

impl fmt::Debug for DisplayInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayInstruction::Nothing => write!(f, "Nothing"),
            DisplayInstruction::ObjectContent { object_id } => {
                write!(f, "ObjectContent({object_id})")
            }
            DisplayInstruction::RevisionContent { revision, path } => {
                write!(f, "RevisionContent({revision}, {path})")
            }
            DisplayInstruction::Deferred(producer) => {
                write!(f, "Deferred({})", producer.entry.path)
            }
        }
    }
}

/// A lazily evaluated patch producer.
///
/// Carries everything a retrieval needs but performs no work until the
/// surface calls [`produce`](Self::produce). Producers superseded by a newer
/// selection are simply dropped and never cost a query.
pub struct PatchProducer {
    range: RevisionRange,
    entry: StatusEntry,
    encoding: &'static Encoding,
    default_text: String,
    query: Arc<dyn PatchQuery>,
    probe: Arc<dyn SubrepoProbe>,
    pending_status: Option<SubmoduleStatusTask>,
}

impl PatchProducer {
    /// Run the retrieval and flatten to display text. An empty result is
    /// substituted with the default text; failures carry the original error
    /// chain across the deferred boundary.
    pub async fn produce(self) -> Result<String> {
        let path = self.entry.path.clone();
        let outcome = retrieve_file_diff(
            &self.range,
            &self.entry,
            self.encoding,
            self.query.as_ref(),
            self.probe.as_ref(),
            self.pending_status,
        )
        .await;

        match outcome {
            Ok(output) => Ok(output.into_text(self.default_text)),
            Err(source) => Err(SeadiffError::DeferredLoad {
                path,
                source: Box::new(source),
            }),
        }
    }
}

/// Orchestrates resolution and retrieval for a single file
pub struct DiffPresenter {
    query: Arc<dyn PatchQuery>,
    probe: Arc<dyn SubrepoProbe>,
}

impl DiffPresenter {
    pub fn new(query: Arc<dyn PatchQuery>, probe: Arc<dyn SubrepoProbe>) -> Self {
        Self { query, probe }
    }

    /// Resolve the selection and decide how the file should be displayed.
    ///
    /// Expensive retrieval is deferred behind a [`PatchProducer`]; only the
    /// producer the surface actually invokes performs work.
    pub fn present(
        &self,
        selection: &[Revision],
        mode: DiffMode,
        entry: &StatusEntry,
        encoding: &'static Encoding,
        default_text: &str,
        pending_status: Option<SubmoduleStatusTask>,
    ) -> Result<DisplayInstruction> {
        let Some(range) = resolve_selection(selection, mode)? else {
            return Ok(DisplayInstruction::Nothing);
        };

        if range.base.is_none() {
            // No baseline: show content directly instead of a two-sided diff
            if let Some(object_id) = &entry.tree_object_id {
                return Ok(DisplayInstruction::ObjectContent {
                    object_id: object_id.clone(),
                });
            }
            let revision = match range.target.as_deref() {
                Some(target) if !target.is_empty() => target.to_string(),
                _ => {
                    return Err(SeadiffError::InvalidState(format!(
                        "no baseline and no tree object for '{}', yet no target revision either",
                        entry.path
                    )))
                }
            };
            return Ok(DisplayInstruction::RevisionContent {
                revision,
                path: entry.path.clone(),
            });
        }

        tracing::debug!(path = %entry.path, "Deferring patch retrieval");
        Ok(DisplayInstruction::Deferred(PatchProducer {
            range,
            entry: entry.clone(),
            encoding,
            default_text: default_text.to_string(),
            query: Arc::clone(&self.query),
            probe: Arc::clone(&self.probe),
            pending_status,
        }))
    }
}
