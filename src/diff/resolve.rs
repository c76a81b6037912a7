//! Resolve an ordered revision selection into a comparison range

use crate::error::{Result, SeadiffError};
use crate::models::{DiffMode, Revision, RevisionRange};

/// Resolve which two revisions to compare.
///
/// The selection is ordered: element 0 is the most recently selected
/// revision. An empty selection resolves to `Ok(None)` — nothing to compare,
/// callers treat it as a no-op. A selection count incompatible with `mode`
/// is a descriptive, non-fatal `SelectionMismatch`.
pub fn resolve_selection(
    selection: &[Revision],
    mode: DiffMode,
) -> Result<Option<RevisionRange>> {
    let expected = mode.required_selections();

    let range = match (selection.len(), expected) {
        (0, _) => return Ok(None),
        // Single selection: diff the revision against its parent. The parent
        // may be absent, which leaves the range without a baseline.
        (1, 1) => RevisionRange {
            base: selection[0].parent_id.clone(),
            target: Some(selection[0].id.clone()),
            args: mode.args(),
        },
        // Pair selection: element 1 was picked first and becomes the base.
        // Entries beyond the first two are ignored.
        (n, 2) if n >= 2 => RevisionRange {
            base: Some(selection[1].id.clone()),
            target: Some(selection[0].id.clone()),
            args: mode.args(),
        },
        (actual, expected) => {
            return Err(SeadiffError::SelectionMismatch { expected, actual })
        }
    };

    tracing::debug!(
        base = range.base.as_deref().unwrap_or("<none>"),
        target = range.target.as_deref().unwrap_or("<none>"),
        "Resolved revision selection"
    );
    Ok(Some(range))
}
