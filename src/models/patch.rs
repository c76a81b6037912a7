//! Patch retrieval result

use serde::{Deserialize, Serialize};

/// What a per-file retrieval produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "text")]
pub enum PatchOutput {
    /// Raw textual diff
    Text(String),
    /// Human-readable nested-repository status
    Submodule(String),
    /// No diff producible; not an error
    Empty,
}

impl PatchOutput {
    /// Flatten to display text, substituting `default` for an empty result
    pub fn into_text(self, default: impl Into<String>) -> String {
        match self {
            PatchOutput::Text(text) | PatchOutput::Submodule(text) => text,
            PatchOutput::Empty => default.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PatchOutput::Empty)
    }
}
