//! Task records extracted from vault documents.
//!
//! Records are rebuilt from scratch on every reconciliation pass; nothing is
//! persisted as an object. Only the identifier token embedded in document
//! text survives across passes, which is why reconciliation must be
//! idempotent over it.

use serde::{Deserialize, Serialize};

use crate::schedule::{RawDuration, TimeOfDay};

/// Marker glyph that introduces an embedded identifier token.
pub const ID_MARKER: &str = "🆔";

/// A single actionable line item extracted from a markdown document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Vault-relative path of the owning document.
    pub path: String,
    /// Zero-based line number at the time of indexing.
    pub line: usize,
    /// Raw description text, excluding the list and checkbox markers.
    pub text: String,
    /// Single-character completion marker from the checkbox.
    pub status: char,
    /// Whether the checkbox marks the task as done.
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<RawDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<RawDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<RawDuration>,
    /// Stable identifier; absent until populated by reconciliation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<TimeOfDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<TimeOfDay>,
}

impl Task {
    /// Build a task record with no schedule metadata.
    pub fn new(
        path: impl Into<String>,
        line: usize,
        text: impl Into<String>,
        status: char,
    ) -> Self {
        Self {
            path: path.into(),
            line,
            text: text.into(),
            status,
            completed: matches!(status, 'x' | 'X'),
            start: None,
            end: None,
            scheduled: None,
            id: None,
            start_time: None,
            end_time: None,
        }
    }

    /// Reconstruct the exact source line as it appears in the document.
    pub fn source_line(&self) -> String {
        format!("- [{}] {}", self.status, self.text)
    }

    /// Whether the raw text already carries an identifier token.
    pub fn has_id_token(&self) -> bool {
        self.text.contains(ID_MARKER)
    }
}
