//! Clip and pastebook records as the backend serializes them.
//!
//! The front-end never mints these: every id is backend-assigned and every
//! record arrives over the bridge. The structs here only have to agree with
//! the backend's wire shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A captured text clip held in the per-window cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub id: String,
    pub content: String,
    pub metadata: ClipMetadata,
}

/// Capture metadata attached to a clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipMetadata {
    pub timestamp: DateTime<Utc>,
    pub source_app: String,
    pub window_title: String,
}

/// The active pastebook pointer as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pastebook {
    pub id: String,
    pub name: String,
}

/// One pastebook list row.
///
/// The backend reports the list as `(id, name, count)` triples; the serde
/// round-trip keeps that wire shape while the rest of the code gets named
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String, usize)", into = "(String, String, usize)")]
pub struct PastebookSummary {
    pub id: String,
    pub name: String,
    pub count: usize,
}

impl From<(String, String, usize)> for PastebookSummary {
    fn from((id, name, count): (String, String, usize)) -> Self {
        Self { id, name, count }
    }
}

impl From<PastebookSummary> for (String, String, usize) {
    fn from(value: PastebookSummary) -> Self {
        (value.id, value.name, value.count)
    }
}
