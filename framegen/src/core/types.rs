use std::path::PathBuf;

use serde::Serialize;

/// The fixed set of documents a run produces, in write order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Document {
    Prd,
    Claude,
    Planning,
    Tasks,
}

impl Document {
    pub const ALL: [Document; 4] = [
        Document::Prd,
        Document::Claude,
        Document::Planning,
        Document::Tasks,
    ];

    /// Default output file name, also used as the template name.
    pub fn file_name(self) -> &'static str {
        match self {
            Document::Prd => "PRD.md",
            Document::Claude => "CLAUDE.md",
            Document::Planning => "PLANNING.md",
            Document::Tasks => "TASKS.md",
        }
    }

    /// Key under `[outputs]` that overrides the output path.
    pub fn config_key(self) -> &'static str {
        match self {
            Document::Prd => "prd",
            Document::Claude => "claude",
            Document::Planning => "planning",
            Document::Tasks => "tasks",
        }
    }

    pub fn template_name(self) -> &'static str {
        self.file_name()
    }
}

/// A pending write: rendered content and its root-relative target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    pub document: Document,
    pub path: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteStatus {
    Created,
    Updated,
    /// Existing file already had identical content; it was not touched.
    Unchanged,
    /// Dry run: rendered and allowlist-checked, never written.
    Skipped,
}

impl WriteStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            WriteStatus::Created => "created",
            WriteStatus::Updated => "updated",
            WriteStatus::Unchanged => "unchanged",
            WriteStatus::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteResult {
    pub document: Document,
    pub path: PathBuf,
    pub bytes: usize,
    pub status: WriteStatus,
}
