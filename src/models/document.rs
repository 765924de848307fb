// file: src/models/document.rs
// description: raw fetched document model with content hashing
// reference: internal data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Wikitext,
    Html,
    Json,
}

/// A single fetched text unit (wiki page, HTML page, API record body).
/// Read-only once constructed; everything downstream borrows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    pub title: String,
    pub text: String,
    pub source: SourceKind,
    pub content_hash: String,
    pub size: u64,
    pub fetched_at: DateTime<Utc>,
    pub last_modified: Option<String>,
    pub last_editor: Option<String>,
    pub edit_comment: Option<String>,
}

impl RawDocument {
    pub fn new(title: impl Into<String>, text: impl Into<String>, source: SourceKind) -> Self {
        let title = title.into();
        let text = text.into();
        let content_hash = Self::compute_hash(&text);
        let size = text.len() as u64;

        Self {
            title,
            text,
            source,
            content_hash,
            size,
            fetched_at: Utc::now(),
            last_modified: None,
            last_editor: None,
            edit_comment: None,
        }
    }

    pub fn with_revision(
        mut self,
        last_modified: Option<String>,
        last_editor: Option<String>,
        edit_comment: Option<String>,
    ) -> Self {
        self.last_modified = last_modified;
        self.last_editor = last_editor;
        self.edit_comment = edit_comment;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn compute_hash(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
