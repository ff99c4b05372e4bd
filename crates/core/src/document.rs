use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A request to draft a new legal document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftRequest {
    /// Plain-language description of the document to produce.
    pub prompt: String,
    /// Target legal territory, e.g. "California" or "US Federal".
    pub jurisdiction: String,
    /// Document category ("nda", "employment", ...). Inferred from the
    /// generated text when absent.
    #[serde(default)]
    pub document_type: Option<String>,
}

/// Metadata attached to every generated draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftMetadata {
    pub model: String,
    pub timestamp: DateTime<Utc>,
    pub jurisdiction: String,
    pub document_type: String,
}
