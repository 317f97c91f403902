//! Shared domain types passed across the document-source boundary.

use serde::Serialize;

/// A document returned by a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// The source's canonical title, which may differ from the queried term.
    pub title: String,
    /// Plain-text summary, untruncated.
    pub summary: String,
    /// Fully-qualified link to the full document.
    pub url: String,
}

/// Outcome of a single `DocumentSource::lookup` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupResult {
    Found(Document),
    /// Every addressing variant was tried and none exists.
    NotFound { term: String },
    /// The source never became ready.
    SourceUnavailable,
    /// A lookup attempt failed in transit.
    SourceError { message: String },
}

impl LookupResult {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            LookupResult::Found(_) => "found",
            LookupResult::NotFound { .. } => "not_found",
            LookupResult::SourceUnavailable => "unavailable",
            LookupResult::SourceError { .. } => "error",
        }
    }
}
