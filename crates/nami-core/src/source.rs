//! The document-source capability the conversation engine depends on.

use crate::types::LookupResult;

/// Anything that can resolve a search term to a document.
///
/// Implementations own their addressing scheme (casing variants, redirects)
/// and their transport timeouts. `lookup` never panics on network faults;
/// failures come back as `LookupResult` variants.
pub trait DocumentSource: Send {
    fn lookup(&self, term: &str) -> LookupResult;

    /// Human-readable name, used in logs.
    fn name(&self) -> &str {
        "document-source"
    }
}

/// Stand-in for a source that failed to initialise or was switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableSource;

impl DocumentSource for UnavailableSource {
    fn lookup(&self, _term: &str) -> LookupResult {
        LookupResult::SourceUnavailable
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}

impl<S: DocumentSource + Sync + ?Sized> DocumentSource for std::sync::Arc<S> {
    fn lookup(&self, term: &str) -> LookupResult {
        (**self).lookup(term)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
