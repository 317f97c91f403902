//! Error types for the conversational core.
//!
//! Only engine construction can fail. Once built, `respond` is total and
//! lookup failures travel as `LookupResult` values.

use nami_core::NamiError;

/// Errors raised while assembling a `ResponseEngine`.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("invalid intent pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("'{0}' has no reply templates")]
    EmptyTemplates(String),
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

impl From<ChatError> for NamiError {
    fn from(err: ChatError) -> Self {
        NamiError::Config(err.to_string())
    }
}
