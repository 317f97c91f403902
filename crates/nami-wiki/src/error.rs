use nami_core::{LookupResult, NamiError};
use thiserror::Error;

/// Failures talking to the MediaWiki API.
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("invalid source configuration: {0}")]
    InvalidConfig(String),

    #[error("Wikipedia returned HTTP {status}")]
    Status { status: u16 },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("API error {code}: {info}")]
    Api { code: String, info: String },
}

impl From<ureq::Error> for WikiError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, _) => WikiError::Status { status },
            ureq::Error::Transport(transport) => WikiError::Transport(transport.to_string()),
        }
    }
}

impl From<serde_json::Error> for WikiError {
    fn from(err: serde_json::Error) -> Self {
        WikiError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for WikiError {
    fn from(err: std::io::Error) -> Self {
        WikiError::Decode(err.to_string())
    }
}

impl From<WikiError> for NamiError {
    fn from(err: WikiError) -> Self {
        NamiError::Source(err.to_string())
    }
}

impl From<WikiError> for LookupResult {
    fn from(err: WikiError) -> Self {
        LookupResult::SourceError {
            message: err.to_string(),
        }
    }
}
