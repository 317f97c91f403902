use thiserror::Error;

/// Top-level error type for NamiBot.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for NamiError` so that `?` works across crate
/// boundaries in the binary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NamiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Document source error: {0}")]
    Source(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for NamiError {
    fn from(err: toml::de::Error) -> Self {
        NamiError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for NamiError {
    fn from(err: toml::ser::Error) -> Self {
        NamiError::Config(err.to_string())
    }
}

/// A specialized `Result` type for NamiBot operations.
pub type Result<T> = std::result::Result<T, NamiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let cases: Vec<(NamiError, &str)> = vec![
            (
                NamiError::Config("missing field".to_string()),
                "Configuration error: missing field",
            ),
            (
                NamiError::Source("agent build failed".to_string()),
                "Document source error: agent build failed",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let nami_err: NamiError = io_err.into();
        assert!(matches!(nami_err, NamiError::Io(_)));
        assert!(nami_err.to_string().starts_with("I/O error:"));
        assert!(nami_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let err: std::result::Result<toml::Value, _> = toml::from_str("invalid = [[[");
        let nami_err: NamiError = err.unwrap_err().into();
        assert!(matches!(nami_err, NamiError::Config(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let value = io_result?;
            Ok(value.to_string())
        }

        assert_eq!(inner().unwrap(), "42");
    }
}
