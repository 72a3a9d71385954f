use thiserror::Error;

/// Top-level error type for the Synapse host.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for SynapseError` where they cross crate boundaries,
/// so `?` works from the binary down.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynapseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Script error: {0}")]
    Script(String),

    #[error("Judge error: {0}")]
    Judge(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for SynapseError {
    fn from(err: toml::de::Error) -> Self {
        SynapseError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for SynapseError {
    fn from(err: toml::ser::Error) -> Self {
        SynapseError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SynapseError {
    fn from(err: serde_json::Error) -> Self {
        SynapseError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Synapse operations.
pub type Result<T> = std::result::Result<T, SynapseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let cases: Vec<(SynapseError, &str)> = vec![
            (
                SynapseError::Config("bad key".to_string()),
                "Configuration error: bad key",
            ),
            (
                SynapseError::Script("no prompt".to_string()),
                "Script error: no prompt",
            ),
            (
                SynapseError::Judge("endpoint down".to_string()),
                "Judge error: endpoint down",
            ),
            (
                SynapseError::Api("bind failed".to_string()),
                "API error: bind failed",
            ),
            (
                SynapseError::Serialization("invalid json".to_string()),
                "Serialization error: invalid json",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SynapseError = io_err.into();
        assert!(matches!(err, SynapseError::Io(_)));
        assert!(err.to_string().starts_with("I/O error:"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let err: std::result::Result<toml::Value, _> = toml::from_str("invalid = [[[");
        let err: SynapseError = err.unwrap_err().into();
        assert!(matches!(err, SynapseError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let err: std::result::Result<serde_json::Value, _> = serde_json::from_str("{ nope }");
        let err: SynapseError = err.unwrap_err().into();
        assert!(matches!(err, SynapseError::Serialization(_)));
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
