use thiserror::Error;

/// Message recorded on every step that follows a failed step
pub const SKIPPED_MESSAGE: &str = "Skipped due to previous error.";

/// Message used when a text-only step receives a structured value
pub const EXPECTED_STRING_MESSAGE: &str = "Input must be a string.";

/// Message used when an object-only step receives text or a scalar
pub const EXPECTED_OBJECT_MESSAGE: &str = "Input must be a JSON object.";

/// Errors produced while evaluating a single pipeline step
///
/// Each variant carries the message that ends up on the step descriptor.
/// None of them abort `evaluate`; they are recorded and evaluation halts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The current value is of the wrong kind for this step
    #[error("{0}")]
    TypeMismatch(String),

    /// A parser rejected the input text
    #[error("{0}")]
    MalformedInput(String),

    /// Step options are missing or unusable
    #[error("{0}")]
    InvalidConfiguration(String),

    /// The descriptor names a kind outside the supported set
    #[error("Unknown step type: {0}")]
    UnknownKind(String),

    /// A preceding step failed, so this one was not evaluated
    #[error("Skipped due to previous error.")]
    Skipped,
}

impl PipelineError {
    /// Type mismatch for steps that need text
    pub fn expected_string() -> Self {
        PipelineError::TypeMismatch(EXPECTED_STRING_MESSAGE.to_string())
    }

    /// Type mismatch for steps that need a JSON object or array
    pub fn expected_object() -> Self {
        PipelineError::TypeMismatch(EXPECTED_OBJECT_MESSAGE.to_string())
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            PipelineError::TypeMismatch(_) => "ERR_PIPELINE_TYPE_MISMATCH",
            PipelineError::MalformedInput(_) => "ERR_PIPELINE_MALFORMED_INPUT",
            PipelineError::InvalidConfiguration(_) => "ERR_PIPELINE_INVALID_CONFIG",
            PipelineError::UnknownKind(_) => "ERR_PIPELINE_UNKNOWN_KIND",
            PipelineError::Skipped => "ERR_PIPELINE_SKIPPED",
        }
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::MalformedInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let errors = vec![
            (PipelineError::expected_string(), "Input must be a string."),
            (PipelineError::expected_object(), "Input must be a JSON object."),
            (PipelineError::MalformedInput("bad".to_string()), "bad"),
            (
                PipelineError::InvalidConfiguration("Path is not specified.".to_string()),
                "Path is not specified.",
            ),
            (PipelineError::UnknownKind("rot13".to_string()), "Unknown step type: rot13"),
            (PipelineError::Skipped, SKIPPED_MESSAGE),
        ];

        for (error, expected_msg) in errors {
            assert_eq!(error.to_string(), expected_msg);
        }
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let error: PipelineError = json_error.into();

        match error {
            PipelineError::MalformedInput(msg) => {
                assert!(msg.contains("key must be a string"));
            }
            _ => panic!("Expected MalformedInput variant"),
        }
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let codes = [
            PipelineError::expected_string().error_code(),
            PipelineError::MalformedInput(String::new()).error_code(),
            PipelineError::InvalidConfiguration(String::new()).error_code(),
            PipelineError::UnknownKind(String::new()).error_code(),
            PipelineError::Skipped.error_code(),
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }
}
