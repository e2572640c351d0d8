use crate::document::PipelineDocument;
use crate::error::DslError;
use std::error::Error;
use std::fmt;

mod step_validator;

/// Represents a validation error found in a pipeline document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code (should be a constant identifier)
    pub code: &'static str,

    /// Human-readable error message
    pub message: String,

    /// Optional path to the location of the error (e.g., "steps[2]")
    pub path: Option<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl Error for ValidationError {}

/// Validation error codes
pub mod error_codes {
    /// Duplicate step ID found
    pub const DUPLICATE_ID: &str = "ERR_DSL_VALIDATION_DUPLICATE_ID";

    /// Missing or empty required field
    pub const MISSING_REQUIRED_FIELD: &str = "ERR_DSL_VALIDATION_MISSING_REQUIRED_FIELD";

    /// Step type outside the supported set
    pub const UNKNOWN_STEP_TYPE: &str = "ERR_DSL_VALIDATION_UNKNOWN_STEP_TYPE";

    /// Invalid configuration value
    pub const INVALID_CONFIG: &str = "ERR_DSL_VALIDATION_INVALID_CONFIG";
}

/// A trait for validators that check specific aspects of a document
pub trait Validator {
    /// Validate the document and return a list of validation errors (if any)
    fn validate(&self, document: &PipelineDocument) -> Vec<ValidationError>;
}

/// Checks document-level fields
struct DocumentValidator;

impl Validator for DocumentValidator {
    fn validate(&self, document: &PipelineDocument) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if document.name.trim().is_empty() {
            errors.push(ValidationError {
                code: error_codes::MISSING_REQUIRED_FIELD,
                message: "Pipeline name must not be empty".to_string(),
                path: Some("name".to_string()),
            });
        }
        errors
    }
}

/// Validate a parsed pipeline document
pub fn validate_document(document: &PipelineDocument) -> Result<(), DslError> {
    let validators: Vec<Box<dyn Validator>> = vec![
        Box::new(DocumentValidator),
        Box::new(step_validator::StepValidator::new()),
    ];

    // Run all validators and collect errors
    let errors: Vec<ValidationError> = validators
        .iter()
        .flat_map(|validator| validator.validate(document))
        .collect();

    if !errors.is_empty() {
        return Err(DslError::from_validation_errors(errors));
    }

    Ok(())
}
