//! # Textflow DSL
//!
//! A small YAML/JSON document format for saving and sharing pipelines: a
//! name, the initial input, and the ordered steps with their options.
//!
//! ## Example
//!
//! ```
//! use textflow_dsl::parse_pipeline_yaml;
//!
//! let yaml = r#"
//! version: "1.0"
//! name: shout-greeting
//! input: '{"greeting":"hello"}'
//! steps:
//!   - id: parse
//!     type: json_parse
//!   - id: pick
//!     type: select_field
//!     options: { path: greeting }
//!   - id: shout
//!     type: case
//!     options: { transform: uppercase }
//! "#;
//!
//! let document = parse_pipeline_yaml(yaml).unwrap();
//! assert_eq!(document.steps.len(), 3);
//! ```

mod error;
mod parser;

pub mod document;
pub mod validation;

pub use document::{PipelineDocument, StepDefinition, CURRENT_VERSION};
pub use error::DslError;
pub use validation::ValidationError;

use tracing::info;

/// Parse and validate a pipeline document written in YAML.
///
/// Steps without an id are given a generated one here.
///
/// # Errors
///
/// * Invalid YAML syntax or missing required fields
/// * Unsupported document version
/// * Validation errors (duplicate ids, unknown step types, bad options)
///
/// ```
/// use textflow_dsl::parse_pipeline_yaml;
///
/// let yaml = r#"
/// version: "1.0"
/// name: broken
/// steps:
///   - type: rot13
/// "#;
///
/// let error = parse_pipeline_yaml(yaml).unwrap_err();
/// assert!(error.error_code().contains("UNKNOWN_STEP_TYPE"));
/// ```
pub fn parse_pipeline_yaml(yaml_str: &str) -> Result<PipelineDocument, DslError> {
    let mut document = parser::parse_yaml_document(yaml_str)?;
    validation::validate_document(&document)?;
    document.assign_missing_ids();
    info!(name = %document.name, steps = document.steps.len(), "Loaded pipeline document");
    Ok(document)
}

/// Parse and validate a pipeline document written in JSON.
pub fn parse_pipeline_json(json_str: &str) -> Result<PipelineDocument, DslError> {
    let mut document = parser::parse_json_document(json_str)?;
    validation::validate_document(&document)?;
    document.assign_missing_ids();
    info!(name = %document.name, steps = document.steps.len(), "Loaded pipeline document");
    Ok(document)
}

/// Serialize a document to YAML
pub fn to_yaml(document: &PipelineDocument) -> Result<String, DslError> {
    Ok(serde_yaml::to_string(document)?)
}

/// Serialize a document to pretty-printed JSON
pub fn to_json(document: &PipelineDocument) -> Result<String, DslError> {
    Ok(serde_json::to_string_pretty(document)?)
}
