use crate::document::{PipelineDocument, CURRENT_VERSION};
use crate::error::DslError;

/// Parse a YAML string into a PipelineDocument.
///
/// Only the version is checked here; everything else is left to the
/// validation module.
pub fn parse_yaml_document(yaml_str: &str) -> Result<PipelineDocument, DslError> {
    let document: PipelineDocument = serde_yaml::from_str(yaml_str)?;
    check_version(document)
}

/// Parse a JSON string into a PipelineDocument.
pub fn parse_json_document(json_str: &str) -> Result<PipelineDocument, DslError> {
    let document: PipelineDocument = serde_json::from_str(json_str)?;
    check_version(document)
}

fn check_version(document: PipelineDocument) -> Result<PipelineDocument, DslError> {
    if document.version != CURRENT_VERSION {
        return Err(DslError::UnsupportedVersion(document.version));
    }
    Ok(document)
}
