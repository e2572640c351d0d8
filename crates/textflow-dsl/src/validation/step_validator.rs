use std::collections::HashSet;
use textflow_core::StepKind;

use crate::document::{PipelineDocument, StepDefinition};
use crate::validation::{error_codes, ValidationError, Validator};

/// Validates step identities, kinds and options
///
/// Option values that only fail at evaluation, such as an empty
/// `select_field` path, are accepted so draft pipelines load back.
pub struct StepValidator {}

impl StepValidator {
    /// Create a new step validator
    pub fn new() -> Self {
        StepValidator {}
    }

    /// Explicit ids must be non-empty and unique; absent ids are generated later
    fn validate_ids(&self, steps: &[StepDefinition]) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::with_capacity(steps.len());
        let mut reported = HashSet::new();

        for (i, step) in steps.iter().enumerate() {
            let Some(id) = step.id.as_deref() else {
                continue;
            };

            if id.trim().is_empty() {
                errors.push(ValidationError {
                    code: error_codes::MISSING_REQUIRED_FIELD,
                    message: "Step id must not be empty when given".to_string(),
                    path: Some(format!("steps[{}].id", i)),
                });
            } else if !seen.insert(id) && reported.insert(id) {
                errors.push(ValidationError {
                    code: error_codes::DUPLICATE_ID,
                    message: format!(
                        "Duplicate step ID: '{}' - step IDs must be unique within a pipeline",
                        id
                    ),
                    path: Some(format!("steps[{}].id", i)),
                });
            }
        }

        errors
    }

    fn validate_kind(&self, index: usize, step: &StepDefinition) -> Option<ValidationError> {
        let path = Some(format!("steps[{}]", index));
        match step.kind() {
            StepKind::Unknown { type_name, .. } => Some(ValidationError {
                code: error_codes::UNKNOWN_STEP_TYPE,
                message: format!(
                    "Unknown step type '{}', expected one of: {}",
                    type_name,
                    StepKind::TYPE_NAMES.join(", ")
                ),
                path,
            }),
            StepKind::Misconfigured { reason, .. } => Some(ValidationError {
                code: error_codes::INVALID_CONFIG,
                message: format!("Invalid options: {}", reason),
                path,
            }),
            _ => None,
        }
    }
}

impl Default for StepValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for StepValidator {
    fn validate(&self, document: &PipelineDocument) -> Vec<ValidationError> {
        let mut errors = self.validate_ids(&document.steps);
        errors.extend(
            document
                .steps
                .iter()
                .enumerate()
                .filter_map(|(i, step)| self.validate_kind(i, step)),
        );
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(steps: serde_json::Value) -> PipelineDocument {
        serde_json::from_value(json!({
            "version": "1.0",
            "name": "test",
            "steps": steps
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_steps() {
        let document = doc(json!([
            {"id": "a", "type": "json_parse"},
            {"type": "select_field", "options": {"path": "x"}},
            {"type": "stringify"}
        ]));
        assert!(StepValidator::new().validate(&document).is_empty());
    }

    #[test]
    fn test_draft_select_field_is_accepted() {
        let document = doc(json!([
            {"id": "a", "type": "select_field"},
            {"id": "b", "type": "select_field", "options": {"path": ""}}
        ]));
        assert!(StepValidator::new().validate(&document).is_empty());
    }

    #[test]
    fn test_duplicate_ids_reported_once() {
        let document = doc(json!([
            {"id": "a", "type": "json_parse"},
            {"id": "a", "type": "stringify"},
            {"id": "a", "type": "stringify"}
        ]));
        let errors = StepValidator::new().validate(&document);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, error_codes::DUPLICATE_ID);
        assert_eq!(errors[0].path.as_deref(), Some("steps[1].id"));
    }

    #[test]
    fn test_kind_problems() {
        let document = doc(json!([
            {"id": "", "type": "json_parse"},
            {"type": "rot13"},
            {"type": "case", "options": {"transform": "title"}}
        ]));
        let codes: Vec<_> = StepValidator::new()
            .validate(&document)
            .into_iter()
            .map(|e| e.code)
            .collect();
        assert_eq!(
            codes,
            vec![
                error_codes::MISSING_REQUIRED_FIELD,
                error_codes::UNKNOWN_STEP_TYPE,
                error_codes::INVALID_CONFIG,
            ]
        );
    }
}
