//!
//! Standard library of transformations for Textflow pipelines
//!
//! Provides one `Transform` per supported step kind and a factory that wires
//! them into a `PipelineEngine`.
//!
//! ```
//! use textflow_core::{StepDescriptor, StepKind, PipelineValue};
//! use serde_json::json;
//!
//! let chain = vec![
//!     StepDescriptor::with_id("parse", StepKind::JsonParse),
//!     StepDescriptor::with_id("pick", StepKind::from_parts("select_field", json!({"path": "a.b[0]"}))),
//! ];
//! let result = textflow_stdlib::evaluate(r#"{"a":{"b":[42,43]}}"#, &chain);
//! assert_eq!(result[1].output, Some(PipelineValue::Structured(json!(42))));
//! ```

use textflow_core::{PipelineEngine, StepDescriptor};

pub mod transforms;

/// Factory module for creating standard transforms
pub mod factory {
    use crate::transforms::{
        CaseConverter, Escaper, FieldSelector, JsonParser, Minifier, Stringifier, XmlFormatter,
    };
    use std::sync::Arc;
    use textflow_core::{PipelineError, StepKind, Transform, TransformFactory};

    /// Creates a transform instance for the step kind.
    pub fn create_transform(kind: &StepKind) -> Result<Arc<dyn Transform>, PipelineError> {
        match kind {
            StepKind::Case(options) => Ok(Arc::new(CaseConverter::new(*options))),
            StepKind::Escape(options) => Ok(Arc::new(Escaper::new(*options))),
            StepKind::Minify(options) => Ok(Arc::new(Minifier::new(*options))),
            StepKind::JsonParse => Ok(Arc::new(JsonParser::new())),
            StepKind::XmlFormat(options) => Ok(Arc::new(XmlFormatter::new(*options))),
            StepKind::SelectField(options) => Ok(Arc::new(FieldSelector::new(options.clone()))),
            StepKind::Stringify => Ok(Arc::new(Stringifier::new())),
            StepKind::Unknown { .. } | StepKind::Misconfigured { .. } => Err(kind
                .resolution_error()
                .unwrap_or_else(|| PipelineError::UnknownKind(kind.type_name().to_string()))),
        }
    }

    /// The factory to hand to `PipelineEngine::new`
    pub fn standard_factory() -> TransformFactory {
        Arc::new(create_transform)
    }
}

/// An engine wired with the standard transforms
pub fn standard_engine() -> PipelineEngine {
    PipelineEngine::new(factory::standard_factory())
}

/// Evaluate a chain with the standard transforms
pub fn evaluate(initial_input: &str, chain: &[StepDescriptor]) -> Vec<StepDescriptor> {
    standard_engine().evaluate(initial_input, chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::create_transform;
    use serde_json::json;
    use textflow_core::{StepKind, ValueType};

    #[test]
    fn test_create_transform() {
        for name in StepKind::TYPE_NAMES {
            let kind = StepKind::from_parts(name, json!({}));
            let transform = create_transform(&kind).unwrap();
            assert_eq!(transform.transform_type(), name);
        }

        // Unknown kind should return an error
        assert!(create_transform(&StepKind::from_parts("Unknown", json!({}))).is_err());
    }

    #[test]
    fn test_input_types() {
        let object_kinds = ["select_field", "stringify"];
        for name in StepKind::TYPE_NAMES {
            let transform = create_transform(&StepKind::from_parts(name, json!({}))).unwrap();
            let expected = if object_kinds.contains(&name) {
                ValueType::Object
            } else {
                ValueType::Text
            };
            assert_eq!(transform.input_type(), expected, "kind {}", name);
        }
    }
}
