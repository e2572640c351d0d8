use serde_json::Value;

use crate::{domain::step::StepDescriptor, PipelineValue};

/// The value a caller should present as the chain's final result
///
/// An empty chain yields the initial input. Otherwise the last step's output
/// counts as long as it recorded no error; a disabled last step carries its
/// pass-through input there. A failed or skipped last step yields empty text.
pub fn final_output(initial_input: &str, annotated: &[StepDescriptor]) -> PipelineValue {
    match annotated.last() {
        None => PipelineValue::text(initial_input),
        Some(last) if !last.has_error() => last
            .output
            .clone()
            .unwrap_or_else(|| PipelineValue::text("")),
        Some(_) => PipelineValue::text(""),
    }
}

/// `final_output` rendered for display; a missing value shows as empty text
pub fn render_final_output(initial_input: &str, annotated: &[StepDescriptor]) -> String {
    match final_output(initial_input, annotated) {
        PipelineValue::Structured(Value::Null) => String::new(),
        value => value.render(),
    }
}

/// The first recorded error in an annotated chain
pub fn first_error(annotated: &[StepDescriptor]) -> Option<(&StepDescriptor, &str)> {
    annotated
        .iter()
        .find_map(|s| s.error.as_deref().map(|e| (s, e)))
}
