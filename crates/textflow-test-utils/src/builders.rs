//! Fluent builders for test chains.

use serde_json::Value;
use textflow_core::{
    CaseOptions, CaseTransform, EscapeFormat, EscapeMode, EscapeOptions, MinifyOptions,
    MinifyType, SelectFieldOptions, StepDescriptor, StepKind, XmlFormatOptions, XmlIndent,
};

/// Builds a chain with predictable ids (`step-1`, `step-2`, ...)
#[derive(Debug, Default, Clone)]
pub struct ChainBuilder {
    steps: Vec<StepDescriptor>,
}

impl ChainBuilder {
    /// Start an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step of any kind
    pub fn step(mut self, kind: StepKind) -> Self {
        let id = format!("step-{}", self.steps.len() + 1);
        self.steps.push(StepDescriptor::with_id(id, kind));
        self
    }

    /// Append a step from a wire name and raw options
    pub fn raw(self, type_name: &str, options: Value) -> Self {
        self.step(StepKind::from_parts(type_name, options))
    }

    pub fn case(self, transform: CaseTransform) -> Self {
        self.step(StepKind::Case(CaseOptions { transform }))
    }

    pub fn escape(self, mode: EscapeMode, format: EscapeFormat) -> Self {
        self.step(StepKind::Escape(EscapeOptions { mode, format }))
    }

    pub fn minify(self, kind: MinifyType) -> Self {
        self.step(StepKind::Minify(MinifyOptions { kind }))
    }

    pub fn json_parse(self) -> Self {
        self.step(StepKind::JsonParse)
    }

    pub fn xml_format(self, indent: XmlIndent) -> Self {
        self.step(StepKind::XmlFormat(XmlFormatOptions { indent }))
    }

    pub fn select_field(self, path: &str) -> Self {
        self.step(StepKind::SelectField(SelectFieldOptions {
            path: path.to_string(),
        }))
    }

    pub fn stringify(self) -> Self {
        self.step(StepKind::Stringify)
    }

    /// Disable the most recently added step
    pub fn disabled(mut self) -> Self {
        if let Some(last) = self.steps.last_mut() {
            last.enabled = false;
        }
        self
    }

    /// Finish the chain
    pub fn build(self) -> Vec<StepDescriptor> {
        self.steps
    }
}
