use serde::{Deserialize, Serialize};
use serde_json::Value;
use textflow_core::{Chain, StepDescriptor, StepId, StepKind};

/// The only document version currently understood
pub const CURRENT_VERSION: &str = "1.0";

/// A named pipeline with its initial input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineDocument {
    /// The document version (e.g., "1.0")
    pub version: String,

    /// Name the caller saves the pipeline under
    pub name: String,

    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Initial input fed to the first step
    #[serde(default)]
    pub input: String,

    /// Steps in evaluation order
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
}

/// A step as written in a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDefinition {
    /// Step identity; generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Kind identifier such as `json_parse`
    #[serde(rename = "type")]
    pub type_name: String,

    /// Kind-specific options
    #[serde(default, skip_serializing_if = "is_empty_options")]
    pub options: Value,

    /// Disabled steps pass their input through
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

fn is_empty_options(options: &Value) -> bool {
    match options {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

impl StepDefinition {
    /// The typed kind this definition describes
    pub fn kind(&self) -> StepKind {
        StepKind::from_parts(&self.type_name, self.options.clone())
    }

    /// Convert into a descriptor, generating an id if none was given
    pub fn to_descriptor(&self) -> StepDescriptor {
        let id = self
            .id
            .clone()
            .map(StepId)
            .unwrap_or_else(StepId::generate);
        StepDescriptor::with_id(id, self.kind()).enabled(self.enabled)
    }
}

impl From<&StepDescriptor> for StepDefinition {
    fn from(step: &StepDescriptor) -> Self {
        let (type_name, options) = step.kind.to_parts();
        Self {
            id: Some(step.id.0.clone()),
            type_name,
            options,
            enabled: step.enabled,
        }
    }
}

impl PipelineDocument {
    /// Create a document from a chain; evaluation results are not saved
    pub fn from_chain(name: impl Into<String>, input: impl Into<String>, steps: &[StepDescriptor]) -> Self {
        Self {
            version: CURRENT_VERSION.to_string(),
            name: name.into(),
            description: None,
            input: input.into(),
            steps: steps.iter().map(StepDefinition::from).collect(),
        }
    }

    /// Give every step without an id a generated one, so that repeated
    /// `to_chain` calls address the same steps
    pub fn assign_missing_ids(&mut self) {
        for step in self.steps.iter_mut().filter(|step| step.id.is_none()) {
            step.id = Some(StepId::generate().0);
        }
    }

    /// Build the chain described by this document
    pub fn to_chain(&self) -> Chain {
        self.steps.iter().map(StepDefinition::to_descriptor).collect()
    }
}
