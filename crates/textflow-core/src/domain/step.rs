use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{PipelineError, SKIPPED_MESSAGE};
use crate::types::PipelineValue;

/// Value object: Step ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepId(pub String);

impl StepId {
    /// Generate a fresh random step identity
    pub fn generate() -> Self {
        StepId(Uuid::new_v4().to_string())
    }

    /// Borrow the identity as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StepId {
    fn from(s: &str) -> Self {
        StepId(s.to_string())
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Case transform direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseTransform {
    #[default]
    Uppercase,
    Lowercase,
}

/// Options for the `case` kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseOptions {
    pub transform: CaseTransform,
}

/// Escape direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeMode {
    #[default]
    Escape,
    Unescape,
}

/// Escape target syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeFormat {
    #[default]
    Html,
    Uri,
}

/// Options for the `escape` kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EscapeOptions {
    pub mode: EscapeMode,
    pub format: EscapeFormat,
}

/// What the `minify` kind treats its input as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinifyType {
    #[default]
    Json,
    Text,
}

/// Options for the `minify` kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifyOptions {
    #[serde(rename = "type")]
    pub kind: MinifyType,
}

/// Indent unit used by the XML formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum XmlIndent {
    #[default]
    #[serde(rename = "2s")]
    TwoSpaces,
    #[serde(rename = "4s")]
    FourSpaces,
    #[serde(rename = "tab")]
    Tab,
}

impl XmlIndent {
    /// The literal text inserted per nesting level
    pub fn unit(&self) -> &'static str {
        match self {
            XmlIndent::TwoSpaces => "  ",
            XmlIndent::FourSpaces => "    ",
            XmlIndent::Tab => "\t",
        }
    }
}

/// Options for the `xml_parse` kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlFormatOptions {
    pub indent: XmlIndent,
}

/// Options for the `select_field` kind
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectFieldOptions {
    /// Dotted/bracketed path such as `a.b[0]`
    pub path: String,
}

/// The transformation a step performs, with its typed options
///
/// `Unknown` and `Misconfigured` exist so that any descriptor document can be
/// loaded; they fail when evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum StepKind {
    Case(CaseOptions),
    Escape(EscapeOptions),
    Minify(MinifyOptions),
    JsonParse,
    XmlFormat(XmlFormatOptions),
    SelectField(SelectFieldOptions),
    Stringify,
    /// A type name outside the supported set
    Unknown { type_name: String, options: Value },
    /// A known type name whose options did not fit
    Misconfigured {
        type_name: String,
        options: Value,
        reason: String,
    },
}

impl StepKind {
    /// Wire identifiers of every supported kind
    pub const TYPE_NAMES: [&'static str; 7] = [
        "case",
        "escape",
        "minify",
        "json_parse",
        "xml_parse",
        "select_field",
        "stringify",
    ];

    /// Build a kind from its wire name and free-form options
    ///
    /// Never fails: unsupported names and badly shaped options are kept as
    /// `Unknown` / `Misconfigured` for the engine to report.
    pub fn from_parts(type_name: &str, options: Value) -> Self {
        let result = match type_name {
            "case" => typed_options(&options).map(StepKind::Case),
            "escape" => typed_options(&options).map(StepKind::Escape),
            "minify" => typed_options(&options).map(StepKind::Minify),
            "json_parse" => Ok(StepKind::JsonParse),
            "xml_parse" => typed_options(&options).map(StepKind::XmlFormat),
            "select_field" => typed_options(&options).map(StepKind::SelectField),
            "stringify" => Ok(StepKind::Stringify),
            other => {
                return StepKind::Unknown {
                    type_name: other.to_string(),
                    options,
                }
            }
        };

        result.unwrap_or_else(|err| StepKind::Misconfigured {
            type_name: type_name.to_string(),
            options,
            reason: err.to_string(),
        })
    }

    /// Split into wire name and options
    pub fn to_parts(&self) -> (String, Value) {
        let options = match self {
            StepKind::Case(o) => serde_json::to_value(o),
            StepKind::Escape(o) => serde_json::to_value(o),
            StepKind::Minify(o) => serde_json::to_value(o),
            StepKind::XmlFormat(o) => serde_json::to_value(o),
            StepKind::SelectField(o) => serde_json::to_value(o),
            StepKind::JsonParse | StepKind::Stringify => Ok(json!({})),
            StepKind::Unknown { options, .. } | StepKind::Misconfigured { options, .. } => {
                Ok(options.clone())
            }
        };
        (
            self.type_name().to_string(),
            options.unwrap_or_else(|_| json!({})),
        )
    }

    /// The wire identifier of this kind
    pub fn type_name(&self) -> &str {
        match self {
            StepKind::Case(_) => "case",
            StepKind::Escape(_) => "escape",
            StepKind::Minify(_) => "minify",
            StepKind::JsonParse => "json_parse",
            StepKind::XmlFormat(_) => "xml_parse",
            StepKind::SelectField(_) => "select_field",
            StepKind::Stringify => "stringify",
            StepKind::Unknown { type_name, .. } | StepKind::Misconfigured { type_name, .. } => {
                type_name
            }
        }
    }

    /// Whether this is one of the supported kinds with usable options
    pub fn is_supported(&self) -> bool {
        !matches!(self, StepKind::Unknown { .. } | StepKind::Misconfigured { .. })
    }

    /// The error this kind fails with before any transformation runs, if any
    pub fn resolution_error(&self) -> Option<PipelineError> {
        match self {
            StepKind::Unknown { type_name, .. } => {
                Some(PipelineError::UnknownKind(type_name.clone()))
            }
            StepKind::Misconfigured {
                type_name, reason, ..
            } => Some(PipelineError::InvalidConfiguration(format!(
                "Invalid options for {}: {}",
                type_name, reason
            ))),
            _ => None,
        }
    }
}

fn typed_options<T: DeserializeOwned>(options: &Value) -> Result<T, serde_json::Error> {
    match options {
        Value::Null => serde_json::from_value(json!({})),
        other => serde_json::from_value(other.clone()),
    }
}

/// One configured transformation in a chain, plus its last result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawStepDescriptor", into = "RawStepDescriptor")]
pub struct StepDescriptor {
    /// Stable identity used by callers to address the step
    pub id: StepId,

    /// What the step does
    pub kind: StepKind,

    /// Disabled steps pass their input through
    pub enabled: bool,

    /// Last computed result
    pub output: Option<PipelineValue>,

    /// Last failure message
    pub error: Option<String>,
}

impl StepDescriptor {
    /// Create an enabled step with a generated identity
    pub fn new(kind: StepKind) -> Self {
        Self::with_id(StepId::generate(), kind)
    }

    /// Create an enabled step with the given identity
    pub fn with_id(id: impl Into<StepId>, kind: StepKind) -> Self {
        Self {
            id: id.into(),
            kind,
            enabled: true,
            output: None,
            error: None,
        }
    }

    /// Builder-style toggle of the enabled flag
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Annotate with a successful result
    pub fn succeeded(mut self, output: PipelineValue) -> Self {
        self.output = Some(output);
        self.error = None;
        self
    }

    /// Annotate with a failure
    pub fn failed(mut self, error: &PipelineError) -> Self {
        self.output = None;
        self.error = Some(error.to_string());
        self
    }

    /// Annotate as skipped after an earlier failure
    pub fn skipped(mut self) -> Self {
        self.output = None;
        self.error = Some(SKIPPED_MESSAGE.to_string());
        self
    }

    /// Whether the last evaluation recorded an error
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Whether the last evaluation skipped this step
    pub fn is_skipped(&self) -> bool {
        self.error.as_deref() == Some(SKIPPED_MESSAGE)
    }
}

impl From<String> for StepId {
    fn from(s: String) -> Self {
        StepId(s)
    }
}

/// Serialized form of a step descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawStepDescriptor {
    id: StepId,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    options: Value,
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(
        default,
        deserialize_with = "present_output",
        skip_serializing_if = "Option::is_none"
    )]
    output: Option<PipelineValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn default_enabled() -> bool {
    true
}

// A present `"output": null` is a missing selection, not an unevaluated step
fn present_output<'de, D>(deserializer: D) -> Result<Option<PipelineValue>, D::Error>
where
    D: Deserializer<'de>,
{
    PipelineValue::deserialize(deserializer).map(Some)
}

impl From<RawStepDescriptor> for StepDescriptor {
    fn from(raw: RawStepDescriptor) -> Self {
        Self {
            id: raw.id,
            kind: StepKind::from_parts(&raw.type_name, raw.options),
            enabled: raw.enabled,
            output: raw.output,
            error: raw.error,
        }
    }
}

impl From<StepDescriptor> for RawStepDescriptor {
    fn from(step: StepDescriptor) -> Self {
        let (type_name, options) = step.kind.to_parts();
        Self {
            id: step.id,
            type_name,
            options,
            enabled: step.enabled,
            output: step.output,
            error: step.error,
        }
    }
}
