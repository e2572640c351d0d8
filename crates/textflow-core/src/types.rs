use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PipelineError;

/// The working value passed from one step to the next
///
/// Text flows between the string kinds; structured values are produced by
/// JSON parsing and field selection. A JSON string is always held as
/// `Text`, so `Structured` never wraps `Value::String`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PipelineValue {
    /// Plain text
    Text(String),
    /// Any non-string JSON value
    Structured(Value),
}

impl PipelineValue {
    /// Create a text value
    #[inline]
    pub fn text(s: impl Into<String>) -> Self {
        PipelineValue::Text(s.into())
    }

    /// Wrap a JSON value, folding JSON strings into `Text`
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(s) => PipelineValue::Text(s),
            other => PipelineValue::Structured(other),
        }
    }

    /// The value standing in for "nothing found"
    #[inline]
    pub fn missing() -> Self {
        PipelineValue::Structured(Value::Null)
    }

    /// Get the text, if this is a text value
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PipelineValue::Text(s) => Some(s),
            PipelineValue::Structured(_) => None,
        }
    }

    /// Get the JSON object or array, if this is one
    #[inline]
    pub fn as_object(&self) -> Option<&Value> {
        match self {
            PipelineValue::Structured(v @ (Value::Object(_) | Value::Array(_))) => Some(v),
            _ => None,
        }
    }

    /// Get the text or fail with the string type mismatch
    pub fn require_text(&self) -> Result<&str, PipelineError> {
        self.as_text().ok_or_else(PipelineError::expected_string)
    }

    /// Get the object or array or fail with the object type mismatch
    pub fn require_object(&self) -> Result<&Value, PipelineError> {
        self.as_object().ok_or_else(PipelineError::expected_object)
    }

    /// Render for display: text verbatim, everything else as indented JSON
    pub fn render(&self) -> String {
        match self {
            PipelineValue::Text(s) => s.clone(),
            PipelineValue::Structured(v) => {
                serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
            }
        }
    }
}

impl From<String> for PipelineValue {
    fn from(s: String) -> Self {
        PipelineValue::Text(s)
    }
}

impl From<&str> for PipelineValue {
    fn from(s: &str) -> Self {
        PipelineValue::Text(s.to_string())
    }
}

impl From<Value> for PipelineValue {
    fn from(value: Value) -> Self {
        PipelineValue::from_json(value)
    }
}

/// The kind of value a transformation accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Text only
    Text,
    /// A JSON object or array
    Object,
}

impl ValueType {
    /// Check whether the value can be fed to a step expecting this type
    pub fn accepts(&self, value: &PipelineValue) -> bool {
        match self {
            ValueType::Text => value.as_text().is_some(),
            ValueType::Object => value.as_object().is_some(),
        }
    }

    /// The mismatch error reported for this expected type
    pub fn mismatch(&self) -> PipelineError {
        match self {
            ValueType::Text => PipelineError::expected_string(),
            ValueType::Object => PipelineError::expected_object(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_folds_strings() {
        assert_eq!(PipelineValue::from_json(json!("abc")), PipelineValue::text("abc"));
        assert_eq!(
            PipelineValue::from_json(json!(42)),
            PipelineValue::Structured(json!(42))
        );
    }

    #[test]
    fn test_as_object_accepts_arrays_but_not_scalars() {
        assert!(PipelineValue::Structured(json!({"a": 1})).as_object().is_some());
        assert!(PipelineValue::Structured(json!([1, 2])).as_object().is_some());
        assert!(PipelineValue::Structured(json!(1)).as_object().is_none());
        assert!(PipelineValue::missing().as_object().is_none());
        assert!(PipelineValue::text("{}").as_object().is_none());
    }

    #[test]
    fn test_value_type_accepts() {
        let text = PipelineValue::text("x");
        let object = PipelineValue::Structured(json!({}));

        assert!(ValueType::Text.accepts(&text));
        assert!(!ValueType::Text.accepts(&object));
        assert!(ValueType::Object.accepts(&object));
        assert!(!ValueType::Object.accepts(&text));
        assert_eq!(ValueType::Object.mismatch(), PipelineError::expected_object());
    }

    #[test]
    fn test_render() {
        assert_eq!(PipelineValue::text("plain").render(), "plain");
        assert_eq!(
            PipelineValue::Structured(json!({"a": [1]})).render(),
            "{\n  \"a\": [\n    1\n  ]\n}"
        );
    }

    #[test]
    fn test_untagged_serialization() {
        let text = serde_json::to_value(PipelineValue::text("hi")).unwrap();
        assert_eq!(text, json!("hi"));

        let back: PipelineValue = serde_json::from_value(json!({"k": true})).unwrap();
        assert_eq!(back, PipelineValue::Structured(json!({"k": true})));
    }
}
