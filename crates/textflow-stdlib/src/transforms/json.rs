use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use textflow_core::{PipelineError, PipelineValue, SelectFieldOptions, Transform, ValueType};
use tracing::trace;

lazy_static! {
    // Separators between path tokens: dots and brackets
    static ref PATH_SEPARATOR: Regex = Regex::new(r"[.\[\]]+").unwrap();
}

/// Message reported when `select_field` has no path
pub const PATH_NOT_SPECIFIED_MESSAGE: &str = "Path is not specified.";

/// Parses JSON text into a structured value
#[derive(Debug, Clone, Default)]
pub struct JsonParser;

impl JsonParser {
    /// Create a new JSON parser
    pub fn new() -> Self {
        Self
    }
}

impl Transform for JsonParser {
    fn transform_type(&self) -> &str {
        "json_parse"
    }

    fn input_type(&self) -> ValueType {
        ValueType::Text
    }

    fn apply(&self, input: &PipelineValue) -> Result<PipelineValue, PipelineError> {
        parse_json(input.require_text()?)
    }
}

/// Parse JSON text; a top-level string literal comes back as text
pub fn parse_json(input: &str) -> Result<PipelineValue, PipelineError> {
    let value: Value = serde_json::from_str(input)?;
    Ok(PipelineValue::from_json(value))
}

/// Serializes a structured value as indented JSON
#[derive(Debug, Clone, Default)]
pub struct Stringifier;

impl Stringifier {
    /// Create a new stringifier
    pub fn new() -> Self {
        Self
    }
}

impl Transform for Stringifier {
    fn transform_type(&self) -> &str {
        "stringify"
    }

    fn input_type(&self) -> ValueType {
        ValueType::Object
    }

    fn apply(&self, input: &PipelineValue) -> Result<PipelineValue, PipelineError> {
        Ok(PipelineValue::text(stringify(input.require_object()?)?))
    }
}

/// Serialize with two-space indentation
pub fn stringify(value: &Value) -> Result<String, PipelineError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Extracts a nested value by path
#[derive(Debug, Clone, Default)]
pub struct FieldSelector {
    options: SelectFieldOptions,
}

impl FieldSelector {
    /// Create a new field selector
    pub fn new(options: SelectFieldOptions) -> Self {
        Self { options }
    }
}

impl Transform for FieldSelector {
    fn transform_type(&self) -> &str {
        "select_field"
    }

    fn input_type(&self) -> ValueType {
        ValueType::Object
    }

    fn apply(&self, input: &PipelineValue) -> Result<PipelineValue, PipelineError> {
        let root = input.require_object()?;
        let selected = select_field(root, &self.options.path)?;
        if selected.is_none() {
            trace!(path = %self.options.path, "Selected path is missing");
        }
        Ok(selected
            .cloned()
            .map(PipelineValue::from_json)
            .unwrap_or_else(PipelineValue::missing))
    }
}

/// Split a path like `a.b[0]` into `["a", "b", "0"]`
pub fn path_tokens(path: &str) -> Vec<&str> {
    PATH_SEPARATOR
        .split(path)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Walk `root` along `path`
///
/// Objects are indexed by key and arrays by position. Anything missing or
/// `null` along the way yields `Ok(None)`; only an empty path is an error.
pub fn select_field<'a>(root: &'a Value, path: &str) -> Result<Option<&'a Value>, PipelineError> {
    if path.is_empty() {
        return Err(PipelineError::InvalidConfiguration(
            PATH_NOT_SPECIFIED_MESSAGE.to_string(),
        ));
    }

    let selected = path_tokens(path)
        .into_iter()
        .try_fold(root, |current, token| match current {
            Value::Object(map) => map.get(token),
            Value::Array(items) => array_index(token).and_then(|i| items.get(i)),
            _ => None,
        });

    Ok(selected)
}

/// Canonical array index: `0` or digits without a leading zero or sign
fn array_index(token: &str) -> Option<usize> {
    let canonical = token.bytes().all(|b| b.is_ascii_digit())
        && (token == "0" || !token.starts_with('0'));
    if canonical {
        token.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_json() {
        assert_eq!(
            parse_json(r#" {"a": [1, 2]} "#).unwrap(),
            PipelineValue::Structured(json!({"a": [1, 2]}))
        );
        assert_eq!(parse_json(r#""quoted""#).unwrap(), PipelineValue::text("quoted"));
        assert_eq!(parse_json("7").unwrap(), PipelineValue::Structured(json!(7)));
    }

    #[test]
    fn test_parse_json_errors() {
        for bad in ["{invalid", "", "[1,]", "{'a': 1}"] {
            match parse_json(bad) {
                Err(PipelineError::MalformedInput(msg)) => assert!(!msg.is_empty()),
                other => panic!("Expected MalformedInput for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_stringify_indents_two_spaces() {
        assert_eq!(
            stringify(&json!({"a": {"b": [1, "x"]}})).unwrap(),
            "{\n  \"a\": {\n    \"b\": [\n      1,\n      \"x\"\n    ]\n  }\n}"
        );
        assert_eq!(stringify(&json!({})).unwrap(), "{}");
    }

    #[test]
    fn test_path_tokens() {
        assert_eq!(path_tokens("a.b[0]"), vec!["a", "b", "0"]);
        assert_eq!(path_tokens("[1][2].c"), vec!["1", "2", "c"]);
        assert_eq!(path_tokens("..a..b.."), vec!["a", "b"]);
        assert!(path_tokens(".[]").is_empty());
    }

    #[test]
    fn test_select_field() {
        let data = json!({
            "a": {"b": [42, 43], "n": null},
            "list": [{"name": "first"}, {"name": "second"}],
            "0": "zero"
        });

        assert_eq!(select_field(&data, "a.b[0]").unwrap(), Some(&json!(42)));
        assert_eq!(select_field(&data, "list[1].name").unwrap(), Some(&json!("second")));
        assert_eq!(select_field(&data, "0").unwrap(), Some(&json!("zero")));
        assert_eq!(select_field(&data, "a.n").unwrap(), Some(&Value::Null));
        assert_eq!(select_field(&data, "a.n.deeper").unwrap(), None);
        assert_eq!(select_field(&data, "a.missing").unwrap(), None);
        assert_eq!(select_field(&data, "list.x").unwrap(), None);
        assert_eq!(select_field(&data, "a.b[9]").unwrap(), None);
        // A path of separators only selects the root
        assert_eq!(select_field(&data, ".").unwrap(), Some(&data));
    }

    #[test]
    fn test_select_field_rejects_non_canonical_indices() {
        let root = json!({"a": [42, 43]});
        assert_eq!(select_field(&root, "a[+1]").unwrap(), None);
        assert_eq!(select_field(&root, "a[01]").unwrap(), None);
        assert_eq!(select_field(&root, "a[0]").unwrap(), Some(&json!(42)));
        assert_eq!(select_field(&root, "a[1]").unwrap(), Some(&json!(43)));
    }

    #[test]
    fn test_select_field_requires_path() {
        assert_eq!(
            select_field(&json!({}), "").unwrap_err(),
            PipelineError::InvalidConfiguration(PATH_NOT_SPECIFIED_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_field_selector_output_types() {
        let root = PipelineValue::Structured(json!({"s": "text", "n": 1}));

        let pick = |path: &str| {
            FieldSelector::new(SelectFieldOptions {
                path: path.to_string(),
            })
            .apply(&root)
            .unwrap()
        };

        assert_eq!(pick("s"), PipelineValue::text("text"));
        assert_eq!(pick("n"), PipelineValue::Structured(json!(1)));
        assert_eq!(pick("nope"), PipelineValue::missing());
    }
}
