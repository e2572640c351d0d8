use lazy_static::lazy_static;
use regex::Regex;
use textflow_core::{
    CaseOptions, CaseTransform, MinifyOptions, MinifyType, PipelineError, PipelineValue,
    Transform, ValueType,
};

lazy_static! {
    // Any run of whitespace, including line breaks
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Upper- or lower-cases text
#[derive(Debug, Clone, Default)]
pub struct CaseConverter {
    options: CaseOptions,
}

impl CaseConverter {
    /// Create a new case converter
    pub fn new(options: CaseOptions) -> Self {
        Self { options }
    }
}

impl Transform for CaseConverter {
    fn transform_type(&self) -> &str {
        "case"
    }

    fn input_type(&self) -> ValueType {
        ValueType::Text
    }

    fn apply(&self, input: &PipelineValue) -> Result<PipelineValue, PipelineError> {
        let text = input.require_text()?;
        Ok(PipelineValue::text(transform_case(text, self.options.transform)))
    }
}

/// Apply Unicode case mapping
pub fn transform_case(input: &str, transform: CaseTransform) -> String {
    match transform {
        CaseTransform::Uppercase => input.to_uppercase(),
        CaseTransform::Lowercase => input.to_lowercase(),
    }
}

/// Strips insignificant whitespace from JSON or plain text
#[derive(Debug, Clone, Default)]
pub struct Minifier {
    options: MinifyOptions,
}

impl Minifier {
    /// Create a new minifier
    pub fn new(options: MinifyOptions) -> Self {
        Self { options }
    }
}

impl Transform for Minifier {
    fn transform_type(&self) -> &str {
        "minify"
    }

    fn input_type(&self) -> ValueType {
        ValueType::Text
    }

    fn apply(&self, input: &PipelineValue) -> Result<PipelineValue, PipelineError> {
        let text = input.require_text()?;
        let minified = match self.options.kind {
            MinifyType::Json => minify_json(text)?,
            MinifyType::Text => collapse_whitespace(text),
        };
        Ok(PipelineValue::text(minified))
    }
}

/// Re-serialize JSON text without whitespace, keeping key order
pub fn minify_json(input: &str) -> Result<String, PipelineError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    Ok(serde_json::to_string(&value)?)
}

/// Collapse every whitespace run to one space and trim the ends
pub fn collapse_whitespace(input: &str) -> String {
    WHITESPACE_RUN.replace_all(input, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transform_case() {
        assert_eq!(transform_case("Hello, World", CaseTransform::Uppercase), "HELLO, WORLD");
        assert_eq!(transform_case("Hello, World", CaseTransform::Lowercase), "hello, world");
        assert_eq!(transform_case("straße", CaseTransform::Uppercase), "STRASSE");
        assert_eq!(transform_case("ÀÉÎ", CaseTransform::Lowercase), "àéî");
    }

    #[test]
    fn test_case_converter_defaults_to_uppercase() {
        let converter = CaseConverter::default();
        assert_eq!(
            converter.apply(&PipelineValue::text("abc")).unwrap(),
            PipelineValue::text("ABC")
        );
    }

    #[test]
    fn test_case_converter_rejects_structured_input() {
        let converter = CaseConverter::default();
        let err = converter
            .apply(&PipelineValue::Structured(json!({})))
            .unwrap_err();
        assert_eq!(err, PipelineError::expected_string());
    }

    #[test]
    fn test_minify_json() {
        let input = "{\n  \"b\": 1,\n  \"a\": [1, 2,  3],\n  \"s\": \"x  y\"\n}";
        assert_eq!(minify_json(input).unwrap(), r#"{"b":1,"a":[1,2,3],"s":"x  y"}"#);
    }

    #[test]
    fn test_minify_json_rejects_invalid() {
        let err = minify_json("{nope}").unwrap_err();
        assert!(matches!(err, PipelineError::MalformedInput(_)));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \t b\n\n c  "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_minifier_text_mode() {
        let minifier = Minifier::new(MinifyOptions {
            kind: MinifyType::Text,
        });
        assert_eq!(
            minifier.apply(&PipelineValue::text(" x\n y ")).unwrap(),
            PipelineValue::text("x y")
        );
    }
}
