use lazy_static::lazy_static;
use regex::Regex;
use textflow_core::{
    EscapeFormat, EscapeMode, EscapeOptions, PipelineError, PipelineValue, Transform, ValueType,
};

lazy_static! {
    // Exactly the five entities produced by `escape_html`
    static ref HTML_ENTITY: Regex = Regex::new(r"&amp;|&lt;|&gt;|&quot;|&#39;").unwrap();
}

/// Message reported for undecodable percent sequences
pub const URI_MALFORMED_MESSAGE: &str = "URI malformed";

/// Escapes or unescapes HTML entities and URI components
#[derive(Debug, Clone, Default)]
pub struct Escaper {
    options: EscapeOptions,
}

impl Escaper {
    /// Create a new escaper
    pub fn new(options: EscapeOptions) -> Self {
        Self { options }
    }
}

impl Transform for Escaper {
    fn transform_type(&self) -> &str {
        "escape"
    }

    fn input_type(&self) -> ValueType {
        ValueType::Text
    }

    fn apply(&self, input: &PipelineValue) -> Result<PipelineValue, PipelineError> {
        let text = input.require_text()?;
        let result = match (self.options.format, self.options.mode) {
            (EscapeFormat::Html, EscapeMode::Escape) => escape_html(text),
            (EscapeFormat::Html, EscapeMode::Unescape) => unescape_html(text),
            (EscapeFormat::Uri, EscapeMode::Escape) => encode_uri_component(text),
            (EscapeFormat::Uri, EscapeMode::Unescape) => decode_uri_component(text)?,
        };
        Ok(PipelineValue::text(result))
    }
}

/// Replace `& < > " '` with their named entities
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Reverse `escape_html`
///
/// Only the five entities it produces are decoded; numeric references
/// such as `&#65;` are left as they are.
pub fn unescape_html(input: &str) -> String {
    HTML_ENTITY
        .replace_all(input, |caps: &regex::Captures| {
            match &caps[0] {
                "&amp;" => "&",
                "&lt;" => "<",
                "&gt;" => ">",
                "&quot;" => "\"",
                _ => "'",
            }
            .to_string()
        })
        .into_owned()
}

/// Percent-encode a URI component
///
/// Leaves `A-Z a-z 0-9 - _ . ! ~ * ' ( )` untouched, like the browser's
/// `encodeURIComponent`.
pub fn encode_uri_component(input: &str) -> String {
    urlencoding::encode(input)
        .replace("%21", "!")
        .replace("%2A", "*")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
}

/// Decode a percent-encoded URI component
///
/// Fails if a `%` is not followed by two hex digits or the decoded bytes
/// are not UTF-8.
pub fn decode_uri_component(input: &str) -> Result<String, PipelineError> {
    let bytes = input.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(PipelineError::MalformedInput(URI_MALFORMED_MESSAGE.to_string()));
            }
        }
    }

    urlencoding::decode(input)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| PipelineError::MalformedInput(URI_MALFORMED_MESSAGE.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_unescape_html_only_named_entities() {
        assert_eq!(unescape_html("&lt;b&gt; &amp; &quot;&#39;"), "<b> & \"'");
        assert_eq!(unescape_html("&#65; &nbsp;"), "&#65; &nbsp;");
        // Single pass: the decoded ampersand is not decoded again
        assert_eq!(unescape_html("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_html_round_trip() {
        let samples = ["", "plain", "<&>\"'", "a < b && c > 'd'", "\"\"''&&<<>>"];
        for s in samples {
            assert_eq!(unescape_html(&escape_html(s)), s);
        }
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("a b&c=d/é"), "a%20b%26c%3Dd%2F%C3%A9");
        assert_eq!(encode_uri_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_uri_component("100%"), "100%25");
    }

    #[test]
    fn test_decode_uri_component() {
        assert_eq!(decode_uri_component("a%20b%26c%3Dd%2F%C3%A9").unwrap(), "a b&c=d/é");
        assert_eq!(decode_uri_component("a+b").unwrap(), "a+b");
    }

    #[test]
    fn test_decode_uri_component_malformed() {
        for bad in ["%", "%2", "%zz", "abc%E0%A4%A"] {
            assert_eq!(
                decode_uri_component(bad).unwrap_err(),
                PipelineError::MalformedInput(URI_MALFORMED_MESSAGE.to_string()),
                "input {:?}",
                bad
            );
        }
        // Well-formed escapes that are not UTF-8
        assert!(decode_uri_component("%FF").is_err());
    }

    #[test]
    fn test_escaper_uses_options() {
        let escaper = Escaper::new(EscapeOptions {
            mode: EscapeMode::Escape,
            format: EscapeFormat::Uri,
        });
        assert_eq!(
            escaper.apply(&PipelineValue::text("a b")).unwrap(),
            PipelineValue::text("a%20b")
        );
    }
}
