use lazy_static::lazy_static;
use regex::Regex;
use textflow_core::{
    PipelineError, PipelineValue, Transform, ValueType, XmlFormatOptions, XmlIndent,
};

lazy_static! {
    // Leading declaration plus the whitespace after it
    static ref XML_DECLARATION: Regex = Regex::new(r"^<\?xml.*?\?>\s*").unwrap();

    // An element opened and closed on the same line, like <tag>text</tag>
    static ref INLINE_ELEMENT: Regex = Regex::new(r"<\w[^>]*>.*</\w[^>]*>").unwrap();

    static ref CLOSING_TAG: Regex = Regex::new(r"^</\w").unwrap();

    static ref OPENING_TAG: Regex = Regex::new(r"^<\w").unwrap();
}

/// Line separator used in formatted output
const LINE_BREAK: &str = "\r\n";

/// Pretty-prints XML text
///
/// This is a line-based formatter, not a parser: malformed markup is
/// indented as best it can be and never rejected.
#[derive(Debug, Clone, Default)]
pub struct XmlFormatter {
    options: XmlFormatOptions,
}

impl XmlFormatter {
    /// Create a new XML formatter
    pub fn new(options: XmlFormatOptions) -> Self {
        Self { options }
    }
}

impl Transform for XmlFormatter {
    fn transform_type(&self) -> &str {
        "xml_parse"
    }

    fn input_type(&self) -> ValueType {
        ValueType::Text
    }

    fn apply(&self, input: &PipelineValue) -> Result<PipelineValue, PipelineError> {
        let text = input.require_text()?;
        Ok(PipelineValue::text(format_xml(text, self.options.indent)))
    }
}

/// Indent XML by nesting depth, one tag boundary per line
pub fn format_xml(xml: &str, indent: XmlIndent) -> String {
    let (header, body) = match XML_DECLARATION.find(xml) {
        Some(m) => (m.as_str(), &xml[m.end()..]),
        None => ("", xml),
    };

    let split = body.replace("><", ">\r\n<");
    let unit = indent.unit();
    let mut depth = 0usize;
    let mut lines = Vec::new();

    for node in split.split(LINE_BREAK) {
        let node = node.trim();
        if node.is_empty() {
            continue;
        }

        let is_opening = OPENING_TAG.is_match(node);
        let self_closing = is_opening && node.ends_with("/>");
        let mut opens_scope = is_opening && !self_closing;

        if INLINE_ELEMENT.is_match(node) {
            opens_scope = false;
        } else if CLOSING_TAG.is_match(node) {
            depth = depth.saturating_sub(1);
        }

        lines.push(format!("{}{}", unit.repeat(depth), node));

        if opens_scope {
            depth += 1;
        }
    }

    format!("{}{}", header, lines.join(LINE_BREAK))
}
