// Module definitions for the transformation categories

pub mod escape;
pub mod json;
pub mod text;
pub mod xml;

// Re-export the transform types
pub use escape::Escaper;
pub use json::{FieldSelector, JsonParser, Stringifier};
pub use text::{CaseConverter, Minifier};
pub use xml::XmlFormatter;
