//!
//! Textflow Core - Pipeline engine for the Textflow toolkit
//!
//! This crate defines the step descriptors, the value type that flows
//! between steps, and the engine that evaluates a chain of steps against
//! an initial text input. The concrete transformations live in
//! `textflow-stdlib`.

#![forbid(unsafe_code)]

/// Domain layer - steps, kinds and chains
pub mod domain;

/// Application services - evaluation and result helpers
pub mod application;

/// Core types
pub mod types;

/// Error types
pub mod error;

// Re-export key types
pub use error::{PipelineError, SKIPPED_MESSAGE};
pub use types::{PipelineValue, ValueType};

// Re-export main API types for easy use
pub use application::engine::{PipelineEngine, TransformFactory};
pub use application::output::{final_output, first_error, render_final_output};
pub use domain::chain::{Chain, Direction};
pub use domain::step::{
    CaseOptions, CaseTransform, EscapeFormat, EscapeMode, EscapeOptions, MinifyOptions,
    MinifyType, SelectFieldOptions, StepDescriptor, StepId, StepKind, XmlFormatOptions,
    XmlIndent,
};

/// A transformation that can be run as a pipeline step
///
/// Implementations are pure: the same input always yields the same result
/// and nothing is retained between calls.
pub trait Transform: Send + Sync {
    /// Get the transform name
    fn transform_type(&self) -> &str;

    /// The kind of value this transform accepts
    fn input_type(&self) -> ValueType;

    /// Run the transformation
    ///
    /// The engine checks `input_type` before calling this, but
    /// implementations should still fail cleanly on the wrong value.
    fn apply(&self, input: &PipelineValue) -> Result<PipelineValue, PipelineError>;
}
