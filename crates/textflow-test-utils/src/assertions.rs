//! Assertion utilities for validating annotated chains.

use textflow_core::{PipelineValue, StepDescriptor, SKIPPED_MESSAGE};
use thiserror::Error;

/// Error type for annotated chain validation failures
#[derive(Debug, Error)]
pub enum StepAssertionError {
    #[error("No step at index {0}")]
    MissingStep(usize),

    #[error("Step {index}: expected output {expected:?}, got {actual:?}")]
    OutputMismatch {
        index: usize,
        expected: Option<PipelineValue>,
        actual: Option<PipelineValue>,
    },

    #[error("Step {index}: expected error {expected:?}, got {actual:?}")]
    ErrorMismatch {
        index: usize,
        expected: Option<String>,
        actual: Option<String>,
    },

    #[error("Step {index}: carries both an output and an error")]
    OutputAndError { index: usize },
}

fn step_at(steps: &[StepDescriptor], index: usize) -> Result<&StepDescriptor, StepAssertionError> {
    steps.get(index).ok_or(StepAssertionError::MissingStep(index))
}

/// Asserts that the step at `index` succeeded with `expected`.
pub fn assert_step_output(
    steps: &[StepDescriptor],
    index: usize,
    expected: PipelineValue,
) -> Result<(), StepAssertionError> {
    let step = step_at(steps, index)?;

    if step.has_error() {
        return Err(StepAssertionError::ErrorMismatch {
            index,
            expected: None,
            actual: step.error.clone(),
        });
    }
    if step.output.as_ref() != Some(&expected) {
        return Err(StepAssertionError::OutputMismatch {
            index,
            expected: Some(expected),
            actual: step.output.clone(),
        });
    }
    Ok(())
}

/// Asserts that the step at `index` failed with `expected_message` and has no output.
pub fn assert_step_error(
    steps: &[StepDescriptor],
    index: usize,
    expected_message: &str,
) -> Result<(), StepAssertionError> {
    let step = step_at(steps, index)?;

    if step.output.is_some() {
        return Err(StepAssertionError::OutputAndError { index });
    }
    if step.error.as_deref() != Some(expected_message) {
        return Err(StepAssertionError::ErrorMismatch {
            index,
            expected: Some(expected_message.to_string()),
            actual: step.error.clone(),
        });
    }
    Ok(())
}

/// Asserts that every step after `index` was skipped.
pub fn assert_skipped_after(
    steps: &[StepDescriptor],
    index: usize,
) -> Result<(), StepAssertionError> {
    for i in index + 1..steps.len() {
        assert_step_error(steps, i, SKIPPED_MESSAGE)?;
    }
    Ok(())
}

/// Asserts that no step recorded an error and each has an output.
pub fn assert_no_errors(steps: &[StepDescriptor]) -> Result<(), StepAssertionError> {
    for (index, step) in steps.iter().enumerate() {
        if step.has_error() || step.output.is_none() {
            return Err(StepAssertionError::ErrorMismatch {
                index,
                expected: None,
                actual: step.error.clone(),
            });
        }
    }
    Ok(())
}
