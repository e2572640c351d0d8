//! Testing utilities for Textflow.
//!
//! This crate provides chain builders, assertion helpers for annotated
//! chains, and tracing setup for tests.

pub mod assertions;
pub mod builders;
pub mod util;

pub use assertions::{
    assert_no_errors, assert_skipped_after, assert_step_error, assert_step_output,
    StepAssertionError,
};
pub use builders::ChainBuilder;
pub use util::init_test_tracing;
