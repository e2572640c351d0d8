/// Chain evaluation
pub mod engine;

/// Final result helpers
pub mod output;
