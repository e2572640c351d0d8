/// Chain editing
pub mod chain;

/// Step descriptors, kinds and options
pub mod step;
