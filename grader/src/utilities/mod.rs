//! # Utilities
//!
//! Helpers shared by the pipeline stages.
//!
//! - [`file_loader`]: reads the test report artifact from disk.

pub mod file_loader;
