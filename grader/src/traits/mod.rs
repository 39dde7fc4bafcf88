//!
//! Traits Module
//!
//! Core traits at the seams of the grading pipeline.
//!
//! - [`parser`]: Generic trait for decoding a raw artifact into Rust types.
//! - [`sink`]: Destination a finished grading report is submitted to.

pub mod parser;
pub mod sink;
