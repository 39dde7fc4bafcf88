//! # Parsers
//!
//! Decoders for the raw artifacts the grader consumes. Each parser implements
//! [`crate::traits::parser::Parser`].
//!
//! - [`junit_parser`]: JUnit XML test reports.

pub mod junit_parser;
