//! Parser Trait
//!
//! This module defines the [`Parser`] trait, which provides a generic interface for parsing
//! raw report artifacts into strongly-typed Rust structures. Implementations validate the
//! input and return a [`GraderError`] describing the first problem found.
//!
//! # Example
//!
//! ```rust
//! use grader::error::GraderError;
//! use grader::traits::parser::Parser;
//!
//! struct LineCounter;
//!
//! impl<'a> Parser<&'a str, usize> for LineCounter {
//!     fn parse(&self, raw: &'a str) -> Result<usize, GraderError> {
//!         Ok(raw.lines().count())
//!     }
//! }
//!
//! assert_eq!(LineCounter.parse("a\nb").unwrap(), 2);
//! ```

use crate::error::GraderError;

/// A generic trait for parsing data into a strongly-typed Rust structure.
///
/// # Type Parameters
///
/// * `Input` - The input type to be parsed.
/// * `Output` - The output type produced by the parser.
pub trait Parser<Input, Output> {
    /// Parse an input value into the target type.
    ///
    /// # Errors
    ///
    /// Returns a [`GraderError`] if the input does not conform to the expected format.
    fn parse(&self, input: Input) -> Result<Output, GraderError>;
}
