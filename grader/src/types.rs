//! # Types Module
//!
//! Core data structures shared by the decoder, extractor, matcher and classifier.

use serde::Serialize;
use std::fmt;

/// One `<testcase>` as decoded from the report artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTestCase {
    /// The case's `name` attribute, XML-unescaped.
    pub display_name: String,
    /// True iff the case carried a `<failure>` child.
    pub failed: bool,
}

/// One `<testsuite>` and the cases it contains, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TestSuite {
    pub name: Option<String>,
    pub cases: Vec<RawTestCase>,
}

/// A fully decoded report: run-level totals plus every suite.
///
/// `tests` and `failures` come straight from the root element and may legitimately
/// disagree with the number of decoded cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestReport {
    pub tests: u32,
    pub failures: u32,
    pub suites: Vec<TestSuite>,
}

impl TestReport {
    /// Iterates every case in suite order, then case order.
    pub fn cases(&self) -> impl Iterator<Item = &RawTestCase> {
        self.suites.iter().flat_map(|suite| suite.cases.iter())
    }
}

/// Which half of the rubric a graded item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Bug,
    Feature,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Bug => f.write_str("bug"),
            Bucket::Feature => f.write_str("feature"),
        }
    }
}

/// A canonical challenge identifier such as `2a-1`.
///
/// Construction goes through [`crate::extractor`], which guarantees the
/// `<number><optional letter>-<number>` shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChallengeId(String);

impl ChallengeId {
    pub(crate) fn new_unchecked(raw: impl Into<String>) -> Self {
        ChallengeId(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id with its separator rewritten as `a-` and `b-`, in that order.
    ///
    /// Test names sometimes drop the sub-challenge letter (`1-1`), while the catalog
    /// always carries it (`1a-1`).
    pub fn letter_variants(&self) -> [String; 2] {
        [self.0.replacen('-', "a-", 1), self.0.replacen('-', "b-", 1)]
    }
}

impl fmt::Display for ChallengeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
