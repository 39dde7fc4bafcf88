//! # Outcome Classifier
//!
//! Combines one decoded test case with its extracted challenge and catalog resolution into
//! a scored [`ClassifiedRecord`].

use crate::extractor::{self, ExtractedChallenge};
use crate::matcher::{Resolution, TaxonomyMatcher};
use crate::report::ClassifiedRecord;
use crate::types::RawTestCase;
use tracing::debug;

/// Builds the record for a case whose challenge has already been extracted and resolved.
pub fn classify(
    case: &RawTestCase,
    challenge: ExtractedChallenge,
    resolution: &Resolution<'_>,
) -> ClassifiedRecord {
    ClassifiedRecord {
        full_name: challenge.full_name,
        success: !case.failed,
        score: resolution.points,
        bucket: resolution.bucket,
    }
}

/// Runs extraction, matching and classification for a single case.
#[derive(Debug, Clone, Copy)]
pub struct OutcomeClassifier<'c> {
    matcher: TaxonomyMatcher<'c>,
}

impl<'c> OutcomeClassifier<'c> {
    pub fn new(matcher: TaxonomyMatcher<'c>) -> Self {
        Self { matcher }
    }

    /// Returns `None` for cases outside the rubric; they still count toward run totals.
    pub fn classify_case(&self, case: &RawTestCase) -> Option<ClassifiedRecord> {
        let Some(challenge) = extractor::extract(&case.display_name) else {
            debug!(name = %case.display_name, "Skipping test case without a challenge id");
            return None;
        };
        let resolution = self.matcher.resolve(&challenge.id);
        Some(classify(case, challenge, &resolution))
    }
}
