//! # Grader Library
//!
//! This crate grades a challenge submission from the JUnit report its test run produced,
//! and submits the scored result to the grading service.
//!
//! ## Pipeline
//! 1. **Read** the report artifact ([`utilities::file_loader`]).
//! 2. **Decode** it into suites and cases ([`parsers::junit_parser`]).
//! 3. **Extract** a challenge id from each case name ([`extractor`]).
//! 4. **Match** the id against the [`catalog::ScoreCatalog`] ([`matcher`]).
//! 5. **Classify** the case into a scored record ([`classifier`]).
//! 6. **Aggregate** records and run totals into a [`report::GradingReport`] ([`report`]).
//! 7. **Transmit** the report, best effort ([`transmitter`]).
//!
//! Steps 1 and 2 are the only ones that can fail a run.

pub mod catalog;
pub mod classifier;
pub mod error;
pub mod extractor;
pub mod matcher;
pub mod parsers;
pub mod report;
pub mod traits;
pub mod transmitter;
pub mod types;
pub mod utilities;

use crate::catalog::ScoreCatalog;
use crate::classifier::OutcomeClassifier;
use crate::error::GraderError;
use crate::matcher::TaxonomyMatcher;
use crate::parsers::junit_parser::JunitReportParser;
use crate::report::GradingReport;
use crate::traits::parser::Parser;
use crate::traits::sink::ReportSink;
use crate::transmitter::{DispatchOutcome, dispatch_best_effort};

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// A grading run over one report artifact.
///
/// The catalog is borrowed, so one catalog can serve any number of jobs.
pub struct GradingJob<'c> {
    report_path: PathBuf,
    catalog: &'c ScoreCatalog,
    repo_name: Option<String>,
}

/// What a completed run produced.
#[derive(Debug)]
pub struct RunResult {
    pub report: GradingReport,
    pub outcome: DispatchOutcome,
}

impl<'c> GradingJob<'c> {
    /// Create a job for the artifact at `report_path`.
    pub fn new(report_path: impl Into<PathBuf>, catalog: &'c ScoreCatalog) -> Self {
        Self {
            report_path: report_path.into(),
            catalog,
            repo_name: None,
        }
    }

    /// Set the repository name copied into the payload. `None` leaves it out.
    pub fn with_repo_name(mut self, repo_name: Option<String>) -> Self {
        self.repo_name = repo_name;
        self
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    /// Grades already-loaded report text, stamping the result with `date`.
    ///
    /// # Errors
    /// [`GraderError::Decode`] if the text is not a valid JUnit report.
    pub fn grade_text(&self, raw: &str, date: DateTime<Utc>) -> Result<GradingReport, GraderError> {
        let decoded = JunitReportParser.parse(raw)?;
        let classifier = OutcomeClassifier::new(TaxonomyMatcher::new(self.catalog));
        let report = report::aggregate(&decoded, &classifier, self.repo_name.clone(), date);

        info!(
            tests = report.summary.tests,
            failures = report.summary.failures,
            bug_fixing = report.bug_fixing.len(),
            feature_implementation = report.feature_implementation.len(),
            earned = report.earned_points(),
            available = report.available_points(),
            "Graded test report"
        );
        Ok(report)
    }

    /// Reads, decodes and grades the artifact.
    ///
    /// # Errors
    /// [`GraderError::Read`] or [`GraderError::Decode`]; nothing else fails a run.
    pub fn build_report(&self) -> Result<GradingReport, GraderError> {
        let raw = utilities::file_loader::load_report(&self.report_path)?;
        self.grade_text(&raw, Utc::now())
    }

    /// Builds the report and submits it to `sink`, waiting for the attempt to finish.
    ///
    /// The submission outcome is returned for logging only; a failed submission is not an error.
    pub async fn run(self, sink: Arc<dyn ReportSink>) -> Result<RunResult, GraderError> {
        let report = self.build_report()?;
        let outcome = dispatch_best_effort(sink, report.clone()).settle().await;
        Ok(RunResult { report, outcome })
    }
}
