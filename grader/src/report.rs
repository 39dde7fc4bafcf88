//! # Grading Report Module
//!
//! This module defines the payload sent to the grading service and the aggregator that
//! builds it from a decoded test report.
//!
//! ## JSON Output Example
//!
//! ```json
//! {
//!   "repoName": "team-7-inventory",
//!   "summary": { "date": "2024-12-01T10:00:00.000Z", "tests": 12, "failures": 3 },
//!   "bugFixing": [
//!     { "fullName": "Challenge 1a-1 - Basic product creation ...", "success": true, "score": 15, "bucket": "bug" }
//!   ],
//!   "featureImplementation": [
//!     { "fullName": "Challenge 2a-3 - Product search functionality", "success": false, "score": 20, "bucket": "feature" }
//!   ]
//! }
//! ```
//!
//! ## Design Notes
//!
//! - `summary.tests` and `summary.failures` are copied from the report's root element and are
//!   never recomputed from the classified records.
//! - `repoName` is left out entirely when no repository name was configured.
//! - Records keep decode order (suite order, then case order) inside each list.

use crate::classifier::OutcomeClassifier;
use crate::types::{Bucket, TestReport};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// One graded test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedRecord {
    /// The display name from the `"Challenge "` marker onwards.
    pub full_name: String,
    pub success: bool,
    pub score: u32,
    pub bucket: Bucket,
}

/// Serializes as an ISO-8601 UTC timestamp with millisecond precision.
fn serialize_timestamp<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Run-level totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    #[serde(serialize_with = "serialize_timestamp")]
    pub date: DateTime<Utc>,
    pub tests: u32,
    pub failures: u32,
}

/// The aggregate payload for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
    pub summary: Summary,
    pub bug_fixing: Vec<ClassifiedRecord>,
    pub feature_implementation: Vec<ClassifiedRecord>,
}

impl GradingReport {
    /// Every record, bugs first.
    pub fn records(&self) -> impl Iterator<Item = &ClassifiedRecord> {
        self.bug_fixing.iter().chain(self.feature_implementation.iter())
    }

    /// Points earned by passing records.
    pub fn earned_points(&self) -> u32 {
        self.records().filter(|r| r.success).map(|r| r.score).sum()
    }

    /// Points available across all records.
    pub fn available_points(&self) -> u32 {
        self.records().map(|r| r.score).sum()
    }
}

/// Folds a decoded test report into a [`GradingReport`].
///
/// Cases outside the rubric are skipped without affecting `summary`.
pub fn aggregate(
    report: &TestReport,
    classifier: &OutcomeClassifier<'_>,
    repo_name: Option<String>,
    date: DateTime<Utc>,
) -> GradingReport {
    let (bug_fixing, feature_implementation): (Vec<_>, Vec<_>) = report
        .cases()
        .filter_map(|case| classifier.classify_case(case))
        .partition(|record| record.bucket == Bucket::Bug);

    GradingReport {
        repo_name,
        summary: Summary {
            date,
            tests: report.tests,
            failures: report.failures,
        },
        bug_fixing,
        feature_implementation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ScoreCatalog, ScoreEntry};
    use crate::matcher::TaxonomyMatcher;
    use crate::types::{RawTestCase, TestSuite};
    use chrono::TimeZone;
    use serde_json::{Value, json};

    fn fixed_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 1, 10, 0, 0).unwrap()
    }

    fn case(name: &str, failed: bool) -> RawTestCase {
        RawTestCase {
            display_name: name.to_string(),
            failed,
        }
    }

    fn catalog() -> ScoreCatalog {
        ScoreCatalog::new(
            vec![
                ScoreEntry::new("Challenge 1a-1 - Create", 15),
                ScoreEntry::new("Challenge 1b-1 - Read", 10),
            ],
            vec![ScoreEntry::new("Challenge 2a-3 - Search", 25)],
        )
        .unwrap()
    }

    #[test]
    fn test_partition_keeps_decode_order() {
        let catalog = catalog();
        let classifier = OutcomeClassifier::new(TaxonomyMatcher::new(&catalog));
        let report = TestReport {
            tests: 6,
            failures: 2,
            suites: vec![
                TestSuite {
                    name: None,
                    cases: vec![
                        case("S > Challenge 1b-1 - Read", false),
                        case("S > Challenge 2a-3 - Search", true),
                        case("S > no marker here", true),
                    ],
                },
                TestSuite {
                    name: None,
                    cases: vec![
                        case("S > Challenge 1a-1 - Create", false),
                        case("S > Challenge 7z-1 - Extra", false),
                        case("S > Challenge oops", false),
                    ],
                },
            ],
        };

        let graded = aggregate(&report, &classifier, None, fixed_date());

        let bugs: Vec<_> = graded.bug_fixing.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(bugs, ["Challenge 1b-1 - Read", "Challenge 1a-1 - Create"]);
        let features: Vec<_> = graded
            .feature_implementation
            .iter()
            .map(|r| (r.full_name.as_str(), r.score))
            .collect();
        assert_eq!(
            features,
            [("Challenge 2a-3 - Search", 25), ("Challenge 7z-1 - Extra", 20)]
        );
        assert_eq!(graded.summary.tests, 6);
        assert_eq!(graded.summary.failures, 2);
        assert_eq!(graded.earned_points(), 10 + 15 + 20);
        assert_eq!(graded.available_points(), 10 + 25 + 15 + 20);
    }

    #[test]
    fn test_payload_shape() {
        let graded = GradingReport {
            repo_name: Some("team-7".into()),
            summary: Summary {
                date: fixed_date(),
                tests: 1,
                failures: 0,
            },
            bug_fixing: vec![ClassifiedRecord {
                full_name: "Challenge 1a-1 - Create".into(),
                success: true,
                score: 15,
                bucket: Bucket::Bug,
            }],
            feature_implementation: vec![],
        };
        let value: Value = serde_json::to_value(&graded).unwrap();
        assert_eq!(
            value,
            json!({
                "repoName": "team-7",
                "summary": { "date": "2024-12-01T10:00:00.000Z", "tests": 1, "failures": 0 },
                "bugFixing": [
                    { "fullName": "Challenge 1a-1 - Create", "success": true, "score": 15, "bucket": "bug" }
                ],
                "featureImplementation": []
            })
        );
    }

    #[test]
    fn test_missing_repo_name_is_omitted() {
        let graded = GradingReport {
            repo_name: None,
            summary: Summary {
                date: fixed_date(),
                tests: 0,
                failures: 0,
            },
            bug_fixing: vec![],
            feature_implementation: vec![],
        };
        let value: Value = serde_json::to_value(&graded).unwrap();
        assert!(value.get("repoName").is_none());
        assert_eq!(value["summary"]["tests"], 0);
    }
}
