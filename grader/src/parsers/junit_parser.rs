//! JUnit Report Parser
//!
//! This module provides the [`JunitReportParser`] for decoding a JUnit XML test report (as
//! written by the test runner's `junit` reporter) into a [`TestReport`].
//!
//! # Expected Structure
//!
//! ```xml
//! <testsuites tests="12" failures="3" ...>
//!   <testsuite name="tests/challenge01.test.js" ...>
//!     <testcase name="InventoryMaster Challenge Tests &gt; Challenge 1a-1 - ..." .../>
//!     <testcase name="...">
//!       <failure message="expected 201" type="AssertionError">...</failure>
//!     </testcase>
//!   </testsuite>
//!   ...
//! </testsuites>
//! ```
//!
//! - The root must be `<testsuites>` with integer `tests` and `failures` attributes.
//! - Every `<testcase>` needs a `name`; a `<failure>` child marks it failed. `<skipped/>` and
//!   `<error>` children do not.
//! - Nested `<testsuite>` elements are flattened in the order they open.
//! - `<testcase>` elements outside any suite are ignored.
//!
//! # Error Handling
//!
//! Any structural problem is reported as [`GraderError::Decode`] with the reason.

use crate::error::GraderError;
use crate::traits::parser::Parser;
use crate::types::{RawTestCase, TestReport, TestSuite};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tracing::debug;

const ROOT: &[u8] = b"testsuites";
const SUITE: &[u8] = b"testsuite";
const CASE: &[u8] = b"testcase";
const FAILURE: &[u8] = b"failure";

/// Parser for JUnit XML reports.
pub struct JunitReportParser;

/// Reads an attribute value, XML-unescaped.
fn attribute(element: &BytesStart<'_>, key: &str) -> Result<Option<String>, GraderError> {
    let attr = element
        .try_get_attribute(key)
        .map_err(|e| GraderError::Decode(format!("malformed attribute '{key}': {e}")))?;
    attr.map(|a| {
        a.unescape_value()
            .map(|v| v.into_owned())
            .map_err(|e| GraderError::Decode(format!("cannot unescape '{key}': {e}")))
    })
    .transpose()
}

fn run_total(root: &BytesStart<'_>, key: &str) -> Result<u32, GraderError> {
    let raw = attribute(root, key)?.ok_or_else(|| {
        GraderError::Decode(format!("<testsuites> is missing the '{key}' attribute"))
    })?;
    raw.trim().parse::<u32>().map_err(|_| {
        GraderError::Decode(format!("'{key}' must be a non-negative integer, got '{raw}'"))
    })
}

/// Incremental document state while walking the event stream.
#[derive(Default)]
struct DecodeState {
    depth: usize,
    root_closed: bool,
    totals: Option<(u32, u32)>,
    suites: Vec<TestSuite>,
    /// Indices into `suites` for every `<testsuite>` currently open.
    open_suites: Vec<usize>,
    open_case: Option<RawTestCase>,
}

impl DecodeState {
    /// Handles an opening (or self-closing) element at the current depth.
    fn open(&mut self, element: &BytesStart<'_>, self_closing: bool) -> Result<(), GraderError> {
        let name = element.name();
        let name = name.as_ref();

        if self.depth == 0 {
            if self.root_closed {
                return Err(GraderError::Decode(
                    "unexpected element after the root element".to_string(),
                ));
            }
            if name != ROOT {
                return Err(GraderError::Decode(format!(
                    "expected <testsuites> root element, found <{}>",
                    String::from_utf8_lossy(name)
                )));
            }
            self.totals = Some((run_total(element, "tests")?, run_total(element, "failures")?));
            if self_closing {
                self.root_closed = true;
            }
            return Ok(());
        }

        match name {
            SUITE if !self_closing => {
                self.suites.push(TestSuite {
                    name: attribute(element, "name")?,
                    cases: Vec::new(),
                });
                self.open_suites.push(self.suites.len() - 1);
            }
            SUITE => self.suites.push(TestSuite {
                name: attribute(element, "name")?,
                cases: Vec::new(),
            }),
            CASE => {
                let display_name = attribute(element, "name")?.ok_or_else(|| {
                    GraderError::Decode("<testcase> is missing the 'name' attribute".to_string())
                })?;
                let case = RawTestCase {
                    display_name,
                    failed: false,
                };
                if self_closing {
                    self.close_case(case);
                } else {
                    self.open_case = Some(case);
                }
            }
            FAILURE => {
                if let Some(case) = self.open_case.as_mut() {
                    case.failed = true;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handles a closing tag. quick-xml has already checked it matches its opener.
    fn close(&mut self, name: &[u8]) {
        match name {
            SUITE => {
                self.open_suites.pop();
            }
            CASE => {
                if let Some(case) = self.open_case.take() {
                    self.close_case(case);
                }
            }
            _ => {}
        }
        if self.depth == 0 {
            self.root_closed = true;
        }
    }

    fn close_case(&mut self, case: RawTestCase) {
        match self.open_suites.last() {
            Some(&idx) => self.suites[idx].cases.push(case),
            None => debug!(name = %case.display_name, "Ignoring <testcase> outside any <testsuite>"),
        }
    }

    fn finish(self) -> Result<TestReport, GraderError> {
        let (tests, failures) = self
            .totals
            .ok_or_else(|| GraderError::Decode("document has no root element".to_string()))?;
        if !self.root_closed {
            return Err(GraderError::Decode(
                "unexpected end of document: <testsuites> is not closed".to_string(),
            ));
        }
        Ok(TestReport {
            tests,
            failures,
            suites: self.suites,
        })
    }
}

impl<'a> Parser<&'a str, TestReport> for JunitReportParser {
    /// Parses JUnit XML into a [`TestReport`].
    ///
    /// # Errors
    ///
    /// Returns [`GraderError::Decode`] if the document is not well-formed, has the wrong root,
    /// lacks integer `tests`/`failures` totals, or contains an unnamed `<testcase>`.
    fn parse(&self, raw: &'a str) -> Result<TestReport, GraderError> {
        let mut reader = Reader::from_str(raw);
        reader.config_mut().trim_text(true);

        let mut state = DecodeState::default();
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    state.open(&e, false)?;
                    state.depth += 1;
                }
                Ok(Event::Empty(e)) => state.open(&e, true)?,
                Ok(Event::End(e)) => {
                    state.depth = state.depth.saturating_sub(1);
                    state.close(e.name().as_ref());
                }
                Ok(Event::Text(t)) if state.depth == 0 && !t.is_empty() => {
                    return Err(GraderError::Decode(
                        "text outside the root element".to_string(),
                    ));
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(GraderError::Decode(format!(
                        "malformed XML at byte {}: {e}",
                        reader.buffer_position()
                    )));
                }
            }
        }

        let report = state.finish()?;
        debug!(
            tests = report.tests,
            failures = report.failures,
            suites = report.suites.len(),
            cases = report.cases().count(),
            "Decoded JUnit report"
        );
        Ok(report)
    }
}
