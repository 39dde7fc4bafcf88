//!
//! # Report Sink Trait
//!
//! A [`ReportSink`] is where a finished [`GradingReport`] goes: the remote grading service in
//! production, the console for dry runs, or a recorder in tests.
//!

use crate::error::GraderError;
use crate::report::GradingReport;
use async_trait::async_trait;

/// What a sink reports back after accepting a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// HTTP status returned by the remote side, when there is one.
    pub status: Option<u16>,
    /// Size of the serialized payload in bytes.
    pub bytes: usize,
}

/// A destination for grading reports.
///
/// `submit` is the strict path: it returns an error for transport failures and non-2xx
/// responses. Callers that must not depend on the outcome go through
/// [`crate::transmitter::dispatch_best_effort`] instead.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    async fn submit(&self, report: &GradingReport) -> Result<SubmitReceipt, GraderError>;
}
