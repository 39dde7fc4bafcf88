//! Best-effort dispatch.
//!
//! The grading service gives no response contract, and a failed submission must never fail
//! the run. [`dispatch_best_effort`] moves the submission onto its own task; the caller may
//! [`DispatchHandle::settle`] it to wait for the attempt to finish and learn what happened,
//! but the result is a plain [`DispatchOutcome`], never an error.

use crate::error::GraderError;
use crate::report::GradingReport;
use crate::traits::sink::{ReportSink, SubmitReceipt};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// How a best-effort submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered(SubmitReceipt),
    /// The sink returned an error (transport failure or non-2xx status).
    Failed(String),
    /// The submission task panicked or was cancelled.
    Aborted(String),
}

impl DispatchOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchOutcome::Delivered(_))
    }
}

/// A submission running in the background.
#[must_use = "dropping the handle detaches the submission; call `settle` to wait for it"]
pub struct DispatchHandle {
    sink: String,
    task: JoinHandle<Result<SubmitReceipt, GraderError>>,
}

impl DispatchHandle {
    /// Waits for the attempt to finish and logs its outcome.
    pub async fn settle(self) -> DispatchOutcome {
        match self.task.await {
            Ok(Ok(receipt)) => {
                info!(sink = %self.sink, status = ?receipt.status, bytes = receipt.bytes, "Grading report submitted");
                DispatchOutcome::Delivered(receipt)
            }
            Ok(Err(e)) => {
                warn!(sink = %self.sink, error = %e, "Grading report submission failed");
                DispatchOutcome::Failed(e.to_string())
            }
            Err(e) => {
                warn!(sink = %self.sink, error = %e, "Grading report submission aborted");
                DispatchOutcome::Aborted(e.to_string())
            }
        }
    }
}

/// Starts submitting `report` to `sink` without waiting for the result.
///
/// Must be called from within a Tokio runtime.
pub fn dispatch_best_effort(sink: Arc<dyn ReportSink>, report: GradingReport) -> DispatchHandle {
    let name = sink.name().to_string();
    let task = tokio::spawn(async move { sink.submit(&report).await });
    DispatchHandle { sink: name, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Summary;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    fn empty_report() -> GradingReport {
        GradingReport {
            repo_name: None,
            summary: Summary {
                date: Utc::now(),
                tests: 0,
                failures: 0,
            },
            bug_fixing: vec![],
            feature_implementation: vec![],
        }
    }

    struct RecordingSink {
        seen: Mutex<Vec<u32>>,
    }

    #[async_trait]
    impl ReportSink for RecordingSink {
        fn name(&self) -> &str {
            "recording"
        }

        async fn submit(&self, report: &GradingReport) -> Result<SubmitReceipt, GraderError> {
            self.seen.lock().unwrap().push(report.summary.tests);
            Ok(SubmitReceipt {
                status: Some(204),
                bytes: 0,
            })
        }
    }

    struct FailingSink;

    #[async_trait]
    impl ReportSink for FailingSink {
        fn name(&self) -> &str {
            "failing"
        }

        async fn submit(&self, _report: &GradingReport) -> Result<SubmitReceipt, GraderError> {
            Err(GraderError::Transmit("connection refused".into()))
        }
    }

    struct PanickingSink;

    #[async_trait]
    impl ReportSink for PanickingSink {
        fn name(&self) -> &str {
            "panicking"
        }

        async fn submit(&self, _report: &GradingReport) -> Result<SubmitReceipt, GraderError> {
            panic!("sink blew up");
        }
    }

    #[tokio::test]
    async fn delivered_outcome_carries_receipt() {
        let sink = Arc::new(RecordingSink {
            seen: Mutex::new(vec![]),
        });
        let outcome = dispatch_best_effort(sink.clone(), empty_report()).settle().await;
        assert_eq!(
            outcome,
            DispatchOutcome::Delivered(SubmitReceipt {
                status: Some(204),
                bytes: 0
            })
        );
        assert_eq!(*sink.seen.lock().unwrap(), vec![0]);
    }

    #[tokio::test]
    async fn sink_error_becomes_failed_outcome() {
        let outcome = dispatch_best_effort(Arc::new(FailingSink), empty_report())
            .settle()
            .await;
        match outcome {
            DispatchOutcome::Failed(msg) => assert!(msg.contains("connection refused"), "{msg}"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn panic_in_sink_is_contained() {
        let outcome = dispatch_best_effort(Arc::new(PanickingSink), empty_report())
            .settle()
            .await;
        assert!(matches!(outcome, DispatchOutcome::Aborted(_)));
        assert!(!outcome.is_delivered());
    }
}
