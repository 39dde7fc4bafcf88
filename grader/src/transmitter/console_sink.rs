use crate::error::GraderError;
use crate::report::GradingReport;
use crate::traits::sink::{ReportSink, SubmitReceipt};
use async_trait::async_trait;

/// Prints the payload as pretty JSON on stdout instead of sending it anywhere.
pub struct ConsoleSink;

#[async_trait]
impl ReportSink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    async fn submit(&self, report: &GradingReport) -> Result<SubmitReceipt, GraderError> {
        let rendered = serde_json::to_string_pretty(report)?;
        println!("{rendered}");
        Ok(SubmitReceipt {
            status: None,
            bytes: rendered.len(),
        })
    }
}
