use crate::error::GraderError;
use crate::report::GradingReport;
use crate::traits::sink::{ReportSink, SubmitReceipt};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

/// Submits reports to the grading service with a single POST.
pub struct HttpReportSink {
    client: Client,
    endpoint: String,
}

impl HttpReportSink {
    /// Builds a sink with its own client capped at `timeout_secs` per request.
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self, GraderError> {
        let client = util::http::build_client(timeout_secs)
            .map_err(|e| GraderError::Transmit(format!("cannot build HTTP client: {e}")))?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReportSink for HttpReportSink {
    fn name(&self) -> &str {
        "grading-service"
    }

    async fn submit(&self, report: &GradingReport) -> Result<SubmitReceipt, GraderError> {
        let body = serde_json::to_vec(report)?;
        let bytes = body.len();

        // A buffered body makes reqwest send the exact Content-Length.
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| GraderError::Transmit(format!("POST {} failed: {e}", self.endpoint)))?;

        let status = response.status();
        debug!(endpoint = %self.endpoint, %status, bytes, "Grading service responded");
        if !status.is_success() {
            return Err(GraderError::Transmit(format!(
                "POST {} returned {status}",
                self.endpoint
            )));
        }

        Ok(SubmitReceipt {
            status: Some(status.as_u16()),
            bytes,
        })
    }
}
