//! # Report Transmitter
//!
//! Sinks that accept a finished [`crate::report::GradingReport`], and the best-effort
//! dispatch used by the pipeline.
//!
//! - [`http_sink`]: POSTs the JSON payload to the grading service.
//! - [`console_sink`]: prints the payload; used for dry runs.
//! - [`dispatch`]: runs a submission as a detached task whose outcome is logged, never raised.

pub mod console_sink;
pub mod dispatch;
pub mod http_sink;

pub use console_sink::ConsoleSink;
pub use dispatch::{DispatchHandle, DispatchOutcome, dispatch_best_effort};
pub use http_sink::HttpReportSink;
