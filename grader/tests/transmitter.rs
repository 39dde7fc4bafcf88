//tests/transmitter.rs
use chrono::{TimeZone, Utc};
use grader::error::GraderError;
use grader::report::{ClassifiedRecord, GradingReport, Summary};
use grader::traits::sink::ReportSink;
use grader::transmitter::{DispatchOutcome, HttpReportSink, dispatch_best_effort};
use grader::types::Bucket;
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

struct CapturedRequest {
    head: String,
    body: Vec<u8>,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<String> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim().to_string())
        })
    }
}

/// Accepts one connection, captures the request and answers with `status_line`.
async fn one_shot_server(status_line: &'static str) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let mut request = CapturedRequest {
            head,
            body: buf[header_end..].to_vec(),
        };
        let expected: usize = request
            .header("content-length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        while request.body.len() < expected {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.body.extend_from_slice(&chunk[..n]);
        }

        let response = format!("{status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{addr}/assessments/report"), handle)
}

fn sample_report() -> GradingReport {
    GradingReport {
        repo_name: Some("team-7-inventory".into()),
        summary: Summary {
            date: Utc.with_ymd_and_hms(2024, 12, 1, 10, 0, 0).unwrap(),
            tests: 2,
            failures: 1,
        },
        bug_fixing: vec![ClassifiedRecord {
            full_name: "Challenge 1a-1 - Basic product creation with required fields".into(),
            success: true,
            score: 15,
            bucket: Bucket::Bug,
        }],
        feature_implementation: vec![ClassifiedRecord {
            full_name: "Challenge 2a-3 - Product search functionality".into(),
            success: false,
            score: 20,
            bucket: Bucket::Feature,
        }],
    }
}

#[tokio::test]
async fn posts_json_with_exact_content_length() {
    let (endpoint, server) = one_shot_server("HTTP/1.1 200 OK").await;
    let sink = HttpReportSink::new(endpoint, 5).unwrap();

    let receipt = sink.submit(&sample_report()).await.expect("submit should succeed");
    let request = server.await.unwrap();

    assert!(
        request.head.starts_with("POST /assessments/report HTTP/1.1"),
        "unexpected request line: {}",
        request.head
    );
    assert_eq!(request.header("content-type").as_deref(), Some("application/json"));
    assert_eq!(
        request.header("content-length"),
        Some(request.body.len().to_string())
    );
    assert_eq!(receipt.bytes, request.body.len());
    assert_eq!(receipt.status, Some(200));

    let body: Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body["repoName"], "team-7-inventory");
    assert_eq!(body["summary"]["date"], "2024-12-01T10:00:00.000Z");
    assert_eq!(body["summary"]["tests"], 2);
    assert_eq!(body["bugFixing"][0]["score"], 15);
    assert_eq!(body["featureImplementation"][0]["success"], false);
}

#[tokio::test]
async fn non_success_status_is_a_transmit_error_on_the_strict_path() {
    let (endpoint, server) = one_shot_server("HTTP/1.1 500 Internal Server Error").await;
    let sink = HttpReportSink::new(endpoint, 5).unwrap();

    let err = sink.submit(&sample_report()).await.unwrap_err();
    server.await.unwrap();

    match err {
        GraderError::Transmit(msg) => assert!(msg.contains("500"), "{msg}"),
        other => panic!("expected Transmit error, got {other:?}"),
    }
}

#[tokio::test]
async fn best_effort_dispatch_swallows_server_errors() {
    let (endpoint, server) = one_shot_server("HTTP/1.1 503 Service Unavailable").await;
    let sink = Arc::new(HttpReportSink::new(endpoint, 5).unwrap());

    let outcome = dispatch_best_effort(sink, sample_report()).settle().await;
    server.await.unwrap();

    assert!(matches!(outcome, DispatchOutcome::Failed(_)));
}

#[tokio::test]
async fn best_effort_dispatch_swallows_connection_errors() {
    // Grab a free port, then close it so nothing is listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let sink = Arc::new(HttpReportSink::new(format!("http://{addr}/assessments/report"), 2).unwrap());
    let outcome = dispatch_best_effort(sink, sample_report()).settle().await;

    assert!(matches!(outcome, DispatchOutcome::Failed(msg) if msg.contains("POST")));
}
