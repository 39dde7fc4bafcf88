use anyhow::{Context, Result, bail};
use clap::Parser;
use grader::GradingJob;
use grader::catalog::ScoreCatalog;
use grader::traits::sink::ReportSink;
use grader::transmitter::{ConsoleSink, HttpReportSink, dispatch_best_effort};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use util::config::AppConfig;
use util::logging::init_logging;

/// Grade a finished test run and submit the result to the grading service.
///
/// Every flag falls back to its environment variable (see `AppConfig`).
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JUnit XML report written by the test run [env: TEST_REPORT_PATH]
    #[arg(long)]
    report: Option<PathBuf>,
    /// Repository name copied into the payload [env: CODE_COMMIT_REPO]
    #[arg(long)]
    repo_name: Option<String>,
    /// Grading service URL [env: GRADING_ENDPOINT]
    #[arg(long)]
    endpoint: Option<String>,
    /// JSON score catalog replacing the built-in rubric [env: SCORE_CATALOG_PATH]
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Print the payload without submitting it
    #[arg(long)]
    dry_run: bool,
    /// Exit non-zero when the submission does not go through
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::global().clone();
    let _log_guard = init_logging(&config.log_file, &config.log_level, config.log_to_stdout);

    let report_path = args
        .report
        .unwrap_or_else(|| PathBuf::from(&config.report_path));
    let repo_name = args.repo_name.or(config.repo_name);
    let endpoint = args.endpoint.unwrap_or(config.grading_endpoint);
    let catalog_path = args.catalog.or(config.score_catalog_path.map(PathBuf::from));

    info!(
        project = %config.project_name,
        report = %report_path.display(),
        "Starting grading run"
    );

    let catalog = ScoreCatalog::load(catalog_path.as_deref()).context("Failed to load score catalog")?;
    let report = GradingJob::new(&report_path, &catalog)
        .with_repo_name(repo_name)
        .build_report()
        .with_context(|| format!("Failed to grade {}", report_path.display()))?;

    // Echo the payload so it shows up in the CI log.
    ConsoleSink
        .submit(&report)
        .await
        .context("Failed to render grading report")?;

    if args.dry_run {
        info!("Dry run, not submitting");
        return Ok(());
    }

    let sink = HttpReportSink::new(endpoint, config.request_timeout_secs)?;
    let outcome = dispatch_best_effort(Arc::new(sink), report).settle().await;

    if args.strict && !outcome.is_delivered() {
        bail!("Grading report was not delivered: {outcome:?}");
    }
    Ok(())
}
