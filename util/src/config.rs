//! Global grader configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from `.env` and environment variables.
//! It provides thread-safe access and mutation for tests or CLI overrides.
//!
//! Only the binary reads the singleton. Library code receives every value it needs
//! (report path, repo name, endpoint, catalog) explicitly.

use std::env;
use std::sync::{OnceLock, RwLock, RwLockReadGuard};

/// Endpoint the grading service accepts reports on.
pub const DEFAULT_GRADING_ENDPOINT: &str = "https://app.devgrade.io/assessments/report";

/// Location the test runner writes its JUnit report to, relative to the grader's working directory.
pub const DEFAULT_REPORT_PATH: &str = "../test-results.xml";

/// Represents the complete grader configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    /// Path of the JUnit XML artifact produced by the test run.
    pub report_path: String,
    /// Repository identifier inserted verbatim into the payload. `None` when unset.
    pub repo_name: Option<String>,
    pub grading_endpoint: String,
    /// Optional JSON catalog overriding the embedded one.
    pub score_catalog_path: Option<String>,
    pub request_timeout_secs: u64,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.into())
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Malformed numeric or boolean values fall back to their defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: var_or("APP_ENV", "development"),
            project_name: var_or("PROJECT_NAME", "challenge-grader"),
            log_level: var_or("LOG_LEVEL", "grader=info"),
            log_file: var_or("LOG_FILE", "grader.log"),
            log_to_stdout: env::var("LOG_TO_STDOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            report_path: var_or("TEST_REPORT_PATH", DEFAULT_REPORT_PATH),
            // Inserted verbatim; an empty value still counts as "set".
            repo_name: env::var("CODE_COMMIT_REPO").ok(),
            grading_endpoint: var_or("GRADING_ENDPOINT", DEFAULT_GRADING_ENDPOINT),
            score_catalog_path: non_empty_var("SCORE_CATALOG_PATH"),
            request_timeout_secs: env::var("GRADING_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn global() -> RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    /// Generic internal setter for any field in the config.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }

    pub fn set_report_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.report_path = value.into());
    }

    pub fn set_repo_name(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.repo_name = Some(value.into()));
    }

    pub fn set_grading_endpoint(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.grading_endpoint = value.into());
    }

    pub fn set_score_catalog_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.score_catalog_path = Some(value.into()));
    }

    pub fn set_request_timeout_secs(value: u64) {
        AppConfig::set_field(|cfg| cfg.request_timeout_secs = value);
    }
}
