//!
//! File Loader Utility
//!
//! Loads the raw test report artifact. The test runner is assumed to have finished writing
//! it before the grader starts, so there is a single read and no retry.
//!
//! # Error Handling
//!
//! Every failure is reported as [`GraderError::Read`]: missing path, a directory, a file
//! over [`MAX_REPORT_SIZE`], unreadable bytes or non UTF-8 content.

use crate::error::GraderError;
use std::fs;
use std::path::Path;
use tracing::{debug, error};

/// Maximum accepted artifact size.
pub const MAX_REPORT_SIZE: u64 = 16 * 1024 * 1024; // 16MB

/// Checks that a file exists, is a file, and does not exceed `max_size`.
fn check_file(path: &Path, max_size: u64) -> Result<u64, GraderError> {
    if !path.exists() {
        error!("File not found: {}", path.display());
        return Err(GraderError::Read(format!("file not found: {}", path.display())));
    }

    if !path.is_file() {
        error!("Not a file: {}", path.display());
        return Err(GraderError::Read(format!("not a file: {}", path.display())));
    }

    let metadata = fs::metadata(path).map_err(|e| {
        error!("File unreadable: {} - {}", path.display(), e);
        GraderError::Read(format!("unreadable: {}: {e}", path.display()))
    })?;

    if metadata.len() > max_size {
        error!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            max_size
        );
        return Err(GraderError::Read(format!(
            "file too large: {} ({} bytes)",
            path.display(),
            metadata.len()
        )));
    }

    Ok(metadata.len())
}

/// Reads the report artifact at `path` as text.
pub fn load_report(path: &Path) -> Result<String, GraderError> {
    let size = check_file(path, MAX_REPORT_SIZE)?;
    let contents = fs::read_to_string(path).map_err(|e| {
        error!("Failed to read report {}: {}", path.display(), e);
        GraderError::Read(format!("{}: {e}", path.display()))
    })?;
    debug!(path = %path.display(), bytes = size, "Loaded test report");
    Ok(contents)
}
