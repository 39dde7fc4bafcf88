//! Ambient plumbing shared across the grader workspace: configuration, logging and HTTP.

pub mod config;
pub mod http;
pub mod logging;
