use reqwest::Client;
use std::time::Duration;

/// Builds the client used for outbound grading calls.
///
/// `timeout_secs` caps the whole request; redirects are limited to 5 hops.
pub fn build_client(timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
}
