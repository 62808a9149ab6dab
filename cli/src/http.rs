use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ORIGIN, REFERER};
use reqwest::Client;

// stats.nba.com drops requests that don't look like they came from nba.com
const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";
const REFERER_URL: &str = "https://www.nba.com/";
const ORIGIN_URL: &str = "https://www.nba.com";

/// Create the HTTP client used for a whole run
pub fn build_client(timeout: Duration) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(REFERER, HeaderValue::from_static(REFERER_URL));
    headers.insert(ORIGIN, HeaderValue::from_static(ORIGIN_URL));

    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .pool_max_idle_per_host(2)
        .build()
        .context("Failed to create HTTP client")
}
