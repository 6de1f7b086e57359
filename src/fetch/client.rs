//! HTTP client construction and single-page fetch

use crate::config::HttpConfig;
use crate::{BackupError, Result};
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Builds the HTTP client used for every page request
///
/// # Example
///
/// ```no_run
/// use jroller_backup::config::HttpConfig;
/// use jroller_backup::fetch::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page and returns its raw body
///
/// Success is exactly HTTP 200; any other status, and any transport
/// failure, is fatal to the whole run. There are no retries.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<Vec<u8>> {
    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|source| BackupError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(BackupError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(|source| BackupError::Http {
        url: url.to_string(),
        source,
    })?;

    Ok(body.to_vec())
}
