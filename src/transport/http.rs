//! HTTP transport backed by a blocking reqwest client

use super::error::TransportError;
use super::{Completion, Transport};
use crate::config::BrowserConfig;
use rayon::{ThreadPool, ThreadPoolBuilder};
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::{debug, warn};

/// Runs each request on a dedicated worker pool
///
/// The pool is separate from rayon's global pool so that slow downloads
/// never starve other parallel work in the host process.
pub struct HttpTransport {
    client: Client,
    pool: ThreadPool,
}

impl HttpTransport {
    /// Build a transport from the browser configuration
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the API token is not a valid header value,
    /// the HTTP client cannot be built, or the worker pool cannot start.
    pub fn new(config: &BrowserConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.api_token {
            let value = HeaderValue::from_str(&format!("Token {token}"))
                .map_err(|e| TransportError::InvalidHeader(e.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("asset-browser/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.worker_threads.max(1))
            .thread_name(|i| format!("asset-browser-http-{i}"))
            .build()?;

        Ok(Self { client, pool })
    }
}

impl Transport for HttpTransport {
    fn issue(&self, url: &str, on_complete: Completion) {
        let client = self.client.clone();
        let url = url.to_string();

        self.pool.spawn(move || {
            let result = fetch(&client, &url);
            if let Err(e) = &result {
                warn!(%url, error = %e, "request failed");
            }
            on_complete(result);
        });
    }
}

fn fetch(client: &Client, url: &str) -> Result<Vec<u8>, TransportError> {
    debug!(%url, "GET");
    let response = client.get(url).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response.bytes()?.to_vec())
}
