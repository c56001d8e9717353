use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, Url};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::args::DEFAULT_USER_AGENT;
use crate::error::HttpError;
use crate::metrics::Metrics;

/// Parses the platform base URL and normalizes it so request paths append to it.
///
/// # Errors
///
/// Returns an error when the URL is malformed, is not http(s), or cannot carry paths.
pub fn parse_host(host: &str) -> Result<Url, HttpError> {
    let mut url = Url::parse(host.trim()).map_err(|err| HttpError::InvalidHost {
        url: host.to_owned(),
        source: err,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(HttpError::UnsupportedScheme {
            url: host.to_owned(),
        });
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(HttpError::HostNotABase {
            url: host.to_owned(),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Builds the HTTP client shared by every simulated user.
///
/// # Errors
///
/// Returns an error when reqwest rejects the client configuration.
pub fn build_http_client(
    request_timeout: Duration,
    connect_timeout: Duration,
) -> Result<Client, HttpError> {
    Client::builder()
        .timeout(request_timeout)
        .connect_timeout(connect_timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| HttpError::BuildClientFailed { source: err })
}

/// The HTTP handle a simulated user sends requests through.
///
/// Cloning is cheap: clones share the connection pool and metrics channel.
#[derive(Clone, Debug)]
pub struct UserClient {
    client: Client,
    base_url: Url,
    metrics_tx: mpsc::Sender<Metrics>,
}

impl UserClient {
    #[must_use]
    pub const fn new(client: Client, base_url: Url, metrics_tx: mpsc::Sender<Metrics>) -> Self {
        Self {
            client,
            base_url,
            metrics_tx,
        }
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a request path (`/invoke/func`) against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the joined URL is invalid.
    pub fn url_for(&self, path: &str) -> Result<Url, HttpError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| HttpError::JoinPath {
                path: path.to_owned(),
                source: err,
            })
    }

    /// POSTs `body` as JSON to `path` and records the outcome.
    ///
    /// Never fails: transport errors, timeouts, and non-success statuses are
    /// turned into a metrics sample. Returns the status code when a full
    /// response was received.
    pub async fn post_json<T>(&self, path: &str, body: &T) -> Option<u16>
    where
        T: Serialize + ?Sized,
    {
        let name: Arc<str> = Arc::from(path);
        let start = Instant::now();

        let url = match self.url_for(path) {
            Ok(url) => url,
            Err(err) => {
                warn!("{}", err);
                self.record(Metrics::failure(name, start, false)).await;
                return None;
            }
        };

        let (sample, status) = match self.client.post(url).json(body).send().await {
            Ok(response) => {
                let status = response.status();
                match drain_response_body(response).await {
                    Ok(bytes) => {
                        if status.is_success() {
                            debug!("POST {} -> {} ({} bytes)", path, status, bytes);
                        } else {
                            warn!("POST {} -> {}", path, status);
                        }
                        (
                            Metrics::response(name, start, status.as_u16()),
                            Some(status.as_u16()),
                        )
                    }
                    Err(err) => {
                        warn!("POST {}: failed to read response body: {}", path, err);
                        (Metrics::failure(name, start, err.is_timeout()), None)
                    }
                }
            }
            Err(err) => {
                warn!("POST {} failed: {}", path, err);
                (Metrics::failure(name, start, err.is_timeout()), None)
            }
        };

        self.record(sample).await;
        status
    }

    async fn record(&self, sample: Metrics) {
        if self.metrics_tx.send(sample).await.is_err() {
            debug!("Metrics collector closed; dropping sample.");
        }
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
