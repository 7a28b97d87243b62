use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use super::config::{MyJvnConfig, RetryPolicy};
use super::error::{MyJvnError, Result};
use super::options::RequestDescriptor;
use super::parsing::ResponseDecoder;

/// HTTP client for the MyJVN API with built-in retry logic.
///
/// `MyJvn` is the entry point for every API method. Each call builds its own
/// query from the caller's [`Parameters`](crate::Parameters), sends one `GET` to
/// the configured endpoint, and decodes the body into a typed record. The only
/// state shared between calls is the underlying `reqwest::Client` connection
/// pool, so a single `MyJvn` can be cloned and used from many tasks at once.
///
/// # Retries
///
/// Transport failures and responses with status 500 or above are retried with
/// exponential backoff, up to [`RetryPolicy::max_retries`] times (7 by default,
/// for 8 attempts in total). Responses below 500, client errors included, are
/// never retried.
///
/// ```text
/// attempt 1 ──503──▶ sleep ~0.5s ──▶ attempt 2 ──503──▶ sleep ~1s ──▶ … ──▶ attempt 8
/// ```
///
/// # Cancellation
///
/// Every operation takes a `CancellationToken`. Cancelling it aborts the call
/// at whichever await point it is on and returns
/// [`MyJvnError::Cancelled`].
///
/// # Examples
///
/// ```rust
/// # use myjvn::MyJvn;
/// let client = MyJvn::new()?;
/// # Ok::<(), myjvn::MyJvnError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MyJvn {
    /// HTTP client for making requests
    pub(crate) client: reqwest::Client,

    /// Full URL of the API endpoint
    pub(crate) endpoint: String,

    /// Backoff settings for the retrying transport
    pub(crate) retry: RetryPolicy,
}

impl MyJvn {
    /// Creates a client for the public JVN iPedia service with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(MyJvnConfig::default())
    }

    /// Creates a client with custom configuration settings.
    ///
    /// # Errors
    ///
    /// Returns `MyJvnError::ConfigError` if the user agent is malformed, the
    /// endpoint is not an absolute URL, or the HTTP client cannot be built.
    pub fn with_config(config: MyJvnConfig) -> Result<Self> {
        Self::with_http_client(config, None)
    }

    /// Creates a client around a pre-configured `reqwest::Client`.
    ///
    /// When `client` is `None` a client is built from `config.user_agent` and
    /// `config.timeout`; otherwise those two settings are left to the given client.
    pub fn with_http_client(config: MyJvnConfig, client: Option<reqwest::Client>) -> Result<Self> {
        let endpoint = config.endpoint();
        Url::parse(&endpoint).map_err(|e| {
            MyJvnError::ConfigError(format!("Invalid endpoint {}: {}", endpoint, e))
        })?;

        let client = match client {
            Some(client) => client,
            None => {
                let mut headers = HeaderMap::new();
                headers.insert(
                    USER_AGENT,
                    HeaderValue::from_str(&config.user_agent).map_err(|e| {
                        MyJvnError::ConfigError(format!("Invalid user agent: {}", e))
                    })?,
                );

                reqwest::Client::builder()
                    .default_headers(headers)
                    .timeout(config.timeout)
                    .build()
                    .map_err(|e| {
                        MyJvnError::ConfigError(format!("Failed to build HTTP client: {}", e))
                    })?
            }
        };

        Ok(MyJvn {
            client,
            endpoint,
            retry: config.retry,
        })
    }

    /// Returns the URL every request is sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Calculates the wait before retry number `retry` (0-indexed).
    ///
    /// The formula is `min(initial × 2^retry, max) ± 20%`.
    fn calculate_backoff(&self, retry: u32) -> Duration {
        let initial_ms = self.retry.initial_backoff.as_millis() as u64;
        let max_ms = self.retry.max_backoff.as_millis() as u64;
        let backoff_ms = initial_ms
            .saturating_mul(2_u64.saturating_pow(retry))
            .min(max_ms);
        // ±20% jitter
        let jitter = (backoff_ms as f64 * 0.2 * (fastrand::f64() * 2.0 - 1.0)) as i64;
        Duration::from_millis((backoff_ms as i64 + jitter).max(0) as u64)
    }

    /// Sends a `GET` to `url`, retrying transport failures and 5xx responses.
    ///
    /// Returns the first response with a status below 500. When the retry budget
    /// runs out, returns the last 5xx response, or the last transport error.
    ///
    /// # Errors
    ///
    /// * `MyJvnError::RequestError` - the final attempt failed at the transport level
    /// * `MyJvnError::Cancelled` - `cancel` fired before a response arrived
    pub async fn send_with_retry(&self, url: &Url, cancel: &CancellationToken) -> Result<Response> {
        let max_retries = self.retry.max_retries;
        let mut retries = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(MyJvnError::Cancelled);
            }

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(MyJvnError::Cancelled),
                result = self.client.get(url.clone()).send() => result,
            };

            let backoff = match result {
                Ok(response) if !is_retryable_status(response.status()) => return Ok(response),
                Ok(response) => {
                    if retries >= max_retries {
                        tracing::error!(
                            "Server error {} for {}. Giving up after {} attempts.",
                            response.status(),
                            url,
                            retries + 1
                        );
                        return Ok(response);
                    }
                    let backoff = self.calculate_backoff(retries);
                    tracing::warn!(
                        "Server error {} for {}. Attempt {}/{}. Retrying in {:?}.",
                        response.status(),
                        url,
                        retries + 1,
                        max_retries + 1,
                        backoff
                    );
                    backoff
                }
                Err(e) => {
                    if retries >= max_retries {
                        tracing::error!(
                            "Request failed for {}: {}. Giving up after {} attempts.",
                            url,
                            e,
                            retries + 1
                        );
                        return Err(MyJvnError::RequestError(e));
                    }
                    let backoff = self.calculate_backoff(retries);
                    tracing::warn!(
                        "Request failed for {}: {:?}. Attempt {}/{}. Retrying in {:?}.",
                        url,
                        e,
                        retries + 1,
                        max_retries + 1,
                        backoff
                    );
                    backoff
                }
            };

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(MyJvnError::Cancelled),
                _ = sleep(backoff) => {}
            }
            retries += 1;
        }
    }

    /// Runs one request through the whole pipeline: encode, send, decode.
    pub(crate) async fn fetch<T>(
        &self,
        request: &RequestDescriptor,
        cancel: &CancellationToken,
    ) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let url = request.to_url(&self.endpoint)?;
        tracing::debug!("Requesting {} ({})", request.method, url);

        let response = self.send_with_retry(&url, cancel).await?;
        let status = response.status();

        if status.is_server_error() {
            let body = error_body(response, cancel).await?;
            return Err(MyJvnError::ServerError {
                status: status.as_u16(),
                attempts: self.retry.max_retries + 1,
                body,
            });
        }
        if !status.is_success() {
            let body = error_body(response, cancel).await?;
            return Err(MyJvnError::ClientError {
                status: status.as_u16(),
                body,
            });
        }

        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(MyJvnError::Cancelled),
            body = response.bytes() => body.map_err(MyJvnError::RequestError)?,
        };
        let decoder = ResponseDecoder::new(request.format());
        tracing::debug!(
            "Decoding {} bytes of {} for {}",
            body.len(),
            decoder.format(),
            request.method
        );
        decoder.decode(&body)
    }
}

/// Reports whether a response status should be retried: any status of 500 or above.
pub fn is_retryable_status(status: StatusCode) -> bool {
    status.as_u16() >= 500
}

/// Reads the body of an error response. A body that fails mid-read is
/// replaced by a placeholder so the status still reaches the caller.
async fn error_body(response: Response, cancel: &CancellationToken) -> Result<String> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(MyJvnError::Cancelled),
        body = response.text() => {
            Ok(body.unwrap_or_else(|_| "Failed to read response body".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_backoff() {
        let client = MyJvn::new().unwrap();
        let delays: Vec<Duration> = (0..7).map(|r| client.calculate_backoff(r)).collect();

        // Strictly increasing across the whole default schedule
        for pair in delays.windows(2) {
            assert!(pair[0] < pair[1], "{:?} !< {:?}", pair[0], pair[1]);
        }

        assert!(delays[0].as_millis() >= 400 && delays[0].as_millis() <= 600);
        assert!(delays[1].as_millis() >= 800 && delays[1].as_millis() <= 1200);
        assert!(delays[6].as_millis() >= 25_600 && delays[6].as_millis() <= 38_400);
    }

    #[test]
    fn test_backoff_is_capped() {
        let mut config = MyJvnConfig::default();
        config.retry.max_backoff = Duration::from_secs(2);
        let client = MyJvn::with_config(config).unwrap();
        assert!(client.calculate_backoff(10).as_millis() <= 2_400);
        assert!(client.calculate_backoff(60).as_millis() <= 2_400);
    }

    #[test]
    fn test_retryable_status() {
        assert!(is_retryable_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_retryable_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_retryable_status(StatusCode::NOT_FOUND));
        assert!(!is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(!is_retryable_status(StatusCode::OK));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = MyJvnConfig::with_base_url("not a url");
        let result = MyJvn::with_config(config);
        assert!(matches!(result, Err(MyJvnError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_user_agent() {
        let config = MyJvnConfig {
            user_agent: "bad\nagent".to_string(),
            ..MyJvnConfig::default()
        };
        assert!(matches!(
            MyJvn::with_config(config),
            Err(MyJvnError::ConfigError(_))
        ));
    }

    #[test]
    fn test_with_http_client() {
        let http = reqwest::Client::new();
        let client = MyJvn::with_http_client(MyJvnConfig::default(), Some(http)).unwrap();
        assert_eq!(client.endpoint(), "https://jvndb.jvn.jp/myjvn");
    }
}
