use std::time::Duration;

/// Configuration for the MyJVN client
#[derive(Debug, Clone)]
pub struct MyJvnConfig {
    /// User agent string for HTTP requests
    pub user_agent: String,
    /// HTTP request timeout, applied to each attempt
    pub timeout: Duration,
    /// Scheme and host of the JVN iPedia service, with a trailing slash
    pub base_url: String,
    /// Path of the MyJVN API below `base_url`
    pub api_path: String,
    /// Retry behaviour for transport failures and 5xx responses
    pub retry: RetryPolicy,
}

/// Exponential backoff settings for the retrying transport.
///
/// The delay before retry `n` (0-indexed) is `initial_backoff * 2^n`, capped at
/// `max_backoff`, with ±20% jitter.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Number of retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry
    pub initial_backoff: Duration,
    /// Upper bound for a single delay
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 7,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(64),
        }
    }
}

impl Default for MyJvnConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("myjvn-rs/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(30),
            base_url: "https://jvndb.jvn.jp/".to_string(),
            api_path: "/myjvn".to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl MyJvnConfig {
    /// Creates a configuration pointing at a different host, keeping the other defaults.
    ///
    /// ```rust
    /// use myjvn::{MyJvn, MyJvnConfig};
    ///
    /// let config = MyJvnConfig::with_base_url("http://127.0.0.1:8080/");
    /// let client = MyJvn::with_config(config)?;
    /// # Ok::<(), myjvn::MyJvnError>(())
    /// ```
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Full URL of the API endpoint every method is sent to.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_path.trim_start_matches('/')
        )
    }
}
