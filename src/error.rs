use std::string::FromUtf8Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MyJvnError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// `body` holds the full response body of the last attempt.
    #[error("Server error {status} after {attempts} attempts. Response preview: {}", preview(.body))]
    ServerError {
        status: u16,
        attempts: u32,
        body: String,
    },

    /// `body` holds the full response body as the server sent it.
    #[error("Client error {status}. Response preview: {}", preview(.body))]
    ClientError { status: u16, body: String },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(r#"Unsupported format {0:?}: must be either absent, "xml" or "json""#)]
    UnsupportedFormat(String),

    #[error("target must not be nil")]
    NullTarget,

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("XML parsing error: {0}")]
    XmlError(String),

    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] FromUtf8Error),
}

/// Broad classification of a [`MyJvnError`], used to decide whether a failed
/// call is worth repeating at the application level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Detected before any I/O: bad base URL, unknown format selector, missing target.
    Configuration,
    /// Connection-level failure (DNS, reset, timeout).
    Transport,
    /// HTTP status 500 and above.
    Server,
    /// HTTP status below 500 that is not a success.
    Client,
    /// Malformed XML, JSON or UTF-8 in the response body.
    Decode,
    /// The caller's cancellation token fired.
    Cancelled,
}

impl MyJvnError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MyJvnError::RequestError(_) => ErrorKind::Transport,
            MyJvnError::ServerError { .. } => ErrorKind::Server,
            MyJvnError::ClientError { .. } => ErrorKind::Client,
            MyJvnError::Cancelled => ErrorKind::Cancelled,
            MyJvnError::ConfigError(_)
            | MyJvnError::UnsupportedFormat(_)
            | MyJvnError::NullTarget => ErrorKind::Configuration,
            MyJvnError::JsonError(_) | MyJvnError::XmlError(_) | MyJvnError::Utf8Error(_) => {
                ErrorKind::Decode
            }
        }
    }

    /// Transport and server failures are transient; everything else will fail
    /// the same way again. Both transient kinds have already been retried by the
    /// client before they reach the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Transport | ErrorKind::Server)
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            MyJvnError::ServerError { status, .. } | MyJvnError::ClientError { status, .. } => {
                Some(*status)
            }
            MyJvnError::RequestError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<quick_xml::DeError> for MyJvnError {
    fn from(error: quick_xml::DeError) -> Self {
        MyJvnError::XmlError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MyJvnError>;

const ERROR_PREVIEW_CHARS: usize = 200;

fn preview(body: &str) -> String {
    body.chars().take(ERROR_PREVIEW_CHARS).collect()
}
