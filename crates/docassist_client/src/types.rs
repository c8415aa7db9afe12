use std::fmt;
use std::time::Duration;

pub type JobId = u64;

/// Connection parameters shared by the ask and ingest services.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Upper bound on a whole exchange. A hung backend resolves as
    /// `FailureKind::Timeout` instead of leaving the caller stuck.
    pub request_timeout: Duration,
}

impl ClientSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Completion events emitted back to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    AnswerReady {
        result: Result<String, ClientError>,
    },
    UploadCompleted {
        job_id: JobId,
        result: Result<String, ClientError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ClientError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClientError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    /// Response body did not match the wire contract.
    MalformedResponse,
    /// The server answered with `success: false` and a reason.
    Rejected,
    /// The local file for an upload could not be read.
    FileUnreadable,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Rejected => write!(f, "rejected by server"),
            FailureKind::FileUnreadable => write!(f, "file unreadable"),
        }
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::new(FailureKind::Timeout, err.to_string());
    }
    ClientError::new(FailureKind::Network, err.to_string())
}
