use std::fmt;

use nv_core::types::ErrorBody;
use nv_core::ApiFailure;
use thiserror::Error;

/// Why a single attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Client { status: u16 },
    Timeout,
    /// No response was received at all.
    Network,
    Server { status: u16 },
    /// A 2xx response whose body does not decode.
    BadResponse,
}

impl FailureKind {
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FailureKind::Client { .. })
    }

    pub fn from_status(status: u16) -> Self {
        if (400..500).contains(&status) {
            FailureKind::Client { status }
        } else {
            FailureKind::Server { status }
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Client { status } => write!(f, "client error {}", status),
            FailureKind::Timeout => f.write_str("timeout"),
            FailureKind::Network => f.write_str("network error"),
            FailureKind::Server { status } => write!(f, "server error {}", status),
            FailureKind::BadResponse => f.write_str("malformed response"),
        }
    }
}

#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct AttemptFailure {
    kind: FailureKind,
    message: String,
    body: ErrorBody,
}

impl AttemptFailure {
    pub fn from_status(status: u16, body: ErrorBody) -> Self {
        let message = body
            .error
            .clone()
            .unwrap_or_else(|| format!("HTTP status {}", status));
        Self {
            kind: FailureKind::from_status(status),
            message,
            body,
        }
    }

    pub fn from_transport(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            FailureKind::Timeout
        } else if let Some(status) = err.status() {
            FailureKind::from_status(status.as_u16())
        } else if err.is_decode() {
            FailureKind::BadResponse
        } else {
            FailureKind::Network
        };
        Self {
            kind,
            message: err.to_string(),
            body: ErrorBody::default(),
        }
    }

    pub fn kind(&self) -> &FailureKind {
        &self.kind
    }

    /// The failure reported to the caller once no further attempt will be made.
    pub fn into_api_failure(self) -> ApiFailure {
        match self.kind {
            FailureKind::Client { status } => {
                let failure = ApiFailure::new(
                    self.body.error.unwrap_or_else(|| "Invalid request".to_string()),
                )
                .with_code(format!("HTTP_{}", status));
                match self.body.details {
                    Some(details) => failure.with_details(details),
                    None => failure,
                }
            }
            FailureKind::Timeout => ApiFailure::new("Request timeout")
                .with_details("The analysis took too long. Please try again.")
                .with_code("TIMEOUT"),
            FailureKind::Network => ApiFailure::new("Network error")
                .with_details("Unable to connect to the server. Please check your connection.")
                .with_code("NETWORK_ERROR"),
            FailureKind::Server { status } => ApiFailure::new("Analysis failed")
                .with_details(self.body.details.unwrap_or(self.message))
                .with_code(format!("HTTP_{}", status)),
            FailureKind::BadResponse => ApiFailure::new("Analysis failed")
                .with_details(self.message)
                .with_code("BAD_RESPONSE"),
        }
    }
}

pub fn unknown_failure() -> ApiFailure {
    ApiFailure::new("Unknown error")
        .with_details("An unexpected error occurred. Please try again.")
        .with_code("UNKNOWN")
}
