//! Error types for the CDP transport layer.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while driving a CDP session.
#[derive(Debug, Error)]
pub enum CdpError {
    /// The WebSocket connection could not be established.
    #[error("WebSocket connection failed: {0}")]
    ConnectionFailed(String),

    /// The WebSocket connection was lost or closed.
    #[error("WebSocket connection lost")]
    ConnectionLost,

    /// Failed to send a message over the internal write channel.
    #[error("failed to send CDP message: {0}")]
    SendFailed(String),

    /// The browser returned a protocol-level error for a request.
    #[error("CDP protocol error {code}: {message}")]
    Protocol {
        /// The CDP error code.
        code: i64,
        /// The CDP error message.
        message: String,
    },

    /// Failed to encode or decode a CDP JSON payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A command did not receive a response within its timeout.
    #[error("response timeout after {}", format_duration(*.0))]
    Timeout(Duration),

    /// A response arrived carrying an id that did not match any pending request.
    #[error("invalid message ID: expected {expected}, got {got}")]
    InvalidMessageId {
        /// The id that was expected.
        expected: u64,
        /// The id that was actually received.
        got: u64,
    },

    /// A WebSocket or HTTP discovery URL failed to parse or was the wrong scheme.
    #[error("invalid WebSocket URL: {0}")]
    InvalidUrl(String),

    /// An operation referenced a session id unknown to this connection.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// The HTTP `/json/...` discovery endpoint URL was invalid.
    #[error("invalid discovery endpoint URL: {0}")]
    InvalidEndpointUrl(String),

    /// The HTTP discovery request itself failed (not a timeout, not a connect failure).
    #[error("HTTP discovery request failed: {0}")]
    HttpRequestFailed(String),

    /// The HTTP discovery request exceeded its timeout.
    #[error("discovery request timed out after {}", format_duration(*.0))]
    ConnectionTimeout(Duration),

    /// Discovery reached the endpoint but could not extract a usable WebSocket URL.
    #[error("failed to discover WebSocket URL from {url}: {reason}")]
    EndpointDiscoveryFailed {
        /// The endpoint URL that was queried.
        url: String,
        /// A human-readable reason for the failure.
        reason: String,
    },

    /// A generated command described zero requests or more than one request/decode step.
    ///
    /// This indicates a bug in generated code, not a runtime condition.
    #[error("command contract violated: {0}")]
    ContractViolation(String),

    /// An event frame arrived for a method not present in the event registry,
    /// and strict event decoding was enabled.
    #[error("unregistered event method: {0}")]
    UnregisteredEvent(String),
}

fn format_duration(d: Duration) -> String {
    if d.as_secs() > 0 && d.subsec_millis() == 0 {
        format!("{}s", d.as_secs())
    } else {
        format!("{}ms", d.as_millis())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        use tokio_tungstenite::tungstenite::Error as WsError;
        match err {
            WsError::ConnectionClosed | WsError::AlreadyClosed => Self::ConnectionLost,
            other => Self::ConnectionFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests;
