use super::*;
use std::time::Duration;

#[test]
fn test_connection_failed_error_display() {
    let err = CdpError::ConnectionFailed("connection refused".to_string());
    assert_eq!(
        err.to_string(),
        "WebSocket connection failed: connection refused"
    );
}

#[test]
fn test_connection_lost_error_display() {
    let err = CdpError::ConnectionLost;
    assert_eq!(err.to_string(), "WebSocket connection lost");
}

#[test]
fn test_send_failed_error_display() {
    let err = CdpError::SendFailed("channel closed".to_string());
    assert_eq!(err.to_string(), "failed to send CDP message: channel closed");
}

#[test]
fn test_protocol_error_display() {
    let err = CdpError::Protocol {
        code: -32601,
        message: "Method not found".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "CDP protocol error -32601: Method not found"
    );
}

#[test]
fn test_json_error_from_serde() {
    let json_err: serde_json::Error = serde_json::from_str::<i32>("not a number").unwrap_err();
    let err: CdpError = json_err.into();
    assert!(err.to_string().starts_with("JSON error:"));
}

#[test]
fn test_timeout_error_display() {
    let err = CdpError::Timeout(Duration::from_secs(30));
    assert_eq!(err.to_string(), "response timeout after 30s");
}

#[test]
fn test_timeout_error_with_millis() {
    let err = CdpError::Timeout(Duration::from_millis(500));
    assert_eq!(err.to_string(), "response timeout after 500ms");
}

#[test]
fn test_invalid_message_id_error_display() {
    let err = CdpError::InvalidMessageId {
        expected: 42,
        got: 99,
    };
    assert_eq!(err.to_string(), "invalid message ID: expected 42, got 99");
}

#[test]
fn test_invalid_url_error_display() {
    let err = CdpError::InvalidUrl("not-a-valid-url".to_string());
    assert_eq!(err.to_string(), "invalid WebSocket URL: not-a-valid-url");
}

#[test]
fn test_session_not_found_error_display() {
    let err = CdpError::SessionNotFound("ABC123".to_string());
    assert_eq!(err.to_string(), "session not found: ABC123");
}

#[test]
fn test_from_tungstenite_connection_closed() {
    let ws_err = tokio_tungstenite::tungstenite::Error::ConnectionClosed;
    let err: CdpError = ws_err.into();
    assert!(matches!(err, CdpError::ConnectionLost));
}

#[test]
fn test_from_tungstenite_already_closed() {
    let ws_err = tokio_tungstenite::tungstenite::Error::AlreadyClosed;
    let err: CdpError = ws_err.into();
    assert!(matches!(err, CdpError::ConnectionLost));
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CdpError>();
}

#[test]
fn test_error_debug_format() {
    let err = CdpError::Protocol {
        code: -32600,
        message: "Invalid Request".to_string(),
    };
    let debug_str = format!("{:?}", err);
    assert!(debug_str.contains("Protocol"));
    assert!(debug_str.contains("-32600"));
    assert!(debug_str.contains("Invalid Request"));
}

#[test]
fn test_invalid_endpoint_url_error_display() {
    let err = CdpError::InvalidEndpointUrl("ftp://example.com".to_string());
    assert_eq!(
        err.to_string(),
        "invalid discovery endpoint URL: ftp://example.com"
    );
}

#[test]
fn test_connection_timeout_error_display() {
    let err = CdpError::ConnectionTimeout(Duration::from_secs(5));
    assert_eq!(err.to_string(), "discovery request timed out after 5s");
}

#[test]
fn test_endpoint_discovery_failed_error_display() {
    let err = CdpError::EndpointDiscoveryFailed {
        url: "http://localhost:9222/json/version".to_string(),
        reason: "missing webSocketDebuggerUrl".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "failed to discover WebSocket URL from http://localhost:9222/json/version: missing webSocketDebuggerUrl"
    );
}

#[test]
fn test_contract_violation_error_display() {
    let err = CdpError::ContractViolation("command yielded 2 requests, expected 1".to_string());
    assert_eq!(
        err.to_string(),
        "command contract violated: command yielded 2 requests, expected 1"
    );
}

#[test]
fn test_unregistered_event_error_display() {
    let err = CdpError::UnregisteredEvent("Foo.barHappened".to_string());
    assert_eq!(
        err.to_string(),
        "unregistered event method: Foo.barHappened"
    );
}
