//! Tests for endpoint discovery.

use super::*;

#[test]
fn test_websocket_url_passthrough() {
    // WebSocket URLs should be returned as-is
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let options = CdpConnectionOptions::default();
        let result =
            discover_websocket_url("ws://localhost:9222/devtools/browser/abc123", &options).await;

        assert!(result.is_ok());
        assert_eq!(
            result.unwrap(),
            "ws://localhost:9222/devtools/browser/abc123"
        );
    });
}

#[test]
fn test_invalid_scheme() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let options = CdpConnectionOptions::default();
        let result = discover_websocket_url("ftp://localhost:9222", &options).await;

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, CdpError::InvalidEndpointUrl(_)));
    });
}

#[test]
fn test_connection_options_builder() {
    let options = CdpConnectionOptions::new()
        .timeout(Duration::from_secs(10))
        .header("Authorization", "Bearer token")
        .header("X-Custom", "value");

    assert_eq!(options.timeout, Some(Duration::from_secs(10)));
    assert_eq!(
        options.headers.get("Authorization"),
        Some(&"Bearer token".to_string())
    );
    assert_eq!(options.headers.get("X-Custom"), Some(&"value".to_string()));
}

#[test]
fn test_connection_options_ambient_defaults() {
    let options = CdpConnectionOptions::default();
    assert_eq!(options.command_timeout, None);
    assert_eq!(options.poll_interval, Duration::from_millis(500));
    assert!(!options.strict_events);
}

#[test]
fn test_connection_options_ambient_builder() {
    let options = CdpConnectionOptions::new()
        .command_timeout(Duration::from_secs(5))
        .poll_interval(Duration::from_millis(100))
        .strict_events(true);

    assert_eq!(options.command_timeout, Some(Duration::from_secs(5)));
    assert_eq!(options.poll_interval, Duration::from_millis(100));
    assert!(options.strict_events);
}

#[test]
fn test_list_targets_invalid_url() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let options = CdpConnectionOptions::default();
        let result = list_targets("ftp://localhost:9222", &options).await;
        assert!(matches!(result, Err(CdpError::InvalidEndpointUrl(_))));
    });
}

#[test]
fn test_new_tab_invalid_url() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let options = CdpConnectionOptions::default();
        let result = new_tab("not a url", "https://example.com", &options).await;
        assert!(matches!(result, Err(CdpError::InvalidEndpointUrl(_))));
    });
}

#[test]
fn test_target_descriptor_deserialization() {
    let json = r#"{
        "id": "ABC123",
        "type": "page",
        "title": "Example",
        "url": "https://example.com",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/page/ABC123"
    }"#;
    let descriptor: TargetDescriptor = serde_json::from_str(json).unwrap();
    assert_eq!(descriptor.id, "ABC123");
    assert_eq!(descriptor.type_, "page");
    assert_eq!(
        descriptor.web_socket_debugger_url.as_deref(),
        Some("ws://localhost:9222/devtools/page/ABC123")
    );
}
