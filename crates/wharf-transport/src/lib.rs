//! # wharf-transport
//!
//! Low-level Chrome DevTools Protocol (CDP) transport: WebSocket session
//! management, message framing, and the command/event plumbing that the
//! generated protocol bindings in `wharf-protocol` are built on top of.
//!
//! This crate handles:
//! - WebSocket connection management to Chrome/Chromium browsers
//! - CDP message serialization and deserialization
//! - Command/response correlation with async/await
//! - Event subscription and streaming
//! - Session routing for multiple targets (pages, workers)
//! - HTTP `/json/...` discovery of a browser's WebSocket endpoint
//!
//! This crate knows nothing about individual CDP domains (Page, Network,
//! DOM, ...). Those live in `wharf-protocol`, generated from the CDP schema
//! by `wharf-codegen` against the [`Command`] trait defined here.
//!
//! ## Quick Start
//!
//! ```no_run
//! use wharf_transport::CdpConnection;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), wharf_transport::CdpError> {
//! let conn = CdpConnection::connect("ws://localhost:9222/devtools/browser/...").await?;
//!
//! let result: serde_json::Value = conn
//!     .send_command("Target.getTargets", None::<()>, None)
//!     .await?;
//! println!("{result}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Discovering a browser's WebSocket URL
//!
//! ```no_run
//! use wharf_transport::{discover_websocket_url, CdpConnectionOptions};
//!
//! # async fn example() -> Result<(), wharf_transport::CdpError> {
//! let options = CdpConnectionOptions::default();
//! let ws_url = discover_websocket_url("http://localhost:9222", &options).await?;
//! println!("WebSocket URL: {}", ws_url);
//! # Ok(())
//! # }
//! ```
//!
//! ## Subscribing to Events
//!
//! ```no_run
//! use wharf_transport::CdpConnection;
//!
//! # async fn example(conn: &CdpConnection) -> Result<(), wharf_transport::CdpError> {
//! let mut events = conn.subscribe_events();
//!
//! while let Ok(event) = events.recv().await {
//!     match &event.method[..] {
//!         "Page.loadEventFired" => println!("Page loaded!"),
//!         "Network.requestWillBeSent" => println!("Network request: {:?}", event.params),
//!         _ => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Connection Options
//!
//! ```no_run
//! use wharf_transport::{CdpConnection, CdpConnectionOptions};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), wharf_transport::CdpError> {
//! let options = CdpConnectionOptions::new().timeout(Duration::from_secs(30));
//!
//! let conn = CdpConnection::connect_with_options(
//!     "ws://localhost:9222/devtools/browser/...",
//!     &options,
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`connection`] - WebSocket connection management and HTTP discovery
//! - [`transport`] - Wire message types and serialization
//! - [`command`] - The `Command` trait that generated bindings implement
//! - [`error`] - Error types

pub mod command;
pub mod connection;
pub mod error;
pub mod transport;

pub use command::{Command, CdpRequestBody};
pub use connection::{
    discover_websocket_url, list_targets, new_tab, BrowserVersion, CdpConnection,
    CdpConnectionOptions, TargetDescriptor,
};
pub use error::CdpError;
pub use transport::{CdpEvent, CdpMessage, CdpRequest, CdpResponse};
