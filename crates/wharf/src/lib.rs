//! # wharf
//!
//! A thin, typed driver over the Chrome DevTools Protocol: discover a
//! browser's debugging port, attach to a tab, navigate it, and query or
//! search its DOM.
//!
//! This crate is a convenience wrapper over [`wharf_transport`] (the wire
//! codec and session), [`wharf_protocol`] (the generated CDP bindings), and
//! [`wharf_dom`] (the DOM element façade). It embeds no protocol logic of
//! its own: every command it issues goes through a generated
//! [`wharf_transport::Command`] implementor.
//!
//! ## Quick start
//!
//! ```no_run
//! # async fn example() -> Result<(), wharf::WharfError> {
//! let tab = wharf::connect_tab("http://localhost:9222", "https://example.com").await?;
//! tab.wait_for_navigation(std::time::Duration::from_secs(10)).await?;
//!
//! if let Some(heading) = tab.query_selector("h1").await? {
//!     println!("{}", heading.tag().await);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod tab;

pub use error::WharfError;
pub use tab::{connect_tab, connect_tab_with_options, Tab};

pub use wharf_dom::ElementHandle;
pub use wharf_protocol::{parse_event, Event};
pub use wharf_transport::{CdpConnectionOptions, CdpError, CdpEvent};
