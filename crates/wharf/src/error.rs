//! Error type for the thin convenience layer.
//!
//! Transport, protocol, and discovery failures are passed straight through
//! from [`wharf_transport::CdpError`]; this type only adds the handful of
//! error kinds that belong to `connect_tab`/`Tab` itself.

use std::time::Duration;

use thiserror::Error;
use wharf_transport::CdpError;

/// Errors surfaced by [`crate::connect_tab`] and [`crate::Tab`].
#[derive(Debug, Error)]
pub enum WharfError {
    /// The underlying CDP transport, protocol, or discovery layer failed.
    #[error(transparent)]
    Cdp(#[from] CdpError),

    /// `Page.navigate` reported a navigation failure.
    #[error("navigation failed: {0}")]
    NavigationFailed(String),

    /// A polling wait (e.g. [`crate::Tab::wait_for_navigation`]) exceeded its
    /// budget before the awaited condition was observed.
    #[error("timed out after {0:?} waiting for the page")]
    Timeout(Duration),
}
