//! [`Tab`]: a browser page reached over one CDP session, plus [`connect_tab`]
//! to obtain one via HTTP discovery.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::broadcast;
use wharf_dom::ElementHandle;
use wharf_protocol::{page, target, Event};
use wharf_transport::{
    discover_websocket_url, new_tab, CdpConnection, CdpConnectionOptions, CdpEvent, CdpError,
};

use crate::error::WharfError;

/// Default budget for [`Tab::wait_for_navigation`].
const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Open a new tab at `target_url` on the browser reachable at
/// `endpoint_url` (e.g. `http://localhost:9222`) and attach to it.
///
/// This performs HTTP discovery (`/json/version`, `/json/new?url=`), opens
/// the browser-level WebSocket, and attaches to the newly created target via
/// `Target.attachToTarget` with `flatten: true`, so every subsequent command
/// is routed over that one socket by session id.
///
/// # Errors
///
/// Returns an error if discovery, the WebSocket handshake, or the attach
/// sequence fails.
pub async fn connect_tab(endpoint_url: &str, target_url: &str) -> Result<Tab, WharfError> {
    connect_tab_with_options(endpoint_url, target_url, &CdpConnectionOptions::new()).await
}

/// Like [`connect_tab`], but with caller-supplied connection options (custom
/// timeout, upgrade headers).
///
/// # Errors
///
/// See [`connect_tab`].
pub async fn connect_tab_with_options(
    endpoint_url: &str,
    target_url: &str,
    options: &CdpConnectionOptions,
) -> Result<Tab, WharfError> {
    let ws_url = discover_websocket_url(endpoint_url, options).await?;
    let connection = Arc::new(CdpConnection::connect_with_options(&ws_url, options).await?);
    let descriptor = new_tab(endpoint_url, target_url, options).await?;

    let session_id = connection
        .execute(
            &target::TargetAttachToTarget {
                target_id: descriptor.id.clone(),
                flatten: Some(true),
            },
            None,
        )
        .await?;

    connection
        .execute(&page::PageEnable {}, Some(&session_id))
        .await?;

    Ok(Tab {
        connection,
        target_id: descriptor.id,
        session_id,
        poll_interval: options.poll_interval,
        strict_events: options.strict_events,
    })
}

/// A browser page (tab), reached over one attached CDP session.
///
/// Cloning shares the underlying connection and session id; both clones talk
/// to the same tab.
#[derive(Clone)]
pub struct Tab {
    connection: Arc<CdpConnection>,
    target_id: String,
    session_id: String,
    /// Polling interval for [`wait_for_selector`](Self::wait_for_selector)/
    /// [`wait_for_element_by_text`](Self::wait_for_element_by_text), from
    /// [`CdpConnectionOptions::poll_interval`].
    poll_interval: Duration,
    /// Whether an event for an unregistered method should fail this tab's
    /// event-waiting helpers instead of being silently skipped, from
    /// [`CdpConnectionOptions::strict_events`].
    strict_events: bool,
}

impl std::fmt::Debug for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tab")
            .field("target_id", &self.target_id)
            .field("session_id", &self.session_id)
            .finish_non_exhaustive()
    }
}

impl Tab {
    /// The CDP target id this tab wraps.
    #[must_use]
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// The flat-protocol session id commands are routed through.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The shared connection this tab's session was attached over.
    #[must_use]
    pub fn connection(&self) -> &Arc<CdpConnection> {
        &self.connection
    }

    /// Navigate this tab to `url`.
    ///
    /// This only waits for `Page.navigate` to return (the navigation to
    /// start); use [`wait_for_navigation`](Self::wait_for_navigation) to wait
    /// for the load event.
    ///
    /// # Errors
    ///
    /// Returns [`WharfError::NavigationFailed`] if CDP reports a navigation
    /// error, or a transport/protocol error from the underlying command.
    pub async fn navigate(&self, url: impl Into<String>) -> Result<(), WharfError> {
        let result = self
            .connection
            .execute(
                &page::PageNavigate {
                    url: url.into(),
                    referrer: None,
                    transition_type: None,
                    frame_id: None,
                },
                Some(&self.session_id),
            )
            .await?;
        if let Some(error_text) = result.error_text {
            return Err(WharfError::NavigationFailed(error_text));
        }
        Ok(())
    }

    /// Navigate to `url` and wait for the page's load event, up to `timeout`.
    ///
    /// A thin convenience composing [`navigate`](Self::navigate) with
    /// [`wait_for_navigation`](Self::wait_for_navigation).
    ///
    /// # Errors
    ///
    /// See [`navigate`](Self::navigate) and
    /// [`wait_for_navigation`](Self::wait_for_navigation).
    pub async fn get(&self, url: impl Into<String>, timeout: Duration) -> Result<(), WharfError> {
        self.navigate(url).await?;
        self.wait_for_navigation(timeout).await
    }

    /// Wait for this tab's `Page.loadEventFired` event, up to `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`WharfError::Timeout`] if no load event arrives in time, or a
    /// transport error if the event stream itself fails (e.g. the connection
    /// is dropped).
    pub async fn wait_for_navigation(&self, timeout: Duration) -> Result<(), WharfError> {
        let mut events = self.connection.subscribe_events();
        tokio::time::timeout(timeout, self.await_load_event(&mut events))
            .await
            .map_err(|_| WharfError::Timeout(timeout))?
    }

    /// Like [`wait_for_navigation`](Self::wait_for_navigation) with the
    /// default 30 second budget.
    ///
    /// # Errors
    ///
    /// See [`wait_for_navigation`](Self::wait_for_navigation).
    pub async fn wait_for_load(&self) -> Result<(), WharfError> {
        self.wait_for_navigation(DEFAULT_NAVIGATION_TIMEOUT).await
    }

    async fn await_load_event(
        &self,
        events: &mut broadcast::Receiver<CdpEvent>,
    ) -> Result<(), WharfError> {
        loop {
            let event = events
                .recv()
                .await
                .map_err(|_| WharfError::Cdp(CdpError::ConnectionLost))?;
            if let Some(Event::PageLoadEventFired(_)) =
                classify_event(&event, &self.session_id, self.strict_events)?
            {
                return Ok(());
            }
        }
    }

    /// Poll [`query_selector`](Self::query_selector) at this tab's
    /// configured poll interval until `selector` matches or `timeout`
    /// elapses.
    ///
    /// # Errors
    ///
    /// Returns [`WharfError::Timeout`] if no match is found in time, or a
    /// transport error from the underlying selector queries.
    pub async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<ElementHandle, WharfError> {
        tokio::time::timeout(timeout, async {
            loop {
                if let Some(found) = self.query_selector(selector).await? {
                    return Ok(found);
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        })
        .await
        .map_err(|_| WharfError::Timeout(timeout))?
    }

    /// Poll [`find_element_by_text`](Self::find_element_by_text) at this
    /// tab's configured poll interval until `text` matches or `timeout`
    /// elapses.
    ///
    /// # Errors
    ///
    /// Returns [`WharfError::Timeout`] if no match is found in time, or a
    /// transport error from the underlying text search.
    pub async fn wait_for_element_by_text(
        &self,
        text: &str,
        best_match: bool,
        timeout: Duration,
    ) -> Result<ElementHandle, WharfError> {
        tokio::time::timeout(timeout, async {
            loop {
                if let Some(found) = self.find_element_by_text(text, best_match).await? {
                    return Ok(found);
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        })
        .await
        .map_err(|_| WharfError::Timeout(timeout))?
    }

    /// A handle to this tab's document root.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying `DOM.getDocument`/`DOM.resolveNode`
    /// calls fail.
    pub async fn root(&self) -> Result<ElementHandle, CdpError> {
        ElementHandle::root(self.connection.clone(), self.session_id.clone()).await
    }

    /// The first descendant of the document matching `selector`.
    ///
    /// # Errors
    ///
    /// See [`ElementHandle::query_selector`].
    pub async fn query_selector(&self, selector: &str) -> Result<Option<ElementHandle>, CdpError> {
        self.root().await?.query_selector(selector).await
    }

    /// Every descendant of the document matching `selector`.
    ///
    /// # Errors
    ///
    /// See [`ElementHandle::query_selector_all`].
    pub async fn query_selector_all(&self, selector: &str) -> Result<Vec<ElementHandle>, CdpError> {
        self.root().await?.query_selector_all(selector).await
    }

    /// Every element in the document whose text matches `text`.
    ///
    /// # Errors
    ///
    /// See [`wharf_dom::find_elements_by_text`].
    pub async fn find_elements_by_text(&self, text: &str) -> Result<Vec<ElementHandle>, CdpError> {
        wharf_dom::find_elements_by_text(self.connection.clone(), self.session_id.clone(), text).await
    }

    /// The single best (or first) element in the document matching `text`.
    ///
    /// # Errors
    ///
    /// See [`wharf_dom::find_element_by_text`].
    pub async fn find_element_by_text(
        &self,
        text: &str,
        best_match: bool,
    ) -> Result<Option<ElementHandle>, CdpError> {
        wharf_dom::find_element_by_text(
            self.connection.clone(),
            self.session_id.clone(),
            text,
            best_match,
        )
        .await
    }

    /// Find the single best text match and click it.
    ///
    /// A thin convenience composing [`find_element_by_text`](Self::find_element_by_text)
    /// with [`ElementHandle::click`].
    ///
    /// # Errors
    ///
    /// Returns an error if no element matches `text`, or from the underlying
    /// search/click calls.
    pub async fn click_text(&self, text: &str) -> Result<(), CdpError> {
        let element = self
            .find_element_by_text(text, true)
            .await?
            .ok_or_else(|| CdpError::ContractViolation(format!("no element matching text {text:?}")))?;
        element.click().await
    }

    /// Subscribe to every CDP event on the underlying connection, including
    /// events from other sessions. Callers typically filter on
    /// `event.session_id == Some(tab.session_id())`.
    pub fn subscribe_events(&self) -> broadcast::Receiver<CdpEvent> {
        self.connection.subscribe_events()
    }
}

/// Decode `event` if it belongs to `session_id`, looking it up in the
/// generated event registry.
///
/// Returns `Ok(None)` for an event belonging to a different session, or for
/// an unregistered method when `strict_events` is `false` (the default: log
/// and drop, per the wire codec's event-dispatch contract). When
/// `strict_events` is `true`, an unregistered method or a decode failure is
/// promoted to a contract error instead.
fn classify_event(
    event: &CdpEvent,
    session_id: &str,
    strict_events: bool,
) -> Result<Option<Event>, CdpError> {
    if event.session_id.as_deref() != Some(session_id) {
        return Ok(None);
    }
    let params = event.params.clone().unwrap_or(Value::Null);
    match wharf_protocol::parse_event(&event.method, params) {
        Ok(parsed) => {
            if parsed.is_none() && strict_events {
                Err(CdpError::UnregisteredEvent(event.method.clone()))
            } else {
                Ok(parsed)
            }
        }
        Err(e) if strict_events => Err(CdpError::ContractViolation(format!(
            "failed to decode event {:?}: {e}",
            event.method
        ))),
        Err(_) => Ok(None),
    }
}
