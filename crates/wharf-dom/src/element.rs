//! [`ElementHandle`]: a façade over a single DOM node, bound to the CDP
//! session it was resolved against.
//!
//! A handle is a stable `backend_node_id` plus a cached `Node` snapshot
//! taken when the handle was created or last revalidated. The `node_id` and
//! `remote_object_id` CDP hands out are only valid until the document is
//! re-flattened (e.g. after a navigation or DOM mutation), so every method
//! that issues a DOM command retries once through [`ElementHandle::update`]
//! if CDP reports the node as gone.

use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;
use wharf_protocol::dom::{
    self, BackendNodeId, BoxModel, Node, NodeId,
};
use wharf_protocol::input;
use wharf_transport::{CdpConnection, CdpError};

use crate::attrs::{display_attributes, flatten_attributes};
use crate::search::{best_match_index, text_search_query};

const NOT_FOUND_MARKER: &str = "could not find node";
const TEXT_NODE: i64 = 3;

struct ElementState {
    node_id: NodeId,
    node: Node,
    remote_object_id: Option<String>,
    attrs: Vec<(String, String)>,
}

/// A handle to a single DOM node, resolved against one CDP session.
///
/// Cloning an `ElementHandle` shares its cached state; revalidating one
/// clone's view (via [`update`](Self::update)) is visible to the others,
/// mirroring how a single DOM node is one underlying object no matter how
/// many references to it exist.
#[derive(Clone)]
pub struct ElementHandle {
    connection: Arc<CdpConnection>,
    target_session_id: String,
    backend_node_id: BackendNodeId,
    state: Arc<Mutex<ElementState>>,
}

impl fmt::Debug for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementHandle")
            .field("backend_node_id", &self.backend_node_id)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ElementHandle {
    fn eq(&self, other: &Self) -> bool {
        self.backend_node_id == other.backend_node_id
    }
}

impl Eq for ElementHandle {}

impl ElementHandle {
    /// Wrap an already-resolved `Node` as a handle on `target_session_id`.
    async fn from_node(
        connection: Arc<CdpConnection>,
        target_session_id: String,
        node: Node,
    ) -> Result<Self, CdpError> {
        let remote = connection
            .execute(
                &dom::DOMResolveNode {
                    node_id: Some(node.node_id.clone()),
                    backend_node_id: None,
                    object_group: None,
                    execution_context_id: None,
                },
                Some(&target_session_id),
            )
            .await?;
        let attrs = node
            .attributes
            .as_ref()
            .map(|flat| flatten_attributes(flat))
            .unwrap_or_default();
        let backend_node_id = node.backend_node_id.clone();
        Ok(Self {
            connection,
            target_session_id,
            backend_node_id,
            state: Arc::new(Mutex::new(ElementState {
                node_id: node.node_id.clone(),
                node,
                remote_object_id: remote.object_id,
                attrs,
            })),
        })
    }

    /// Resolve a handle for the document root of `target_session_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if `DOM.getDocument` or the subsequent
    /// `DOM.resolveNode` call fails.
    pub async fn root(
        connection: Arc<CdpConnection>,
        target_session_id: impl Into<String>,
    ) -> Result<Self, CdpError> {
        let target_session_id = target_session_id.into();
        let root = connection
            .execute(
                &dom::DOMGetDocument {
                    depth: Some(-1),
                    pierce: Some(true),
                },
                Some(&target_session_id),
            )
            .await?;
        Self::from_node(connection, target_session_id, root).await
    }

    /// Resolve a handle from a bare `NodeId`, as returned by `querySelector`
    /// or a text search.
    async fn from_node_id(
        connection: Arc<CdpConnection>,
        target_session_id: String,
        node_id: NodeId,
    ) -> Result<Self, CdpError> {
        let node = connection
            .execute(
                &dom::DOMDescribeNode {
                    node_id: Some(node_id),
                    backend_node_id: None,
                    object_id: None,
                    depth: Some(0),
                    pierce: Some(false),
                },
                Some(&target_session_id),
            )
            .await?;
        Self::from_node(connection, target_session_id, node).await
    }

    /// This handle's stable identifier; unlike `NodeId`, it survives a
    /// document re-flatten.
    #[must_use]
    pub fn backend_node_id(&self) -> &BackendNodeId {
        &self.backend_node_id
    }

    /// The element's tag name, e.g. `"DIV"`.
    pub async fn tag(&self) -> String {
        self.state.lock().await.node.node_name.clone()
    }

    /// The element's attributes, in document order, with `class` renamed to
    /// `class_`.
    pub async fn attrs(&self) -> Vec<(String, String)> {
        self.state.lock().await.attrs.clone()
    }

    /// Re-fetch the document tree and refresh this handle's cached `Node`,
    /// `NodeId`, and `RemoteObject` against the node with this handle's
    /// `backend_node_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CdpError::ContractViolation`] if no node with this handle's
    /// `backend_node_id` exists in the refreshed tree (the element was
    /// removed from the DOM), or an error from the underlying CDP calls.
    pub async fn update(&self) -> Result<(), CdpError> {
        let root = self
            .connection
            .execute(
                &dom::DOMGetDocument {
                    depth: Some(-1),
                    pierce: Some(true),
                },
                Some(&self.target_session_id),
            )
            .await?;
        let found = find_by_backend_id(&root, &self.backend_node_id)
            .cloned()
            .ok_or_else(|| {
                CdpError::ContractViolation(format!(
                    "node with backend id {:?} is no longer present in the document",
                    self.backend_node_id
                ))
            })?;
        let remote = self
            .connection
            .execute(
                &dom::DOMResolveNode {
                    node_id: Some(found.node_id.clone()),
                    backend_node_id: None,
                    object_group: None,
                    execution_context_id: None,
                },
                Some(&self.target_session_id),
            )
            .await?;
        let attrs = found
            .attributes
            .as_ref()
            .map(|flat| flatten_attributes(flat))
            .unwrap_or_default();

        let mut state = self.state.lock().await;
        state.node_id = found.node_id.clone();
        state.remote_object_id = remote.object_id;
        state.attrs = attrs;
        state.node = found;
        Ok(())
    }

    /// The bounding box of this element, in CSS pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the node has no box model (e.g. it is not
    /// rendered) or the underlying CDP call fails.
    pub async fn box_model(&self) -> Result<BoxModel, CdpError> {
        let node_id = self.state.lock().await.node_id.clone();
        self.connection
            .execute(
                &dom::DOMGetBoxModel {
                    node_id: Some(node_id),
                    backend_node_id: None,
                    object_id: None,
                },
                Some(&self.target_session_id),
            )
            .await
    }

    /// The first descendant matching `selector`, or `None` if there is no
    /// match.
    ///
    /// A stale-node failure triggers one automatic revalidation and retry;
    /// if the node is still stale afterward this returns `Ok(None)` rather
    /// than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying CDP calls fail for a reason other
    /// than a stale node.
    pub async fn query_selector(&self, selector: &str) -> Result<Option<Self>, CdpError> {
        Box::pin(self.query_selector_attempt(selector, false)).await
    }

    async fn query_selector_attempt(
        &self,
        selector: &str,
        already_retried: bool,
    ) -> Result<Option<Self>, CdpError> {
        let node_id = self.state.lock().await.node_id.clone();
        let result = self
            .connection
            .execute(
                &dom::DOMQuerySelector {
                    node_id,
                    selector: selector.to_string(),
                },
                Some(&self.target_session_id),
            )
            .await;

        match result {
            Ok(found) if found.0 == 0 => Ok(None),
            Ok(found) => self.resolve_found_node_id(found).await.map(Some),
            Err(e) if !already_retried && is_stale_node_error(&e) => {
                self.update().await?;
                Box::pin(self.query_selector_attempt(selector, true)).await
            }
            Err(e) if is_stale_node_error(&e) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Build a handle for `node_id`, preferring to locate it within this
    /// handle's already-fetched subtree (it was fetched with `pierce: true`,
    /// so descendants, shadow roots, and frame documents are all present)
    /// over a second network round trip.
    async fn resolve_found_node_id(&self, node_id: NodeId) -> Result<Self, CdpError> {
        let cached = {
            let state = self.state.lock().await;
            find_by_node_id(&state.node, &node_id).cloned()
        };
        match cached {
            Some(node) => Self::from_node(self.connection.clone(), self.target_session_id.clone(), node).await,
            None => Self::from_node_id(self.connection.clone(), self.target_session_id.clone(), node_id).await,
        }
    }

    /// Scroll this element into view if it is not already visible.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying `DOM.scrollIntoViewIfNeeded` call
    /// fails (e.g. the node has no box model, such as a detached or
    /// `display: none` element).
    pub async fn scroll_into_view(&self) -> Result<(), CdpError> {
        let node_id = self.state.lock().await.node_id.clone();
        self.connection
            .execute(
                &dom::DOMScrollIntoViewIfNeeded {
                    node_id: Some(node_id),
                    backend_node_id: None,
                    object_id: None,
                },
                Some(&self.target_session_id),
            )
            .await
    }

    /// Scroll this element into view, then synthesize a left-click at the
    /// center of its content box.
    ///
    /// # Errors
    ///
    /// Returns [`CdpError::ContractViolation`] if the element has no box
    /// model (nothing to click), or an error from the underlying CDP calls.
    pub async fn click(&self) -> Result<(), CdpError> {
        self.scroll_into_view().await?;
        let model = self.box_model().await?;
        let (x, y) = quad_center(&model.content.0)?;

        for event_type in ["mousePressed", "mouseReleased"] {
            self.connection
                .execute(
                    &input::InputDispatchMouseEvent {
                        type_: event_type.to_string(),
                        x,
                        y,
                        modifiers: None,
                        timestamp: None,
                        button: Some("left".to_string()),
                        buttons: None,
                        click_count: Some(1),
                        delta_x: None,
                        delta_y: None,
                    },
                    Some(&self.target_session_id),
                )
                .await?;
        }
        Ok(())
    }

    /// Every descendant matching `selector`, in document order.
    ///
    /// A stale-node failure triggers one automatic revalidation and retry;
    /// if the node is still stale afterward this returns an empty `Vec`
    /// rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying CDP calls fail for a reason other
    /// than a stale node.
    pub async fn query_selector_all(&self, selector: &str) -> Result<Vec<Self>, CdpError> {
        Box::pin(self.query_selector_all_attempt(selector, false)).await
    }

    async fn query_selector_all_attempt(
        &self,
        selector: &str,
        already_retried: bool,
    ) -> Result<Vec<Self>, CdpError> {
        let node_id = self.state.lock().await.node_id.clone();
        let result = self
            .connection
            .execute(
                &dom::DOMQuerySelectorAll {
                    node_id,
                    selector: selector.to_string(),
                },
                Some(&self.target_session_id),
            )
            .await;

        match result {
            Ok(node_ids) => {
                let mut handles = Vec::with_capacity(node_ids.len());
                for node_id in node_ids {
                    handles.push(self.resolve_found_node_id(node_id).await?);
                }
                Ok(handles)
            }
            Err(e) if !already_retried && is_stale_node_error(&e) => {
                self.update().await?;
                Box::pin(self.query_selector_all_attempt(selector, true)).await
            }
            Err(e) if is_stale_node_error(&e) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Best-effort synchronous render from whatever is already cached;
        // callers that need a fresh view should `update().await` first.
        let Ok(state) = self.state.try_lock() else {
            return write!(f, "<{:?}>", self.backend_node_id);
        };
        write!(f, "<{}", state.node.local_name.to_lowercase())?;
        for (name, value) in display_attributes(&state.attrs) {
            write!(f, " {name}=\"{value}\"")?;
        }
        write!(f, ">")
    }
}

fn find_by_backend_id<'a>(node: &'a Node, target: &BackendNodeId) -> Option<&'a Node> {
    if &node.backend_node_id == target {
        return Some(node);
    }
    if let Some(children) = &node.children {
        for child in children {
            if let Some(found) = find_by_backend_id(child, target) {
                return Some(found);
            }
        }
    }
    if let Some(shadow_roots) = &node.shadow_roots {
        for root in shadow_roots {
            if let Some(found) = find_by_backend_id(root, target) {
                return Some(found);
            }
        }
    }
    if let Some(content_document) = &node.content_document {
        if let Some(found) = find_by_backend_id(content_document, target) {
            return Some(found);
        }
    }
    None
}

fn find_by_node_id<'a>(node: &'a Node, target: &NodeId) -> Option<&'a Node> {
    if &node.node_id == target {
        return Some(node);
    }
    if let Some(children) = &node.children {
        for child in children {
            if let Some(found) = find_by_node_id(child, target) {
                return Some(found);
            }
        }
    }
    if let Some(shadow_roots) = &node.shadow_roots {
        for root in shadow_roots {
            if let Some(found) = find_by_node_id(root, target) {
                return Some(found);
            }
        }
    }
    if let Some(content_document) = &node.content_document {
        if let Some(found) = find_by_node_id(content_document, target) {
            return Some(found);
        }
    }
    None
}

/// Walk every `IFRAME` subtree reachable from `node` and collect the parent
/// of each of its text nodes whose value contains `text`, case-insensitive.
/// `DOM.performSearch` does not reach into frame documents, so this covers
/// what it misses.
fn find_iframe_text_match_parents(node: &Node, needle_lower: &str, out: &mut Vec<Node>) {
    if node.node_name.eq_ignore_ascii_case("iframe") {
        if let Some(content_document) = &node.content_document {
            collect_text_match_parents(content_document, needle_lower, out);
        }
    }
    if let Some(children) = &node.children {
        for child in children {
            find_iframe_text_match_parents(child, needle_lower, out);
        }
    }
    if let Some(shadow_roots) = &node.shadow_roots {
        for root in shadow_roots {
            find_iframe_text_match_parents(root, needle_lower, out);
        }
    }
}

/// Depth-first scan of `node`'s own subtree (used once already inside an
/// `IFRAME` document) for text nodes matching `needle_lower`, pushing each
/// match's parent.
fn collect_text_match_parents(node: &Node, needle_lower: &str, out: &mut Vec<Node>) {
    if let Some(children) = &node.children {
        for child in children {
            if child.node_type == TEXT_NODE && child.node_value.to_lowercase().contains(needle_lower) {
                out.push(node.clone());
            }
            collect_text_match_parents(child, needle_lower, out);
        }
    }
    find_iframe_text_match_parents(node, needle_lower, out);
}

fn text_all(node: &Node) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Node, out: &mut String) {
    if node.node_type == TEXT_NODE {
        out.push_str(&node.node_value);
    }
    if let Some(children) = &node.children {
        for child in children {
            collect_text(child, out);
        }
    }
}

/// The center point of a CDP `Quad` (4 clockwise `(x, y)` vertices, 8 numbers).
fn quad_center(quad: &[f64]) -> Result<(f64, f64), CdpError> {
    if quad.len() != 8 {
        return Err(CdpError::ContractViolation(format!(
            "expected a 4-point quad (8 numbers), got {}",
            quad.len()
        )));
    }
    let xs: f64 = quad.iter().step_by(2).sum();
    let ys: f64 = quad.iter().skip(1).step_by(2).sum();
    Ok((xs / 4.0, ys / 4.0))
}

fn is_stale_node_error(err: &CdpError) -> bool {
    match err {
        CdpError::Protocol { message, .. } => message.to_lowercase().contains(NOT_FOUND_MARKER),
        _ => false,
    }
}

/// Search the whole document for elements whose text matches `text`,
/// replacing any matched text node with its parent element, and additionally
/// scanning every `IFRAME` subtree locally for text nodes containing `text`
/// (case-insensitive) since `DOM.performSearch` does not reach into frame
/// documents. Results are de-duplicated by `backend_node_id`.
///
/// # Errors
///
/// Returns an error if `DOM.getDocument`, `DOM.performSearch`, or
/// `DOM.getSearchResults` fails. `DOM.discardSearchResults` is always
/// attempted afterward, even on error, to release the search session
/// server-side.
pub async fn find_elements_by_text(
    connection: Arc<CdpConnection>,
    target_session_id: impl Into<String>,
    text: &str,
) -> Result<Vec<ElementHandle>, CdpError> {
    let target_session_id = target_session_id.into();
    let root = connection
        .execute(
            &dom::DOMGetDocument {
                depth: Some(-1),
                pierce: Some(true),
            },
            Some(&target_session_id),
        )
        .await?;

    let query = text_search_query(text);
    let search = connection
        .execute(
            &dom::DOMPerformSearch {
                query,
                include_user_agent_shadow_dom: Some(true),
            },
            Some(&target_session_id),
        )
        .await?;

    let fetch_result = if search.result_count == 0 {
        Ok(Vec::new())
    } else {
        connection
            .execute(
                &dom::DOMGetSearchResults {
                    search_id: search.search_id.clone(),
                    from_index: 0,
                    to_index: search.result_count,
                },
                Some(&target_session_id),
            )
            .await
    };

    let _ = connection
        .execute(
            &dom::DOMDiscardSearchResults {
                search_id: search.search_id,
            },
            Some(&target_session_id),
        )
        .await;

    let mut matched = Vec::new();
    for node_id in fetch_result? {
        let resolved = find_by_node_id(&root, &node_id).cloned();
        let Some(node) = resolved else { continue };
        if node.node_type == TEXT_NODE {
            if let Some(parent) = find_parent_of(&root, &node.backend_node_id) {
                matched.push(parent);
            }
        } else {
            matched.push(node);
        }
    }

    let needle_lower = text.to_lowercase();
    find_iframe_text_match_parents(&root, &needle_lower, &mut matched);

    let mut seen = std::collections::HashSet::new();
    let mut handles = Vec::with_capacity(matched.len());
    for node in matched {
        if !seen.insert(node.backend_node_id.clone()) {
            continue;
        }
        handles.push(ElementHandle::from_node(connection.clone(), target_session_id.clone(), node).await?);
    }
    Ok(handles)
}

fn find_parent_of(node: &Node, target: &BackendNodeId) -> Option<Node> {
    if let Some(children) = &node.children {
        for child in children {
            if &child.backend_node_id == target {
                return Some(node.clone());
            }
            if let Some(found) = find_parent_of(child, target) {
                return Some(found);
            }
        }
    }
    if let Some(shadow_roots) = &node.shadow_roots {
        for root in shadow_roots {
            if &root.backend_node_id == target {
                return Some(node.clone());
            }
            if let Some(found) = find_parent_of(root, target) {
                return Some(found);
            }
        }
    }
    if let Some(content_document) = &node.content_document {
        if &content_document.backend_node_id == target {
            return Some(node.clone());
        }
        if let Some(found) = find_parent_of(content_document, target) {
            return Some(found);
        }
    }
    None
}

/// Find the single best text match in the whole document: the element whose
/// rendered text is closest in length to `text`. Ties favor the first
/// matching result in search order.
///
/// When `best_match` is `false`, the first search result is returned
/// instead of the closest-length one.
///
/// # Errors
///
/// See [`find_elements_by_text`].
pub async fn find_element_by_text(
    connection: Arc<CdpConnection>,
    target_session_id: impl Into<String>,
    text: &str,
    best_match: bool,
) -> Result<Option<ElementHandle>, CdpError> {
    let target_session_id = target_session_id.into();
    let candidates = find_elements_by_text(connection, target_session_id, text).await?;
    if candidates.is_empty() {
        return Ok(None);
    }
    if !best_match {
        return Ok(candidates.into_iter().next());
    }

    let mut texts = Vec::with_capacity(candidates.len());
    for candidate in &candidates {
        let node = candidate.state.lock().await.node.clone();
        texts.push(text_all(&node));
    }
    let index = best_match_index(text, &texts).unwrap_or(0);
    Ok(candidates.into_iter().nth(index))
}

#[cfg(test)]
mod tests;
