//! # wharf-dom
//!
//! The DOM element façade: [`ElementHandle`] wraps a single DOM node behind
//! a stable `backend_node_id`, revalidating its `NodeId`/`RemoteObject`
//! against the live document when CDP reports them stale. Selector queries
//! and text search build on top of it.
//!
//! This crate has no opinion about how a session was obtained; callers pass
//! in a [`wharf_transport::CdpConnection`] plus the CDP session id of the
//! target they want to operate on (see `wharf` for a driver that manages
//! that for you).

pub mod attrs;
pub mod element;
pub mod search;

pub use element::{find_element_by_text, find_elements_by_text, ElementHandle};
