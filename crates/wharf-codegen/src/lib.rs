//! # wharf-codegen
//!
//! Loads the Chrome DevTools Protocol JSON schema, applies the small table
//! of known upstream corrections, resolves cross-domain references, and
//! emits one Rust module per domain as a [`proc_macro2::TokenStream`].
//!
//! This crate has no knowledge of any particular CDP schema's contents; the
//! `browser_protocol.json`/`js_protocol.json` text is supplied by a caller
//! (typically a `build.rs`, as in `wharf-protocol`). It depends on
//! `wharf-transport` only insofar as generated code references
//! `wharf_transport::Command`/`CdpRequestBody`/`CdpError` by path — those
//! paths are emitted as tokens, not resolved here.

pub mod error;
pub mod generate;
pub mod loader;
pub mod names;
pub mod patches;
pub mod registry;
pub mod resolve;
pub mod schema;
pub mod support;

pub use error::SchemaError;
pub use generate::{generate, DomainModule};
pub use loader::{load, Schema};
pub use registry::generate_event_registry;
pub use support::generate_support;

#[cfg(test)]
mod tests;
