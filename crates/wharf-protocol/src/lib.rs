//! # wharf-protocol
//!
//! Generated Rust bindings for the Chrome DevTools Protocol. Every domain
//! from the embedded `browser_protocol.json`/`js_protocol.json` schema
//! becomes a module here (e.g. [`dom`], [`page`], [`network`], [`target`],
//! [`runtime`]), each exposing its types, commands (as
//! [`wharf_transport::Command`] implementors), and event structs.
//!
//! The bindings are produced by `wharf-codegen` at build time; see
//! `build.rs`. Nothing in this crate is hand-written beyond this file.
//!
//! The combined [`Event`] enum and [`parse_event`] dispatcher let a session
//! decode an incoming `{method, params}` payload without knowing in advance
//! which domain it belongs to.

#![allow(clippy::all)]

include!(concat!(env!("OUT_DIR"), "/generated.rs"));
