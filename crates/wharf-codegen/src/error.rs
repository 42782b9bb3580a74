//! Errors raised while loading or generating from the CDP schema.
//!
//! These are all generation-time: a schema error aborts generation entirely
//! and no files are written, per the version-gate and reference-closure
//! invariants.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// The input document's `version` was not `{major: "1", minor: "3"}`.
    #[error("unsupported CDP schema version {major}.{minor}, expected 1.3")]
    UnsupportedVersion { major: String, minor: String },

    /// The input JSON could not be parsed as a schema document.
    #[error("failed to parse schema document: {0}")]
    InvalidJson(String),

    /// A `$ref` did not resolve to any declared type after patching.
    #[error("dangling reference {reference:?} in domain {domain}")]
    DanglingReference { domain: String, reference: String },

    /// Two domains declared the same name.
    #[error("duplicate domain name: {0}")]
    DuplicateDomain(String),

    /// A property or command/event parameter had neither a base type nor a `$ref`.
    #[error("property {property:?} in domain {domain} has neither a type nor a $ref")]
    UntypedProperty { domain: String, property: String },

    /// A named patch in the patch table targeted a domain/command/type/event
    /// that does not exist in the parsed schema.
    #[error("patch {patch_name:?} targets unknown {kind} {target:?} in domain {domain}")]
    PatchTargetMissing {
        patch_name: &'static str,
        domain: String,
        kind: &'static str,
        target: String,
    },
}
