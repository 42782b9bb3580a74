//! Deserialized shape of the CDP JSON schema documents (`browser_protocol.json`,
//! `js_protocol.json`), before any patching or name mapping.
//!
//! These types mirror the input documents field-for-field; they are not the
//! generated Rust bindings (those are emitted by [`crate::generate`]).

use serde::Deserialize;

/// A single CDP schema document: a version stamp plus an ordered list of domains.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaDocument {
    pub version: SchemaVersion,
    #[serde(default)]
    pub domains: Vec<CdpDomain>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchemaVersion {
    pub major: String,
    pub minor: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CdpDomain {
    pub domain: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub experimental: bool,
    #[serde(default)]
    pub deprecated: bool,
    /// Advisory only; the generator ignores this in favor of scanning `$ref`s.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub types: Vec<CdpType>,
    #[serde(default)]
    pub commands: Vec<CdpCommand>,
    #[serde(default)]
    pub events: Vec<CdpEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CdpType {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub base_type: String,
    #[serde(default)]
    pub experimental: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub items: Option<Box<CdpItems>>,
    #[serde(default)]
    pub properties: Option<Vec<CdpProperty>>,
    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CdpItems {
    #[serde(rename = "type", default)]
    pub base_type: Option<String>,
    #[serde(rename = "$ref", default)]
    pub r#ref: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CdpProperty {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub base_type: Option<String>,
    #[serde(rename = "$ref", default)]
    pub r#ref: Option<String>,
    #[serde(default)]
    pub items: Option<Box<CdpItems>>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub experimental: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CdpCommand {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub experimental: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub parameters: Vec<CdpProperty>,
    #[serde(default)]
    pub returns: Vec<CdpProperty>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CdpEvent {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub experimental: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub parameters: Vec<CdpProperty>,
}

impl CdpType {
    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.enum_values.is_some()
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        self.properties.as_ref().is_some_and(|p| !p.is_empty())
    }
}
