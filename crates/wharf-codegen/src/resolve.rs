//! Reference resolution and dependency inference over a loaded [`Schema`].
//!
//! The generator ignores each domain's declared `dependencies` field and
//! instead computes real cross-domain imports by scanning every `$ref` that
//! actually occurs in a domain's types, commands, and events.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::SchemaError;
use crate::loader::Schema;
use crate::schema::{CdpCommand, CdpDomain, CdpEvent, CdpItems, CdpProperty, CdpType};

/// A `$ref` split into its owning domain (if cross-domain) and type id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedRef {
    pub domain: Option<String>,
    pub type_id: String,
}

/// Parse a schema `$ref` string (`TypeId` or `Domain.TypeId`).
#[must_use]
pub fn parse_ref(r#ref: &str) -> ResolvedRef {
    match r#ref.split_once('.') {
        Some((domain, type_id)) => ResolvedRef {
            domain: Some(domain.to_string()),
            type_id: type_id.to_string(),
        },
        None => ResolvedRef {
            domain: None,
            type_id: r#ref.to_string(),
        },
    }
}

/// Collect every `$ref` string that occurs anywhere in a domain's types,
/// commands, and events (including inside `items`).
#[must_use]
pub fn collect_refs(domain: &CdpDomain) -> Vec<String> {
    let mut refs = Vec::new();
    for t in &domain.types {
        collect_refs_in_type(t, &mut refs);
    }
    for c in &domain.commands {
        collect_refs_in_command(c, &mut refs);
    }
    for e in &domain.events {
        collect_refs_in_event(e, &mut refs);
    }
    refs
}

fn collect_refs_in_type(t: &CdpType, out: &mut Vec<String>) {
    if let Some(items) = &t.items {
        collect_refs_in_items(items, out);
    }
    if let Some(props) = &t.properties {
        for p in props {
            collect_refs_in_property(p, out);
        }
    }
}

fn collect_refs_in_command(c: &CdpCommand, out: &mut Vec<String>) {
    for p in &c.parameters {
        collect_refs_in_property(p, out);
    }
    for p in &c.returns {
        collect_refs_in_property(p, out);
    }
}

fn collect_refs_in_event(e: &CdpEvent, out: &mut Vec<String>) {
    for p in &e.parameters {
        collect_refs_in_property(p, out);
    }
}

fn collect_refs_in_property(p: &CdpProperty, out: &mut Vec<String>) {
    if let Some(r) = &p.r#ref {
        out.push(r.clone());
    }
    if let Some(items) = &p.items {
        collect_refs_in_items(items, out);
    }
}

fn collect_refs_in_items(items: &CdpItems, out: &mut Vec<String>) {
    if let Some(r) = &items.r#ref {
        out.push(r.clone());
    }
}

/// The foreign domains a domain actually depends on, computed by scanning
/// `$ref`s rather than trusting the schema's declared `dependencies`.
#[must_use]
pub fn referenced_domains(domain: &CdpDomain) -> BTreeSet<String> {
    collect_refs(domain)
        .iter()
        .filter_map(|r| parse_ref(r).domain)
        .filter(|d| d != &domain.domain)
        .collect()
}

/// A global index of every declared type id, keyed by `Domain.TypeId`.
pub struct TypeIndex {
    ids: HashMap<(String, String), ()>,
}

impl TypeIndex {
    #[must_use]
    pub fn build(schema: &Schema) -> Self {
        let mut ids = HashMap::new();
        for domain in &schema.domains {
            for t in &domain.types {
                ids.insert((domain.domain.clone(), t.id.clone()), ());
            }
        }
        Self { ids }
    }

    #[must_use]
    pub fn contains(&self, domain: &str, type_id: &str) -> bool {
        self.ids.contains_key(&(domain.to_string(), type_id.to_string()))
    }
}

/// Verify that every `$ref` in the schema resolves to a declared type,
/// after patching. Intra-domain refs resolve within the referencing
/// domain; cross-domain refs resolve against the named domain.
///
/// # Errors
///
/// Returns [`SchemaError::DanglingReference`] for the first unresolved ref
/// encountered (domains are walked in schema order).
pub fn check_reference_closure(schema: &Schema) -> Result<(), SchemaError> {
    let index = TypeIndex::build(schema);
    let domain_names: HashSet<&str> = schema.domains.iter().map(|d| d.domain.as_str()).collect();

    for domain in &schema.domains {
        for r in collect_refs(domain) {
            let resolved = parse_ref(&r);
            let owning_domain = resolved.domain.as_deref().unwrap_or(&domain.domain);
            if resolved.domain.as_deref().is_some_and(|d| !domain_names.contains(d))
                || !index.contains(owning_domain, &resolved.type_id)
            {
                return Err(SchemaError::DanglingReference {
                    domain: domain.domain.clone(),
                    reference: r,
                });
            }
        }
    }
    Ok(())
}
