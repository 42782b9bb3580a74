//! The upstream-schema patch table.
//!
//! Three known bugs in the public CDP schema are corrected here, as data
//! rather than scattered conditionals in the generator. Patches are applied
//! after parsing and before reference resolution, and must be idempotent —
//! applying the table twice produces the same result as applying it once.

use crate::schema::SchemaDocument;

/// One named correction to a parsed schema document.
struct Patch {
    name: &'static str,
    apply: fn(&mut SchemaDocument),
}

const PATCHES: &[Patch] = &[
    Patch {
        name: "dom.resolve_node.backend_node_id_ref",
        apply: patch_dom_resolve_node,
    },
    Patch {
        name: "page.screencast_visibility_changed.strip_backticks",
        apply: patch_page_screencast_visibility_changed,
    },
    Patch {
        name: "network.cookie.expires_optional",
        apply: patch_network_cookie_expires,
    },
];

/// Apply every patch in the table, in order, idempotently.
pub fn apply_patches(doc: &mut SchemaDocument) {
    for patch in PATCHES {
        (patch.apply)(doc);
    }
}

/// Names of all patches in the table, in application order. Exposed for
/// tests that assert the table's contents without duplicating its logic.
#[must_use]
pub fn patch_names() -> Vec<&'static str> {
    PATCHES.iter().map(|p| p.name).collect()
}

fn patch_dom_resolve_node(doc: &mut SchemaDocument) {
    let Some(dom) = doc.domains.iter_mut().find(|d| d.domain == "DOM") else {
        return;
    };
    let Some(cmd) = dom.commands.iter_mut().find(|c| c.name == "resolveNode") else {
        return;
    };
    if let Some(param) = cmd.parameters.get_mut(1) {
        param.r#ref = Some("BackendNodeId".to_string());
        param.base_type = None;
    }
}

fn patch_page_screencast_visibility_changed(doc: &mut SchemaDocument) {
    let Some(page) = doc.domains.iter_mut().find(|d| d.domain == "Page") else {
        return;
    };
    let Some(event) = page
        .events
        .iter_mut()
        .find(|e| e.name == "screencastVisibilityChanged")
    else {
        return;
    };
    if let Some(description) = &mut event.description {
        *description = description.replace('`', "");
    }
}

fn patch_network_cookie_expires(doc: &mut SchemaDocument) {
    let Some(network) = doc.domains.iter_mut().find(|d| d.domain == "Network") else {
        return;
    };
    let Some(cookie) = network.types.iter_mut().find(|t| t.id == "Cookie") else {
        return;
    };
    if let Some(properties) = &mut cookie.properties {
        if let Some(expires) = properties.iter_mut().find(|p| p.name == "expires") {
            expires.optional = true;
        }
    }
}

#[cfg(test)]
mod tests;
