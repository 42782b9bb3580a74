use super::*;
use crate::schema::SchemaDocument;

fn doc_with_bug() -> SchemaDocument {
    let json = serde_json::json!({
        "version": { "major": "1", "minor": "3" },
        "domains": [
            {
                "domain": "DOM",
                "types": [],
                "commands": [{
                    "name": "resolveNode",
                    "parameters": [
                        { "name": "nodeId", "type": "integer", "optional": true },
                        { "name": "backendNodeId", "type": "integer", "optional": true }
                    ],
                    "returns": []
                }],
                "events": []
            },
            {
                "domain": "Page",
                "types": [],
                "commands": [],
                "events": [{
                    "name": "screencastVisibilityChanged",
                    "description": "The `visible` state changed.",
                    "parameters": []
                }]
            },
            {
                "domain": "Network",
                "types": [{
                    "id": "Cookie",
                    "type": "object",
                    "properties": [
                        { "name": "name", "type": "string" },
                        { "name": "expires", "type": "number", "optional": false }
                    ]
                }],
                "commands": [],
                "events": []
            }
        ]
    })
    .to_string();
    serde_json::from_str(&json).unwrap()
}

#[test]
fn patch_table_has_exactly_three_named_patches() {
    assert_eq!(patch_names().len(), 3);
}

#[test]
fn resolve_node_second_param_becomes_backend_node_id_ref() {
    let mut doc = doc_with_bug();
    apply_patches(&mut doc);
    let dom = doc.domains.iter().find(|d| d.domain == "DOM").unwrap();
    let cmd = dom.commands.iter().find(|c| c.name == "resolveNode").unwrap();
    assert_eq!(cmd.parameters[1].r#ref.as_deref(), Some("BackendNodeId"));
    assert!(cmd.parameters[1].base_type.is_none());
}

#[test]
fn screencast_visibility_changed_description_loses_backticks() {
    let mut doc = doc_with_bug();
    apply_patches(&mut doc);
    let page = doc.domains.iter().find(|d| d.domain == "Page").unwrap();
    let event = page
        .events
        .iter()
        .find(|e| e.name == "screencastVisibilityChanged")
        .unwrap();
    assert_eq!(event.description.as_deref(), Some("The visible state changed."));
}

#[test]
fn network_cookie_expires_becomes_optional() {
    let mut doc = doc_with_bug();
    apply_patches(&mut doc);
    let network = doc.domains.iter().find(|d| d.domain == "Network").unwrap();
    let cookie = network.types.iter().find(|t| t.id == "Cookie").unwrap();
    let expires = cookie
        .properties
        .as_ref()
        .unwrap()
        .iter()
        .find(|p| p.name == "expires")
        .unwrap();
    assert!(expires.optional);
}

#[test]
fn applying_patches_twice_is_a_no_op_beyond_the_first_pass() {
    let mut doc = doc_with_bug();
    apply_patches(&mut doc);
    let once = format!("{:?}", doc.domains);
    apply_patches(&mut doc);
    let twice = format!("{:?}", doc.domains);
    assert_eq!(once, twice);
}

#[test]
fn patching_a_schema_missing_the_targeted_domain_is_a_no_op() {
    let mut doc: SchemaDocument = serde_json::from_str(
        &serde_json::json!({
            "version": { "major": "1", "minor": "3" },
            "domains": [{ "domain": "Unrelated", "types": [], "commands": [], "events": [] }]
        })
        .to_string(),
    )
    .unwrap();
    apply_patches(&mut doc);
    assert_eq!(doc.domains.len(), 1);
}
