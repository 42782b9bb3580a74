//! Integration-style tests covering the "concrete scenarios" in the testable
//! properties for the schema loader and generator.


use crate::error::SchemaError;
use crate::load;

#[test]
fn version_gate_rejects_non_1_3_schema() {
    let browser = fixtures::schema_json(1, 2, &[]);
    let js = fixtures::schema_json(1, 2, &[]);
    let err = load(&browser, &js).unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedVersion { .. }));
}

#[test]
fn version_gate_accepts_1_3_schema() {
    let browser = fixtures::schema_json(1, 3, &[]);
    let js = fixtures::schema_json(1, 3, &[]);
    assert!(load(&browser, &js).is_ok());
}

#[test]
fn domains_are_sorted_by_name_regardless_of_input_order() {
    let browser = fixtures::schema_json(
        1,
        3,
        &[fixtures::empty_domain("Zebra"), fixtures::empty_domain("Alpha")],
    );
    let js = fixtures::schema_json(1, 3, &[]);
    let schema = load(&browser, &js).expect("schema should load");
    let names: Vec<&str> = schema.domains.iter().map(|d| d.domain.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Zebra"]);
}

#[test]
fn patch_table_is_idempotent() {
    let mut browser_doc = fixtures::parsed_with_resolve_node_bug();
    crate::patches::apply_patches(&mut browser_doc);
    let once = browser_doc.clone();
    crate::patches::apply_patches(&mut browser_doc);
    assert_eq!(
        format!("{:?}", once.domains),
        format!("{:?}", browser_doc.domains),
        "applying the patch table twice must be a no-op beyond the first pass"
    );
}

#[test]
fn patch_fixes_dom_resolve_node_backend_node_id_ref() {
    let mut doc = fixtures::parsed_with_resolve_node_bug();
    crate::patches::apply_patches(&mut doc);
    let dom = doc.domains.iter().find(|d| d.domain == "DOM").unwrap();
    let cmd = dom.commands.iter().find(|c| c.name == "resolveNode").unwrap();
    assert_eq!(cmd.parameters[1].r#ref.as_deref(), Some("BackendNodeId"));
}
