use super::*;

fn node(backend_node_id: i64, node_type: i64, node_value: &str) -> Node {
    Node {
        node_id: NodeId(backend_node_id),
        backend_node_id: BackendNodeId(backend_node_id),
        node_type,
        node_name: "DIV".to_string(),
        local_name: "div".to_string(),
        node_value: node_value.to_string(),
        child_node_count: None,
        children: None,
        attributes: None,
        document_url: None,
        base_url: None,
        content_document: None,
        shadow_roots: None,
        frame_id: None,
    }
}

fn with_children(mut parent: Node, children: Vec<Node>) -> Node {
    parent.children = Some(children);
    parent
}

#[test]
fn find_by_backend_id_locates_self() {
    let root = node(1, 1, "");
    let found = find_by_backend_id(&root, &BackendNodeId(1));
    assert_eq!(found.map(|n| n.backend_node_id.0), Some(1));
}

#[test]
fn find_by_backend_id_searches_children_depth_first() {
    let root = with_children(
        node(1, 1, ""),
        vec![node(2, 1, ""), with_children(node(3, 1, ""), vec![node(4, 1, "")])],
    );
    let found = find_by_backend_id(&root, &BackendNodeId(4));
    assert_eq!(found.map(|n| n.backend_node_id.0), Some(4));
}

#[test]
fn find_by_backend_id_searches_shadow_roots_and_content_document() {
    let mut root = node(1, 1, "");
    root.shadow_roots = Some(vec![node(2, 1, "")]);
    root.content_document = Some(Box::new(node(3, 1, "")));

    assert_eq!(
        find_by_backend_id(&root, &BackendNodeId(2)).map(|n| n.backend_node_id.0),
        Some(2)
    );
    assert_eq!(
        find_by_backend_id(&root, &BackendNodeId(3)).map(|n| n.backend_node_id.0),
        Some(3)
    );
}

#[test]
fn find_by_backend_id_returns_none_for_unknown_id() {
    let root = node(1, 1, "");
    assert!(find_by_backend_id(&root, &BackendNodeId(99)).is_none());
}

#[test]
fn find_parent_of_returns_the_direct_parent() {
    let child = node(2, 3, "hello");
    let root = with_children(node(1, 1, ""), vec![child]);
    let parent = find_parent_of(&root, &BackendNodeId(2));
    assert_eq!(parent.map(|n| n.backend_node_id.0), Some(1));
}

#[test]
fn find_parent_of_returns_none_for_the_root_itself() {
    let root = node(1, 1, "");
    assert!(find_parent_of(&root, &BackendNodeId(1)).is_none());
}

#[test]
fn text_all_concatenates_descendant_text_nodes_only() {
    let root = with_children(
        node(1, 1, ""),
        vec![node(2, TEXT_NODE, "hello "), node(3, 1, "ignored-non-text"), node(4, TEXT_NODE, "world")],
    );
    assert_eq!(text_all(&root), "hello world");
}

#[test]
fn is_stale_node_error_matches_case_insensitively() {
    let err = CdpError::Protocol {
        code: -32000,
        message: "Could not find node with given id".to_string(),
    };
    assert!(is_stale_node_error(&err));
}

#[test]
fn is_stale_node_error_false_for_unrelated_protocol_errors() {
    let err = CdpError::Protocol {
        code: -32000,
        message: "Node does not have a layout object".to_string(),
    };
    assert!(!is_stale_node_error(&err));
}

#[test]
fn is_stale_node_error_false_for_non_protocol_errors() {
    assert!(!is_stale_node_error(&CdpError::ConnectionLost));
}

#[test]
fn find_by_node_id_locates_self_and_descendants() {
    let root = with_children(node(1, 1, ""), vec![node(2, 1, ""), node(3, 1, "")]);
    assert_eq!(
        find_by_node_id(&root, &NodeId(3)).map(|n| n.node_id.0),
        Some(3)
    );
    assert!(find_by_node_id(&root, &NodeId(99)).is_none());
}

#[test]
fn find_parent_of_searches_shadow_roots_and_content_document() {
    let mut root = node(1, 1, "");
    root.shadow_roots = Some(vec![node(2, 1, "")]);
    root.content_document = Some(Box::new(node(3, 1, "")));
    assert_eq!(
        find_parent_of(&root, &BackendNodeId(2)).map(|n| n.backend_node_id.0),
        Some(1)
    );
    assert_eq!(
        find_parent_of(&root, &BackendNodeId(3)).map(|n| n.backend_node_id.0),
        Some(1)
    );
}

fn iframe(backend_node_id: i64, content_document: Node) -> Node {
    let mut n = node(backend_node_id, 1, "");
    n.node_name = "IFRAME".to_string();
    n.content_document = Some(Box::new(content_document));
    n
}

#[test]
fn find_iframe_text_match_parents_scans_frame_documents_case_insensitively() {
    let inner_text = node(20, TEXT_NODE, "Hello World");
    let inner_doc = with_children(node(10, 1, ""), vec![inner_text]);
    let root = with_children(node(1, 1, ""), vec![iframe(2, inner_doc)]);

    let mut out = Vec::new();
    find_iframe_text_match_parents(&root, "hello", &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].backend_node_id.0, 10);
}

#[test]
fn find_iframe_text_match_parents_finds_nothing_outside_frames() {
    let root = with_children(node(1, 1, ""), vec![node(2, TEXT_NODE, "hello world")]);
    let mut out = Vec::new();
    find_iframe_text_match_parents(&root, "hello", &mut out);
    assert!(out.is_empty());
}

#[test]
fn quad_center_averages_the_four_vertices() {
    let quad = vec![0.0, 0.0, 10.0, 0.0, 10.0, 20.0, 0.0, 20.0];
    let (x, y) = quad_center(&quad).unwrap();
    assert_eq!((x, y), (5.0, 10.0));
}

#[test]
fn quad_center_rejects_a_malformed_quad() {
    assert!(quad_center(&[0.0, 0.0]).is_err());
}
