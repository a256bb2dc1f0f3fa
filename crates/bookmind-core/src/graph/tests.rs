use super::*;
use crate::model::EdgeKind;

fn tree(json: &str) -> TreeSource {
    TreeSource::from_json_str(json).unwrap()
}

fn reading_list() -> TreeSource {
    tree(
        r#"{ "root": { "label": "Reading", "children": [
            { "label": "Rust", "children": [
                { "label": "Serde", "url": "https://serde.rs", "title": "Serde docs", "summary": "Serialization" },
                { "label": "Tokio", "children": ["https://tokio.rs", "Async runtime"] }
            ] },
            "Cooking"
        ] } }"#,
    )
}

fn ids(graph: &Graph) -> Vec<&str> {
    graph.nodes().map(|n| n.id.as_str()).collect()
}

#[test]
fn nested_tree_is_walked_in_pre_order_with_generated_ids() {
    let graph = build_graph(&reading_list()).unwrap();
    assert_eq!(
        ids(&graph),
        vec![
            "center",
            "b1",
            "b1-t1",
            "b1-t1-url",
            "b1-t1-title",
            "b1-t1-summary",
            "b1-t2",
            "b1-t2-d1",
            "b1-t2-d2",
            "b2",
        ]
    );
    assert_eq!(graph.center().label, "Reading");
    assert_eq!(graph.edge_count(), graph.node_count() - 1);
}

#[test]
fn kinds_and_structure_types_follow_depth_and_content() {
    let graph = build_graph(&reading_list()).unwrap();
    let kind = |id: &str| graph.node(id).unwrap().kind;
    let structure = |id: &str| graph.node(id).unwrap().structure_type;

    assert_eq!(kind("center"), NodeKind::Center);
    assert_eq!(kind("b1"), NodeKind::Branch);
    assert_eq!(kind("b1-t2"), NodeKind::Topic);
    assert_eq!(kind("b1-t2-d1"), NodeKind::Detail);

    assert_eq!(structure("b1-t1-url"), Some(StructureType::Url));
    assert_eq!(structure("b1-t1-title"), Some(StructureType::Title));
    assert_eq!(structure("b1-t1-summary"), Some(StructureType::Summary));
    assert_eq!(structure("b1-t2-d1"), Some(StructureType::Url));
    assert_eq!(structure("b1-t2-d2"), Some(StructureType::Summary));
    assert_eq!(structure("b1-t2"), None);

    let url = graph.node("b1-t1-url").unwrap();
    assert_eq!(url.label, "https://serde.rs");
    assert_eq!(url.url.as_deref(), Some("https://serde.rs/"));
}

#[test]
fn every_non_center_node_has_one_incoming_edge_from_its_parent() {
    let graph = build_graph(&reading_list()).unwrap();
    for idx in 0..graph.node_count() {
        let node = graph.node_at(idx);
        match graph.incoming_edge(idx) {
            None => assert_eq!(node.kind, NodeKind::Center),
            Some(e) => {
                let edge = graph.edge_at(e);
                assert_eq!(Some(edge.source.as_str()), node.parent_id.as_deref());
                assert_eq!(edge.target, node.id);
                assert_eq!(edge.branch_index, node.branch_index);
                assert_eq!(Some(edge.kind), node.kind.incoming_edge_kind());
            }
        }
    }
    assert_eq!(graph.edge("e-b1-b1-t1").unwrap().kind, EdgeKind::Topic);
}

#[test]
fn branch_index_is_inherited_and_cycles() {
    let children: Vec<String> = (0..8)
        .map(|i| format!(r#"{{ "label": "cat{i}", "children": ["topic{i}"] }}"#))
        .collect();
    let json = format!(
        r#"{{ "root": {{ "label": "All", "children": [{}] }} }}"#,
        children.join(",")
    );
    let graph = build_graph(&tree(&json)).unwrap();
    let branch_indices: Vec<u8> = graph
        .nodes()
        .filter(|n| n.kind == NodeKind::Branch)
        .map(|n| n.branch_index)
        .collect();
    assert_eq!(branch_indices, vec![1, 2, 3, 4, 5, 6, 1, 2]);
    assert_eq!(graph.node("b7-t1").unwrap().branch_index, 1);
    assert_eq!(graph.center().branch_index, 0);
}

#[test]
fn caller_supplied_ids_are_kept() {
    let graph = build_graph(&tree(
        r#"{ "root": { "id": "home", "label": "Home", "children": [
            { "id": "rust", "label": "Rust", "children": [
                { "id": "serde", "label": "Serde", "children": [
                    { "id": "serde-link", "url": "https://serde.rs", "title": "Serde" }
                ] }
            ] }
        ] } }"#,
    ))
    .unwrap();
    assert_eq!(
        ids(&graph),
        vec!["home", "rust", "serde", "serde-link", "serde-link-title"]
    );
    assert_eq!(graph.node("serde-link").unwrap().parent_id.as_deref(), Some("serde"));
}

#[test]
fn generated_ids_step_around_caller_supplied_ones() {
    let graph = build_graph(&tree(
        r#"{ "root": { "children": [
            { "id": "b2", "label": "First", "children": [
                { "label": "Topic", "url": "https://serde.rs" },
                { "id": "b2-t1-url", "label": "Taken" }
            ] },
            { "label": "Second" },
            { "id": "center", "label": "Third" }
        ] } }"#,
    ))
    .unwrap();
    assert_eq!(
        ids(&graph),
        vec![
            "center-2",
            "b2",
            "b2-t1",
            "b2-t1-url-2",
            "b2-t1-url",
            "b2-2",
            "center",
        ]
    );
    assert_eq!(graph.center().id, "center-2");
    assert_eq!(graph.node("b2-2").unwrap().label, "Second");
    assert_eq!(graph.node("b2-2").unwrap().kind, NodeKind::Branch);
    assert_eq!(graph.node("center").unwrap().kind, NodeKind::Branch);
    assert_eq!(graph.edge_count(), graph.node_count() - 1);
}

#[test]
fn build_or_center_keeps_trees_with_mixed_ids() {
    let build = build_graph_or_center(&tree(
        r#"{ "root": { "label": "R", "children": [
            { "id": "b2", "label": "First" },
            { "label": "Second" }
        ] } }"#,
    ));
    assert_eq!(build.diagnostic, None);
    assert_eq!(ids(&build.graph), vec!["center", "b2", "b2-2"]);
}

#[test]
fn file_and_non_url_fields_become_other() {
    let graph = build_graph(&tree(
        r#"{ "root": { "label": "R", "children": [
            { "label": "B", "children": [
                { "label": "T", "children": [ { "file": "notes.pdf" }, { "url": "not a link" }, { "label": "plain" } ] }
            ] }
        ] } }"#,
    ))
    .unwrap();
    let file = graph.node("b1-t1-d1-file").unwrap();
    assert_eq!(file.kind, NodeKind::File);
    assert_eq!(file.structure_type, Some(StructureType::Other));
    let bogus = graph.node("b1-t1-d2-url").unwrap();
    assert_eq!(bogus.structure_type, Some(StructureType::Other));
    assert_eq!(bogus.url, None);
    let plain = graph.node("b1-t1-d3").unwrap();
    assert_eq!(plain.label, "plain");
    assert_eq!(plain.structure_type, Some(StructureType::Other));
}

#[test]
fn flat_tree_builds_the_same_shape() {
    let graph = build_graph(&tree(
        r#"{ "nodes": [
            { "id": "root", "label": "Reading" },
            { "id": "rust", "parent": "root", "label": "Rust" },
            { "id": "serde", "parent": "rust", "label": "Serde" },
            { "id": "serde-url", "parent": "serde", "url": "https://serde.rs" },
            { "id": "serde-summary", "parent": "serde", "summary": "Serialization" }
        ] }"#,
    ))
    .unwrap();
    assert_eq!(
        ids(&graph),
        vec!["root", "rust", "serde", "serde-url", "serde-summary"]
    );
    assert_eq!(graph.node("serde").unwrap().kind, NodeKind::Topic);
    assert_eq!(
        graph.node("serde-url").unwrap().structure_type,
        Some(StructureType::Url)
    );
    assert_eq!(graph.node("serde-url").unwrap().label, "https://serde.rs");
}

#[test]
fn dangling_parent_falls_back_to_center_only() {
    let src = tree(
        r#"{ "nodes": [
            { "id": "root", "label": "Reading" },
            { "id": "rust", "parent": "root", "label": "Rust" },
            { "id": "serde", "parent": "no-such-branch", "label": "Serde" }
        ] }"#,
    );
    assert_eq!(
        build_graph(&src).unwrap_err(),
        MalformedTreeError::DanglingParent {
            node_id: "serde".to_string(),
            parent_id: "no-such-branch".to_string(),
        }
    );

    let GraphBuild { graph, diagnostic } = build_graph_or_center(&src);
    assert!(matches!(
        diagnostic,
        Some(MalformedTreeError::DanglingParent { .. })
    ));
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.center().id, "root");
    assert_eq!(graph.center().label, "Reading");
}

#[test]
fn cycles_are_detected() {
    let src = tree(
        r#"{ "nodes": [
            { "id": "root", "label": "R" },
            { "id": "a", "parent": "b", "label": "A" },
            { "id": "b", "parent": "a", "label": "B" }
        ] }"#,
    );
    let err = build_graph(&src).unwrap_err();
    assert!(matches!(err, MalformedTreeError::Cycle { .. }), "{err}");
    assert!(err.implicates_root());

    let self_loop = tree(
        r#"{ "nodes": [ { "id": "root", "label": "R" }, { "id": "x", "parent": "x" } ] }"#,
    );
    assert_eq!(
        build_graph(&self_loop).unwrap_err(),
        MalformedTreeError::Cycle {
            node_id: "x".to_string()
        }
    );
}

#[test]
fn duplicate_and_missing_roots_are_rejected() {
    let dup = tree(
        r#"{ "nodes": [
            { "id": "root" },
            { "id": "a", "parent": "root" },
            { "id": "a", "parent": "root" }
        ] }"#,
    );
    assert_eq!(
        build_graph(&dup).unwrap_err(),
        MalformedTreeError::DuplicateId {
            node_id: "a".to_string()
        }
    );

    let two_roots = tree(r#"{ "nodes": [ { "id": "r1" }, { "id": "r2" } ] }"#);
    assert!(matches!(
        build_graph(&two_roots).unwrap_err(),
        MalformedTreeError::MultipleRoots { .. }
    ));
    let fallback = build_graph_or_center(&two_roots);
    assert_eq!(fallback.graph.center().id, DEFAULT_CENTER_ID);

    let no_root = tree(r#"{ "nodes": [ { "id": "a", "parent": "b" }, { "id": "b", "parent": "a" } ] }"#);
    assert_eq!(
        build_graph(&no_root).unwrap_err(),
        MalformedTreeError::MissingRoot
    );
}

#[test]
fn nesting_below_details_is_too_deep() {
    let src = tree(
        r#"{ "root": { "label": "R", "children": [
            { "label": "B", "children": [
                { "label": "T", "children": [ { "text": "note", "children": ["deeper"] } ] }
            ] }
        ] } }"#,
    );
    assert!(matches!(
        build_graph(&src).unwrap_err(),
        MalformedTreeError::TooDeep { depth: 4, .. }
    ));
}

#[test]
fn empty_ids_are_rejected() {
    let src = tree(r#"{ "nodes": [ { "id": "root" }, { "id": "", "parent": "root" } ] }"#);
    assert!(matches!(
        build_graph(&src).unwrap_err(),
        MalformedTreeError::EmptyId { .. }
    ));
}

#[test]
fn assemble_keeps_nodes_with_unresolvable_parents() {
    let built = build_graph(&reading_list()).unwrap();
    let mut nodes: Vec<Node> = built.nodes().cloned().collect();
    let edges: Vec<Edge> = built.edges().cloned().collect();
    nodes.push(Node {
        id: "stray".to_string(),
        kind: NodeKind::Topic,
        parent_id: Some("gone".to_string()),
        label: "Stray".to_string(),
        branch_index: 2,
        structure_type: None,
        url: None,
        position: Position::new(5.0, 5.0),
        hidden: false,
        collapsed: false,
    });

    let graph = Graph::assemble(nodes, edges).unwrap();
    let stray = graph.index_of("stray").unwrap();
    assert_eq!(graph.parent_of(stray), None);
    assert_eq!(graph.incoming_edge(stray), None);
    assert_eq!(graph.children_of(graph.index_of("b1").unwrap()).len(), 2);
    assert_eq!(graph.edge_count(), built.edge_count());
}

#[test]
fn subtree_and_ancestors_walk_the_arena() {
    let graph = build_graph(&reading_list()).unwrap();
    let t2 = graph.index_of("b1-t2").unwrap();
    let subtree: Vec<&str> = graph
        .subtree(t2)
        .into_iter()
        .map(|i| graph.node_at(i).id.as_str())
        .collect();
    assert_eq!(subtree, vec!["b1-t2", "b1-t2-d1", "b1-t2-d2"]);

    let leaf = graph.index_of("b1-t2-d2").unwrap();
    let ancestors: Vec<&str> = graph
        .ancestors(leaf)
        .map(|i| graph.node_at(i).id.as_str())
        .collect();
    assert_eq!(ancestors, vec!["b1-t2", "b1", "center"]);
}

#[test]
fn assemble_rejects_parent_cycles() {
    let node = |id: &str, kind: NodeKind, parent: Option<&str>| Node {
        id: id.to_string(),
        kind,
        parent_id: parent.map(str::to_string),
        label: id.to_string(),
        branch_index: 0,
        structure_type: None,
        url: None,
        position: Position::ORIGIN,
        hidden: false,
        collapsed: false,
    };
    let nodes = vec![
        node("center", NodeKind::Center, None),
        node("a", NodeKind::Branch, Some("b")),
        node("b", NodeKind::Topic, Some("a")),
    ];
    let err = Graph::assemble(nodes, Vec::new()).unwrap_err();
    assert!(matches!(err, MalformedTreeError::Cycle { .. }), "{err:?}");

    let self_loop = vec![
        node("center", NodeKind::Center, None),
        node("a", NodeKind::Branch, Some("a")),
    ];
    assert_eq!(
        Graph::assemble(self_loop, Vec::new()).unwrap_err(),
        MalformedTreeError::Cycle {
            node_id: "a".to_string()
        }
    );
}

#[test]
fn sync_edges_follows_both_endpoints() {
    let mut graph = build_graph(&reading_list()).unwrap();
    let t2 = graph.index_of("b1-t2").unwrap();
    assert_eq!(graph.outgoing_edges(t2).len(), 2);

    graph.set_hidden(t2, true);
    graph.sync_edges_of(t2);
    assert!(graph.edge(&edge_id("b1", "b1-t2")).unwrap().hidden);
    assert!(graph.edge(&edge_id("b1-t2", "b1-t2-d1")).unwrap().hidden);
    assert!(!graph.edge(&edge_id("b1", "b1-t1")).unwrap().hidden);
}
