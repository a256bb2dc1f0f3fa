use bookmind_core::model::NodeKind;
use bookmind_core::{CascadePolicy, MalformedTreeError, MindmapConfig, ToggleCommand, ToggleError};
use bookmind_layout::layout::PREFERRED_BRANCH_ANGLES;
use bookmind_layout::{Bounds, Error, MindmapLayout, MindmapSession};
use std::f64::consts::TAU;
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn fixture(name: &str) -> String {
    let path = workspace_root().join("fixtures").join("mindmap").join(name);
    std::fs::read_to_string(&path).expect("fixture")
}

fn session(name: &str) -> MindmapSession {
    let mut session = MindmapSession::default();
    let diagnostic = session.load_json(&fixture(name)).expect("valid json");
    assert!(diagnostic.is_none(), "{diagnostic:?}");
    session
}

fn toggleable_ids(layout: &MindmapLayout) -> Vec<String> {
    layout
        .nodes
        .iter()
        .filter(|n| n.toggleable)
        .map(|n| n.id.clone())
        .collect()
}

#[test]
fn layout_is_deterministic() {
    let a = session("reading_list.json");
    let mut b = session("reading_list.json");
    assert_eq!(a.snapshot(), b.snapshot());

    b.relayout();
    b.relayout();
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(
        a.snapshot().to_json(false).unwrap(),
        b.snapshot().to_json(false).unwrap()
    );
}

#[test]
fn every_node_gets_a_finite_box() {
    let layout = session("reading_list.json").snapshot();
    assert_eq!(layout.nodes.len(), 19);
    assert_eq!(layout.edges.len(), 18);
    for n in &layout.nodes {
        assert!(n.width.is_finite() && n.width > 0.0, "{}", n.id);
        assert!(n.height.is_finite() && n.height > 0.0, "{}", n.id);
        assert!(n.position.x.is_finite() && n.position.y.is_finite(), "{}", n.id);
    }
}

#[test]
fn six_branches_with_three_topics_each() {
    let layout = session("six_by_three.json").snapshot();
    let branches: Vec<_> = layout
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Branch)
        .collect();
    assert_eq!(branches.len(), 6);

    let expected = PREFERRED_BRANCH_ANGLES[5];
    let mut angles = Vec::new();
    for (branch, want) in branches.iter().zip(expected.iter()) {
        let angle = branch.position.y.atan2(branch.position.x).rem_euclid(TAU);
        let diff = (angle - want).abs();
        assert!(diff < 1e-9 || (TAU - diff) < 1e-9, "{} at {angle}", branch.id);
        angles.push(angle);
    }
    for (i, a) in angles.iter().enumerate() {
        for b in &angles[i + 1..] {
            assert!((a - b).abs() > 1e-6);
        }
    }

    let topics: Vec<_> = layout
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Topic)
        .collect();
    assert_eq!(topics.len(), 18);
    for branch in &branches {
        let mut offsets: Vec<f64> = topics
            .iter()
            .filter(|t| t.id.starts_with(&format!("{}-", branch.id)))
            .map(|t| t.position.y - branch.position.y)
            .collect();
        offsets.sort_by(f64::total_cmp);
        assert_eq!(offsets.len(), 3);
        for (got, want) in offsets.iter().zip([-40.0, 0.0, 40.0]) {
            assert!((got - want).abs() < 1e-9, "{}: {offsets:?}", branch.id);
        }
    }
}

#[test]
fn toggling_twice_restores_positions_and_visibility() {
    for cascade in [CascadePolicy::Transitive, CascadePolicy::DirectChildren] {
        let config = MindmapConfig {
            cascade,
            ..MindmapConfig::default()
        };
        let mut session = MindmapSession::new(config);
        session.load_json(&fixture("reading_list.json")).unwrap();
        session.toggle("b2-t1").unwrap();

        let baseline = session.snapshot();
        for id in toggleable_ids(&baseline) {
            session.toggle(&id).unwrap();
            session.toggle(&id).unwrap();
            assert_eq!(session.snapshot(), baseline, "{cascade:?} {id}");
        }
    }
}

#[test]
fn collapsing_a_topic_repacks_its_siblings() {
    let mut session = session("reading_list.json");
    let before = session.snapshot();
    session.toggle("b1-t2").unwrap();
    let after = session.snapshot();

    // Tokio's details disappear, so its neighbours move closer. Other branches do not move.
    assert!(after.node("b1-t2-d1").unwrap().hidden);
    assert_eq!(
        after.node("b1-t2-d1").unwrap().position,
        before.node("b1-t2-d1").unwrap().position
    );
    assert_ne!(
        after.node("b1-t1").unwrap().position,
        before.node("b1-t1").unwrap().position
    );
    assert_eq!(
        after.node("b2").unwrap().position,
        before.node("b2").unwrap().position
    );
}

#[test]
fn collapsing_the_center_shrinks_bounds_to_the_center() {
    let mut session = session("six_by_three.json");
    let outcome = session.handle(&ToggleCommand::new("center")).unwrap();
    assert!(outcome.collapsed);

    let layout = session.snapshot();
    assert_eq!(layout.visible_nodes().count(), 1);
    assert!(layout.edges.iter().all(|e| e.hidden));
    // "Bookmarks": 9 * 8 + 16 = 88 wide, 32 high.
    assert_eq!(
        layout.bounds,
        Some(Bounds {
            min_x: -44.0,
            min_y: -16.0,
            max_x: 44.0,
            max_y: 16.0,
        })
    );
}

#[test]
fn malformed_tree_degrades_to_the_center() {
    let mut session = MindmapSession::default();
    let diagnostic = session
        .load_json(&fixture("dangling_parent.json"))
        .unwrap()
        .cloned();
    assert_eq!(
        diagnostic,
        Some(MalformedTreeError::DanglingParent {
            node_id: "tokio".to_string(),
            parent_id: "async".to_string(),
        })
    );

    let layout = session.snapshot();
    assert_eq!(layout.nodes.len(), 1);
    assert!(layout.edges.is_empty());
    assert_eq!(layout.nodes[0].id, "root");
    assert_eq!(layout.nodes[0].label, "Bookmarks");
    assert_eq!(layout.nodes[0].kind, NodeKind::Center);
    assert!(session.last_report().skipped.is_empty());
}

#[test]
fn a_new_tree_resets_collapse_state() {
    let mut session = session("reading_list.json");
    session.collapse_all();
    assert!(session.snapshot().nodes.iter().any(|n| n.hidden));

    session.load_json(&fixture("flat_reading_list.json")).unwrap();
    let layout = session.snapshot();
    assert!(layout.nodes.iter().all(|n| !n.hidden && !n.collapsed));
    assert_eq!(layout.nodes[0].id, "root");
    assert!(session.diagnostic().is_none());
}

#[test]
fn rejected_toggles_leave_the_snapshot_alone() {
    let mut session = session("reading_list.json");
    let before = session.snapshot();

    let err = session.toggle("missing").unwrap_err();
    assert!(matches!(
        err,
        Error::Core(bookmind_core::Error::Toggle(ToggleError::UnknownNode { .. }))
    ));
    let err = session.toggle("b1-t1-url").unwrap_err();
    assert!(err.to_string().contains("cannot be collapsed"), "{err}");

    assert_eq!(session.snapshot(), before);
}

#[test]
fn unparseable_json_is_an_error() {
    let mut session = MindmapSession::default();
    assert!(session.load_json("{ not json").is_err());
    assert_eq!(session.snapshot().nodes.len(), 1);
}

#[test]
fn snapshot_serializes_in_camel_case() {
    let layout = session("reading_list.json").snapshot();
    let json: serde_json::Value = serde_json::from_str(&layout.to_json(true).unwrap()).unwrap();

    let tokio_link = json["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["id"] == "b1-t2-d1")
        .unwrap();
    assert_eq!(tokio_link["kind"], "detail");
    assert_eq!(tokio_link["structureType"], "url");
    assert_eq!(tokio_link["branchIndex"], 1);
    assert_eq!(tokio_link["toggleable"], false);
    let shown = tokio_link["displayLabel"].as_str().unwrap();
    assert!(shown.starts_with("tokio.rs"), "{shown}");
    assert!(shown.ends_with("?..."), "{shown}");
    assert!(shown.chars().count() <= 40);

    assert_eq!(tokio_link["colors"]["fill"], "#5e81ac");

    let edge = &json["edges"][0];
    assert_eq!(edge["id"], "e-center-b1");
    assert_eq!(edge["kind"], "branch");
    assert_eq!(edge["color"], "#5e81ac");
    let center = &json["nodes"][0];
    assert_eq!(center["id"], "center");
    assert_eq!(center["colors"]["fill"], "#3b4252");
    assert!(json["bounds"]["minX"].is_number());
}
