//! Unit tests for the configuration tree query surface.

use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};
use serde_json::json;

use super::{ConfigNode, NodeKind, Presence};
use crate::BindError;

#[fixture]
fn body() -> ConfigNode {
    ConfigNode::new("Body")
        .with_value("name", "Kerbin")
        .with_value("tag", "home")
        .with_value("tag", "blue")
        .with_node(ConfigNode::new("Properties").with_value("radius", "600000"))
        .with_node(ConfigNode::new("Ring").with_value("angle", "0"))
        .with_node(ConfigNode::new("Ring").with_value("angle", "15"))
}

#[rstest]
fn value_returns_first_match(body: ConfigNode) {
    assert_eq!(body.value("tag"), Some("home"));
    assert_eq!(body.values_named("tag").collect::<Vec<_>>(), ["home", "blue"]);
    assert_eq!(body.value("missing"), None);
}

#[rstest]
fn node_queries_preserve_order(body: ConfigNode) {
    let angles: Vec<_> = body
        .nodes_named("Ring")
        .filter_map(|ring| ring.value("angle"))
        .collect();
    assert_eq!(angles, ["0", "15"]);
    assert_eq!(body.nodes().len(), 3);
    assert_eq!(
        body.node("Ring").and_then(|ring| ring.value("angle")),
        Some("0")
    );
}

#[rstest]
#[case::scalar("name", Presence { scalar: true, node: false }, Some(NodeKind::Scalar))]
#[case::node("Properties", Presence { scalar: false, node: true }, Some(NodeKind::Node))]
#[case::absent("mass", Presence::default(), None)]
fn presence_reports_shapes(
    body: ConfigNode,
    #[case] key: &str,
    #[case] expected: Presence,
    #[case] found: Option<NodeKind>,
) {
    let presence = body.presence(key);
    assert_eq!(presence, expected);
    assert_eq!(presence.found(), found);
}

#[test]
fn presence_prefers_scalar_when_both_exist() {
    let node = ConfigNode::new("Root")
        .with_value("Atmosphere", "none")
        .with_node(ConfigNode::new("Atmosphere"));
    let presence = node.presence("Atmosphere");
    assert_eq!(presence.found(), Some(NodeKind::Scalar));
    assert!(presence.offers(NodeKind::Node));
}

#[test]
fn from_json_expands_arrays_into_repeated_entries() -> Result<()> {
    let node = ConfigNode::from_json(
        "Mods",
        json!({
            "VertexHeightNoise": [{ "deformity": 200 }, { "deformity": 50.5 }],
            "key": ["0 1", "1 2"],
            "enabled": true,
            "ignored": null,
        }),
    )
    .map_err(|err| anyhow!(err.to_string()))?;

    let deformities: Vec<_> = node
        .nodes_named("VertexHeightNoise")
        .filter_map(|n| n.value("deformity"))
        .collect();
    ensure!(deformities == ["200", "50.5"], "unexpected {deformities:?}");
    ensure!(node.values_named("key").count() == 2, "expected two keys");
    ensure!(node.value("enabled") == Some("true"), "bool should stringify");
    ensure!(!node.has_value("ignored"), "null entries should be dropped");
    Ok(())
}

#[rstest]
#[case::not_object(json!([1, 2]))]
#[case::nested_array(json!({ "key": [[1, 2]] }))]
fn from_json_rejects_shapes_without_tree_form(#[case] value: serde_json::Value) {
    let err = ConfigNode::from_json("Root", value).expect_err("shape should be rejected");
    assert!(matches!(&*err, BindError::Tree { .. }), "got {err:?}");
}
