//! Collection binding: fixed element types, keyed scalars and registry tags.

use anyhow::{Result, anyhow, ensure};
use nodebind::{
    BindError, BindOptions, Binder, ConfigNode, Diagnostic, DiagnosticPolicy, Element, NumericList,
    Target, TypeRegistry,
};
use rstest::{fixture, rstest};

#[derive(Debug, Default, Target)]
struct VertexHeightNoise {
    deformity: f64,
}

#[derive(Debug, Default, Target)]
struct VertexSimplexHeight {
    #[bind(identity)]
    name: Option<String>,
    deformity: f64,
}

#[derive(Debug, Default, Target)]
struct Pqs {
    #[bind(merge, collection(key = "Mods", significance = "type", prefix = "Mod."))]
    mods: Vec<Box<dyn Element>>,
}

#[derive(Debug, Default, Target)]
struct ReplacingPqs {
    #[bind(collection(key = "Mods", significance = "type", prefix = "Mod."))]
    mods: Vec<Box<dyn Element>>,
}

#[derive(Debug, Default, Clone, PartialEq, Target)]
struct Layer {
    #[bind(identity)]
    name: String,
    altitude: f64,
}

#[derive(Debug, Default, Target)]
struct Layers {
    #[bind(key = "Layers", merge, collection())]
    layers: Vec<Layer>,
    #[bind(collection(key = "self", significance = "key", element = "point"))]
    points: Vec<NumericList<f64>>,
}

#[fixture]
fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register_as::<VertexHeightNoise>("Mod.VertexHeightNoise");
    registry.register_as::<VertexSimplexHeight>("Mod.VertexSimplexHeight");
    registry
}

fn mods(children: impl IntoIterator<Item = ConfigNode>) -> ConfigNode {
    let mut mods = ConfigNode::new("Mods");
    for child in children {
        mods.push_node(child);
    }
    ConfigNode::new("PQS").with_node(mods)
}

fn noise(deformity: &str) -> ConfigNode {
    ConfigNode::new("VertexHeightNoise").with_value("deformity", deformity)
}

fn simplex(name: &str, deformity: &str) -> ConfigNode {
    ConfigNode::new("VertexSimplexHeight")
        .with_value("name", name)
        .with_value("deformity", deformity)
}

fn deformities(elements: &[Box<dyn Element>]) -> Vec<String> {
    elements
        .iter()
        .map(|element| {
            element
                .downcast_ref::<VertexHeightNoise>()
                .map(|n| format!("noise:{}", n.deformity))
                .or_else(|| {
                    element
                        .downcast_ref::<VertexSimplexHeight>()
                        .map(|s| format!("simplex:{}", s.deformity))
                })
                .unwrap_or_default()
        })
        .collect()
}

#[rstest]
fn repeated_tags_keep_every_element_in_order(registry: TypeRegistry) -> Result<()> {
    let node = mods([noise("1"), simplex("a", "2"), noise("3")]);
    let mut binder = Binder::default().with_registry(&registry);
    let pqs: Pqs = binder.create(&node)?;
    let seen = deformities(&pqs.mods);
    ensure!(seen == ["noise:1", "simplex:2", "noise:3"], "unexpected {seen:?}");
    Ok(())
}

#[rstest]
fn merge_claims_each_live_element_once(registry: TypeRegistry) -> Result<()> {
    let mut binder = Binder::default().with_registry(&registry);
    let mut pqs: Pqs = binder.create(&mods([noise("1"), noise("2")]))?;
    binder.bind(&mut pqs, &mods([noise("10"), noise("20"), noise("30")]))?;
    let seen = deformities(&pqs.mods);
    ensure!(seen == ["noise:10", "noise:20", "noise:30"], "unexpected {seen:?}");
    Ok(())
}

#[rstest]
fn merge_matches_identity_before_position(registry: TypeRegistry) -> Result<()> {
    let mut binder = Binder::default().with_registry(&registry);
    let mut pqs: Pqs = binder.create(&mods([simplex("hills", "1"), simplex("peaks", "2")]))?;
    binder.bind(&mut pqs, &mods([simplex("peaks", "5")]))?;
    let seen = deformities(&pqs.mods);
    ensure!(seen == ["simplex:1", "simplex:5"], "unexpected {seen:?}");
    Ok(())
}

#[rstest]
fn merge_twice_creates_no_duplicates(registry: TypeRegistry) -> Result<()> {
    let node = mods([noise("1"), simplex("a", "2")]);
    let mut binder = Binder::default().with_registry(&registry);
    let mut pqs: Pqs = binder.create(&node)?;
    binder.bind(&mut pqs, &node)?;
    ensure!(pqs.mods.len() == 2, "got {} elements", pqs.mods.len());
    Ok(())
}

#[rstest]
fn replace_mode_rebuilds_the_container(registry: TypeRegistry) -> Result<()> {
    let mut binder = Binder::default().with_registry(&registry);
    let mut pqs: ReplacingPqs = binder.create(&mods([noise("1"), noise("2")]))?;
    binder.bind(&mut pqs, &mods([simplex("a", "9")]))?;
    let seen = deformities(&pqs.mods);
    ensure!(seen == ["simplex:9"], "unexpected {seen:?}");
    Ok(())
}

#[rstest]
#[case::warn(DiagnosticPolicy::Warn)]
#[case::deny(DiagnosticPolicy::Deny)]
fn unknown_tags_follow_policy(registry: TypeRegistry, #[case] policy: DiagnosticPolicy) -> Result<()> {
    let options = BindOptions {
        unknown_elements: policy,
        ..BindOptions::default()
    };
    let mut binder = Binder::new(options).with_registry(&registry);
    let node = mods([noise("1"), ConfigNode::new("LandControl"), noise("2")]);
    let outcome = binder.create::<Pqs>(&node);
    if policy.is_deny() {
        let err = outcome.err().ok_or_else(|| anyhow!("bind should fail"))?;
        ensure!(
            matches!(&*err, BindError::UnresolvedElementType { tag, path } if tag == "Mod.LandControl" && path == "PQS/Mods"),
            "unexpected error: {err}"
        );
    } else {
        let pqs = outcome?;
        ensure!(pqs.mods.len() == 2);
        ensure!(matches!(
            binder.diagnostics(),
            [Diagnostic::UnresolvedElementType { tag, .. }] if tag == "Mod.LandControl"
        ));
    }
    Ok(())
}

#[test]
fn type_significance_requires_a_registry() -> Result<()> {
    let err = nodebind::create::<Pqs>(&mods([noise("1")]))
        .err()
        .ok_or_else(|| anyhow!("bind should fail"))?;
    ensure!(
        matches!(&*err, BindError::InvalidCollection { key, .. } if key == "Mods"),
        "unexpected error: {err}"
    );
    Ok(())
}

#[test]
fn fixed_element_types_merge_by_identity() -> Result<()> {
    let first = ConfigNode::new("Atmosphere").with_node(
        ConfigNode::new("Layers")
            .with_node(ConfigNode::new("Layer").with_value("name", "low").with_value("altitude", "1"))
            .with_node(ConfigNode::new("Layer").with_value("name", "high").with_value("altitude", "2")),
    );
    let patch = ConfigNode::new("Atmosphere").with_node(
        ConfigNode::new("Layers")
            .with_node(ConfigNode::new("Layer").with_value("name", "high").with_value("altitude", "20"))
            .with_node(ConfigNode::new("Layer").with_value("name", "top").with_value("altitude", "30")),
    );
    let mut layers: Layers = nodebind::create(&first)?;
    nodebind::bind(&mut layers, &patch)?;
    let summary: Vec<(&str, f64)> = layers
        .layers
        .iter()
        .map(|layer| (layer.name.as_str(), layer.altitude))
        .collect();
    ensure!(
        summary == [("low", 1.0), ("high", 20.0), ("top", 30.0)],
        "unexpected {summary:?}"
    );
    Ok(())
}

#[test]
fn keyed_scalars_become_elements() -> Result<()> {
    let node = ConfigNode::new("Path")
        .with_value("point", "0 0 1")
        .with_value("other", "ignored")
        .with_value("point", "1;2;3");
    let layers: Layers = nodebind::create(&node)?;
    let points: Vec<&[f64]> = layers.points.iter().map(NumericList::as_slice).collect();
    ensure!(
        points == [[0.0, 0.0, 1.0].as_slice(), [1.0, 2.0, 3.0].as_slice()],
        "unexpected {points:?}"
    );
    Ok(())
}

#[derive(Debug, Default, Target)]
struct Surface {
    albedo: f64,
    #[bind(collection(key = "self", significance = "key", element = "point"))]
    points: Vec<NumericList<f64>>,
}

#[derive(Debug, Default, Target)]
struct Terrain {
    #[bind(key = "Surface", merge)]
    surface: Surface,
}

#[test]
fn self_collections_survive_patches_that_omit_them() -> Result<()> {
    let first = ConfigNode::new("Terrain").with_node(
        ConfigNode::new("Surface")
            .with_value("albedo", "0.3")
            .with_value("point", "0 0")
            .with_value("point", "1 1"),
    );
    let patch = ConfigNode::new("Terrain")
        .with_node(ConfigNode::new("Surface").with_value("albedo", "0.5"));
    let mut terrain: Terrain = nodebind::create(&first)?;
    nodebind::bind(&mut terrain, &patch)?;

    ensure!(terrain.surface.albedo.to_bits() == 0.5_f64.to_bits());
    ensure!(
        terrain.surface.points.len() == 2,
        "unexpected {:?}",
        terrain.surface.points
    );
    Ok(())
}

#[test]
fn fixed_element_types_reject_type_significance() -> Result<()> {
    #[derive(Debug, Default, Target)]
    struct Misdeclared {
        #[bind(collection(key = "Layers", significance = "type"))]
        layers: Vec<Layer>,
    }

    let node = ConfigNode::new("Misdeclared").with_node(ConfigNode::new("Layers"));
    let err = nodebind::create::<Misdeclared>(&node)
        .err()
        .ok_or_else(|| anyhow!("bind should fail"))?;
    ensure!(matches!(*err, BindError::InvalidCollection { .. }));
    Ok(())
}
