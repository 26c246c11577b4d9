//! End-to-end loading of body entries built from JSON fixtures.

use anyhow::{Result, anyhow, ensure};
use nodebind::{
    BindError, BindResult, Binder, Color, ConfigNode, Diagnostic, Element, ExternalTargets,
    FloatCurve, LifecycleHooks, ScalarEnum, Target, TypeRegistry, load_entries,
};
use rstest::{fixture, rstest};
use test_helpers::fixtures;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ScalarEnum)]
enum BodyKind {
    #[default]
    Planet,
    Moon,
    #[scalar(rename = "gas-giant")]
    GasGiant,
}

#[derive(Debug, Default, Target)]
struct Named {
    #[bind(required, early, identity)]
    name: String,
    kind: Option<BodyKind>,
}

#[derive(Debug, Default, Target)]
struct Properties {
    radius: f64,
    mass: f64,
    description: Option<String>,
    color: Option<Color>,
}

#[derive(Debug, Default, Target)]
#[bind(rename_all = "camelCase")]
struct Atmosphere {
    enabled: bool,
    max_altitude: f64,
    pressure_curve: Option<FloatCurve>,
}

#[derive(Debug, Default, Target)]
struct VertexHeightNoise {
    deformity: f64,
    frequency: f64,
}

#[derive(Debug, Default, Target)]
struct VertexSimplexHeight {
    #[bind(identity)]
    name: Option<String>,
    deformity: f64,
}

#[derive(Debug, Default, Target)]
#[bind(hooks)]
struct Body {
    #[bind(flatten)]
    named: Named,
    #[bind(key = "Properties", merge)]
    properties: Properties,
    #[bind(key = "Atmosphere", merge)]
    atmosphere: Option<Atmosphere>,
    #[bind(merge, collection(key = "Mods", significance = "type"))]
    mods: Vec<Box<dyn Element>>,
    #[bind(skip)]
    resolved_early: bool,
}

impl LifecycleHooks for Body {
    fn on_early_resolved(
        &mut self,
        _node: &ConfigNode,
        _binder: &mut Binder<'_>,
    ) -> BindResult<()> {
        self.resolved_early = !self.named.name.is_empty();
        Ok(())
    }
}

#[fixture]
fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register::<VertexHeightNoise>();
    registry.register::<VertexSimplexHeight>();
    registry
}

fn kerbin_node() -> Result<ConfigNode> {
    ConfigNode::from_json("Body", fixtures::kerbin()).map_err(|err| anyhow!(err))
}

#[rstest]
fn binds_a_complete_body(registry: TypeRegistry) -> Result<()> {
    let mut binder = Binder::default().with_registry(&registry);
    let body: Body = binder.create(&kerbin_node()?)?;

    ensure!(body.resolved_early, "flattened early members precede the hook");
    ensure!(body.named.name == "Kerbin");
    ensure!(body.properties.radius.to_bits() == 600_000.0_f64.to_bits());
    ensure!(body.properties.mass > 5.0e22);
    ensure!(body.properties.description.as_deref() == Some("Home planet"));
    ensure!(body.properties.color.is_some_and(|c| c.a.to_bits() == 1.0_f32.to_bits()));

    let atmosphere = body
        .atmosphere
        .as_ref()
        .ok_or_else(|| anyhow!("atmosphere missing"))?;
    ensure!(atmosphere.enabled);
    let curve = atmosphere
        .pressure_curve
        .as_ref()
        .ok_or_else(|| anyhow!("pressure curve missing"))?;
    ensure!(curve.keys().len() == 3);
    ensure!(curve.evaluate(0.0).to_bits() == 101.325_f32.to_bits());

    ensure!(body.mods.len() == 2, "LandControl is not registered");
    ensure!(matches!(
        binder.diagnostics(),
        [Diagnostic::UnresolvedElementType { tag, path }] if tag == "LandControl" && path == "Body/Mods"
    ));
    Ok(())
}

#[rstest]
fn patches_merge_into_a_loaded_body(registry: TypeRegistry) -> Result<()> {
    let mut binder = Binder::default().with_registry(&registry);
    let mut body: Body = binder.create(&kerbin_node()?)?;
    let patch =
        ConfigNode::from_json("Body", fixtures::kerbin_patch()).map_err(|err| anyhow!(err))?;
    binder.bind(&mut body, &patch)?;

    let atmosphere = body
        .atmosphere
        .as_ref()
        .ok_or_else(|| anyhow!("atmosphere missing"))?;
    ensure!(atmosphere.max_altitude.to_bits() == 84_000.0_f64.to_bits());
    ensure!(atmosphere.pressure_curve.is_some(), "merge keeps the curve");
    ensure!(body.properties.radius.to_bits() == 600_000.0_f64.to_bits());

    ensure!(body.mods.len() == 2, "patch elements claim live ones");
    let noise = body
        .mods
        .iter()
        .find_map(|m| m.downcast_ref::<VertexHeightNoise>())
        .ok_or_else(|| anyhow!("noise mod missing"))?;
    ensure!(noise.deformity.to_bits() == 200.0_f64.to_bits());
    ensure!(noise.frequency.to_bits() == 6.0_f64.to_bits());
    let simplex = body
        .mods
        .iter()
        .find_map(|m| m.downcast_ref::<VertexSimplexHeight>())
        .ok_or_else(|| anyhow!("simplex mod missing"))?;
    ensure!(simplex.name.as_deref() == Some("Mountains"));
    ensure!(simplex.deformity.to_bits() == 4_200.0_f64.to_bits());
    Ok(())
}

#[rstest]
fn entries_load_independently(registry: TypeRegistry) -> Result<()> {
    let root =
        ConfigNode::from_json("Kopernicus", fixtures::system()).map_err(|err| anyhow!(err))?;
    let mut binder = Binder::default().with_registry(&registry);
    let outcome = load_entries::<Body>(&mut binder, &root, "Body");

    let names: Vec<&str> = outcome.loaded.iter().map(|b| b.named.name.as_str()).collect();
    ensure!(names == ["Kerbin", "Minmus"], "unexpected {names:?}");
    ensure!(outcome.errors.len() == 2);
    ensure!(matches!(*outcome.errors[0], BindError::MissingRequiredField { .. }));
    ensure!(matches!(*outcome.errors[1], BindError::ScalarFormat { .. }));

    let err = outcome
        .into_result()
        .err()
        .ok_or_else(|| anyhow!("aggregate expected"))?;
    ensure!(matches!(*err, BindError::Aggregate(_)), "unexpected {err}");
    Ok(())
}

#[rstest]
#[case("Moon", BodyKind::Moon)]
#[case("GAS-GIANT", BodyKind::GasGiant)]
#[case(" planet ", BodyKind::Planet)]
#[case("1", BodyKind::Moon)]
fn enumerations_parse_by_name(#[case] raw: &str, #[case] expected: BodyKind) -> Result<()> {
    let node = ConfigNode::new("Named")
        .with_value("name", "Ike")
        .with_value("kind", raw);
    let named: Named = nodebind::create(&node)?;
    ensure!(named.kind == Some(expected), "parsed {:?}", named.kind);
    Ok(())
}

#[test]
fn unknown_enumeration_names_are_format_errors() -> Result<()> {
    let node = ConfigNode::new("Named")
        .with_value("name", "Ike")
        .with_value("kind", "comet");
    let err = nodebind::create::<Named>(&node)
        .err()
        .ok_or_else(|| anyhow!("bind should fail"))?;
    ensure!(
        err.to_string().contains("expected one of: Planet, Moon, gas-giant"),
        "unexpected message: {err}"
    );
    Ok(())
}

#[derive(Debug, Default, Target)]
struct Ocean {
    density: f64,
}

#[derive(Debug, Default, Target)]
struct Rings {
    #[bind(required)]
    texture: String,
}

#[test]
fn external_targets_attach_to_foreign_nodes() -> Result<()> {
    let mut externals = ExternalTargets::new();
    externals.register::<Ocean>("Body");
    externals.register_named::<Rings>("Body", "Rings");

    let root = ConfigNode::new("Kopernicus")
        .with_node(
            ConfigNode::new("Body")
                .with_value("name", "Laythe")
                .with_node(ConfigNode::new("Ocean").with_value("density", "1.1")),
        )
        .with_node(
            ConfigNode::new("Body")
                .with_value("name", "Jool")
                .with_node(ConfigNode::new("Rings")),
        );
    let mut binder = Binder::default();
    let bound = externals.load(&root, &mut binder);

    ensure!(bound.len() == 1);
    let ocean = bound
        .first()
        .and_then(|b| b.target.downcast_ref::<Ocean>())
        .ok_or_else(|| anyhow!("ocean missing"))?;
    ensure!(ocean.density.to_bits() == 1.1_f64.to_bits());
    ensure!(matches!(
        binder.diagnostics(),
        [Diagnostic::ExternalTargetFailed { node, .. }] if node == "Body/Rings"
    ));
    Ok(())
}
