//! Integration tests for the LayoutBuilder API
//!
//! These tests drive the public API the way a renderer would: parse a model
//! document, lay it out and read the positioned boxes and edges back.

use strata::{
    LayoutBuilder, StrataError,
    config::AppConfig,
    direction::{Direction, Side},
    identifier::Id,
    layout::NodeKind,
    structure::Endpoint,
};

const PLATFORM: &str = r#"
[style]
direction = "LR"

[[entities]]
id = "user"
label = "Customer"
kind = "person"

[[entities]]
id = "platform"
label = "Shop platform"

[[entities.children]]
id = "web"
label = "Storefront"

[[entities.children]]
id = "api"
label = "Orders API"

[[entities.children]]
id = "db"
kind = "database"

[[relations]]
from = "user"
to = "platform.web"
label = "browses"

[[relations]]
from = "platform.web"
to = "platform.api"

[[relations]]
from = "platform.api"
to = "platform.db"

[[relations]]
from = "platform.api"
to = "payments.gateway"
label = "charges"
"#;

#[test]
fn test_builder_api_exists() {
    let _builder = LayoutBuilder::default();
}

#[test]
fn test_parse_simple_model() {
    let builder = LayoutBuilder::default();
    let result = builder.parse(PLATFORM);
    assert!(result.is_ok(), "Should parse valid model: {:?}", result.err());

    let model = result.unwrap();
    assert_eq!(model.entities().len(), 2);
    assert_eq!(model.entity_count(), 5);
    assert_eq!(model.relations().len(), 4);
}

#[test]
fn test_parse_invalid_document_returns_error() {
    let builder = LayoutBuilder::default();
    let result = builder.parse("entities = 42");
    assert!(
        matches!(result, Err(StrataError::Model { .. })),
        "Should return a model error for an invalid document"
    );
}

#[test]
fn test_layout_platform() {
    let builder = LayoutBuilder::default();
    let model = builder.parse(PLATFORM).expect("Failed to parse model");
    let layout = builder.layout(&model);

    assert_eq!(layout.direction(), Direction::LeftToRight);

    let paths: Vec<String> = layout
        .nodes()
        .iter()
        .map(|node| node.path().to_string())
        .collect();
    assert_eq!(
        paths,
        [
            "user",
            "platform",
            "platform.web",
            "platform.api",
            "platform.db",
            "payments"
        ]
    );

    let platform = layout.node("platform").unwrap();
    assert_eq!(platform.kind(), NodeKind::Container);
    assert_eq!(platform.label(), "Shop platform");
    for child in layout.children_of(Id::new("platform")) {
        assert!(platform.bounds().contains(&child.bounds()));
        assert_eq!(child.depth(), 1);
    }

    let payments = layout.node("payments").unwrap();
    assert_eq!(payments.kind(), NodeKind::External);

    // user -> platform -> payments along the x axis.
    let user = layout.node("user").unwrap();
    assert!(platform.bounds().min_x() > user.bounds().max_x());
    assert!(payments.bounds().min_x() > platform.bounds().max_x());
}

#[test]
fn test_edges_and_anchors() {
    let builder = LayoutBuilder::default();
    let model = builder.parse(PLATFORM).expect("Failed to parse model");
    let layout = builder.layout(&model);

    // Root: user -> platform, platform -> payments. Inner: web -> api, api -> db.
    assert_eq!(layout.edges().len(), 4);

    let charges = layout
        .edges()
        .iter()
        .find(|edge| edge.label() == Some("charges"))
        .expect("external edge is retained");
    assert_eq!(charges.source(), Endpoint::Known(Id::new("platform")));
    assert_eq!(charges.target(), Endpoint::External(Id::new("payments")));
    assert_eq!(charges.scope(), None);

    for edge in layout.edges() {
        let source = layout.node(edge.source().id()).unwrap();
        let target = layout.node(edge.target().id()).unwrap();
        assert_eq!(edge.source_anchor(), Side::Right.anchor(source.bounds()));
        assert_eq!(edge.target_anchor(), Side::Left.anchor(target.bounds()));
    }
}

#[test]
fn test_direction_override() {
    let builder = LayoutBuilder::default().with_direction(Direction::BottomToTop);
    let model = builder.parse(PLATFORM).expect("Failed to parse model");
    let layout = builder.layout(&model);

    assert_eq!(layout.direction(), Direction::BottomToTop);
    let user = layout.node("user").unwrap();
    let platform = layout.node("platform").unwrap();
    assert!(platform.bounds().max_y() < user.bounds().min_y());
}

#[test]
fn test_render_json() {
    let builder = LayoutBuilder::new(AppConfig::default());
    let model = builder.parse(PLATFORM).expect("Failed to parse model");
    let json = builder.render_json(&model).expect("Failed to render");

    assert!(json.contains("\"direction\": \"LR\""));
    assert!(json.contains("\"platform.api\""));
    assert!(json.contains("\"external\": true"));
}

#[test]
fn test_builder_reusability() {
    let builder = LayoutBuilder::default();
    let model = builder.parse(PLATFORM).expect("Failed to parse model");

    let first = builder.render_json(&model).expect("Failed to render first");
    let second = builder.render_json(&model).expect("Failed to render second");
    assert_eq!(first, second, "Layout must be deterministic");
}
