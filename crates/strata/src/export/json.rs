//! JSON export of composed layouts.
//!
//! The document mirrors [`DiagramLayout`] with plain fields so renderers in any
//! language can consume it:
//!
//! ```json
//! {
//!   "direction": "LR",
//!   "width": 360, "height": 100,
//!   "nodes": [{ "id": "web", "path": "web", "kind": "entity", "entity_kind": null, ... }],
//!   "edges": [{ "source": { "path": "web", "external": false }, ... }]
//! }
//! ```

use std::io::Write;

use log::{debug, info};
use serde::Serialize;

use strata_core::{direction::Direction, geometry::Point};

use super::{Error, Exporter};
use crate::{
    layout::{DiagramLayout, NodeKind, PositionedEdge, PositionedNode},
    structure::Endpoint,
};

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub direction: Direction,
    pub width: u32,
    pub height: u32,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub path: String,
    pub label: String,
    pub kind: NodeKind,
    pub entity_kind: Option<String>,
    pub parent: Option<String>,
    pub depth: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Serialize)]
pub struct EndpointDump {
    pub path: String,
    pub external: bool,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub source: EndpointDump,
    pub target: EndpointDump,
    pub scope: Option<String>,
    pub source_anchor: Point,
    pub target_anchor: Point,
    pub label: Option<String>,
}

impl LayoutDump {
    pub fn from_layout(layout: &DiagramLayout) -> Self {
        Self {
            direction: layout.direction(),
            width: layout.width(),
            height: layout.height(),
            nodes: layout.nodes().iter().map(NodeDump::from_node).collect(),
            edges: layout.edges().iter().map(EdgeDump::from_edge).collect(),
        }
    }
}

impl NodeDump {
    fn from_node(node: &PositionedNode) -> Self {
        let bounds = node.bounds();
        Self {
            id: node.id().to_string(),
            path: node.path().to_string(),
            label: node.label().to_string(),
            kind: node.kind(),
            entity_kind: node.entity_kind().map(str::to_string),
            parent: node.parent().map(|parent| parent.to_string()),
            depth: node.depth(),
            x: bounds.min_x(),
            y: bounds.min_y(),
            width: bounds.width(),
            height: bounds.height(),
        }
    }
}

impl From<Endpoint> for EndpointDump {
    fn from(endpoint: Endpoint) -> Self {
        Self {
            path: endpoint.id().to_string(),
            external: endpoint.is_external(),
        }
    }
}

impl EdgeDump {
    fn from_edge(edge: &PositionedEdge) -> Self {
        Self {
            source: edge.source().into(),
            target: edge.target().into(),
            scope: edge.scope().map(|scope| scope.to_string()),
            source_anchor: edge.source_anchor(),
            target_anchor: edge.target_anchor(),
            label: edge.label().map(str::to_string),
        }
    }
}

/// Writes layouts as JSON documents.
#[derive(Debug)]
pub struct JsonExporter<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonExporter<W> {
    /// Create an exporter writing compact JSON to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    /// Enable indented output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Consume the exporter and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Exporter for JsonExporter<W> {
    fn export_layout(&mut self, layout: &DiagramLayout) -> Result<(), Error> {
        info!(nodes = layout.nodes().len(), edges = layout.edges().len(); "Exporting layout as JSON");
        let dump = LayoutDump::from_layout(layout);
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &dump)?;
        } else {
            serde_json::to_writer(&mut self.writer, &dump)?;
        }
        self.writer.flush()?;
        debug!("JSON export finished");
        Ok(())
    }
}

/// Renders `layout` to an indented JSON string.
pub fn to_string(layout: &DiagramLayout) -> Result<String, Error> {
    let mut exporter = JsonExporter::new(Vec::new()).with_pretty(true);
    exporter.export_layout(layout)?;
    String::from_utf8(exporter.into_inner()).map_err(|err| Error::Render(err.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use strata_core::model::{Entity, Model, Relation};

    use super::*;
    use crate::layout::Composer;

    fn sample_layout() -> DiagramLayout {
        let model = Model::new(
            vec![
                Entity::new("web").with_label("Web app").with_size(100, 40),
                Entity::new("backend").with_children(vec![
                    Entity::new("api").with_kind("service").with_size(80, 40),
                ]),
            ],
            vec![
                Relation::new("web", "backend.api").with_label("HTTPS"),
                Relation::new("backend.api", "mail.smtp"),
            ],
        );
        Composer::new().compose(&model, Direction::TopToBottom)
    }

    #[test]
    fn test_document_shape() {
        let layout = sample_layout();
        let json: Value = serde_json::from_str(&to_string(&layout).unwrap()).unwrap();

        assert_eq!(json["direction"], "TB");
        assert_eq!(json["width"], layout.width());
        assert_eq!(json["height"], layout.height());
        assert_eq!(json["nodes"].as_array().unwrap().len(), layout.nodes().len());

        let web = &json["nodes"][0];
        assert_eq!(web["id"], "web");
        assert_eq!(web["label"], "Web app");
        assert_eq!(web["kind"], "entity");
        assert_eq!(web["parent"], Value::Null);
        assert_eq!(web["width"], 100);
    }

    #[test]
    fn test_nested_and_external_entries() {
        let json: Value = serde_json::from_str(&to_string(&sample_layout()).unwrap()).unwrap();
        let nodes = json["nodes"].as_array().unwrap();

        let api = nodes.iter().find(|node| node["path"] == "backend.api").unwrap();
        assert_eq!(api["parent"], "backend");
        assert_eq!(api["depth"], 1);
        assert_eq!(api["entity_kind"], "service");
        assert_eq!(nodes[0]["entity_kind"], Value::Null);

        // Endpoints outside every scope resolve at the root.
        let mail = nodes.iter().find(|node| node["path"] == "mail").unwrap();
        assert_eq!(mail["kind"], "external");
        assert_eq!(mail["depth"], 0);

        let edges = json["edges"].as_array().unwrap();
        let outbound = edges
            .iter()
            .find(|edge| edge["target"]["external"] == true)
            .unwrap();
        assert_eq!(outbound["scope"], Value::Null);
        assert_eq!(outbound["source"]["path"], "backend");
        assert_eq!(outbound["target"]["path"], "mail");
        assert!(outbound["source_anchor"]["x"].is_u64());
    }

    #[test]
    fn test_compact_writer() {
        let layout = sample_layout();
        let mut exporter = JsonExporter::new(Vec::new());
        exporter.export_layout(&layout).unwrap();
        let bytes = exporter.into_inner();
        assert!(!bytes.contains(&b'\n'));
        assert!(serde_json::from_slice::<Value>(&bytes).is_ok());
    }
}
