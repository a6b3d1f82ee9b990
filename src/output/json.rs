use super::style::EdgeStyle;
use crate::model::{GraphLayout, NodeRole};
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonLayout<'a> {
    nodes: Vec<JsonNode<'a>>,
    edges: Vec<JsonEdge<'a>>,
    metadata: JsonMetadata,
}

#[derive(Serialize)]
struct JsonNode<'a> {
    id: &'a str,
    role: NodeRole,
    x: f64,
    y: f64,
    connectivity: usize,
    attempts: usize,
    resolved: bool,
}

#[derive(Serialize)]
struct JsonEdge<'a> {
    source: &'a str,
    target: &'a str,
    weight: u64,
    width: f64,
    color: String,
}

#[derive(Serialize)]
struct JsonMetadata {
    entity_count: usize,
    attribute_count: usize,
    edge_count: usize,
    fully_resolved: bool,
}

impl OutputFormatter for JsonOutput {
    fn format<W: Write>(&self, layout: &GraphLayout, writer: &mut W) -> std::io::Result<()> {
        let styles = EdgeStyle::for_layout(layout);

        let json_layout = JsonLayout {
            nodes: layout
                .nodes()
                .map(|n| JsonNode {
                    id: &n.label,
                    role: n.role,
                    x: n.position.x,
                    y: n.position.y,
                    connectivity: n.connectivity,
                    attempts: n.attempts,
                    resolved: n.resolved,
                })
                .collect(),
            edges: layout
                .edges
                .iter()
                .zip(styles.iter())
                .map(|(e, s)| JsonEdge {
                    source: &e.entity,
                    target: &e.attribute,
                    weight: e.weight,
                    width: s.width,
                    color: s.color.hex(),
                })
                .collect(),
            metadata: JsonMetadata {
                entity_count: layout.entities.len(),
                attribute_count: layout.attributes.len(),
                edge_count: layout.edges.len(),
                fully_resolved: layout.fully_resolved(),
            },
        };

        let json = match self.pretty {
            true => serde_json::to_string_pretty(&json_layout),
            false => serde_json::to_string(&json_layout),
        };
        let json = json.map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LayoutEdge, PlacedNode, Point};

    #[test]
    fn test_json_lists_nodes_and_edges() {
        let layout = GraphLayout {
            entities: vec![PlacedNode::entity("Staff", Point::new(1.5, 0.0))],
            attributes: vec![PlacedNode {
                label: "friendly".into(),
                role: NodeRole::Attribute,
                position: Point::new(1.75, 0.0),
                connectivity: 1,
                attempts: 0,
                resolved: true,
            }],
            edges: vec![LayoutEdge {
                entity: "Staff".into(),
                attribute: "friendly".into(),
                weight: 4,
            }],
        };

        let mut buf = Vec::new();
        JsonOutput::new().format(&layout, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(value["nodes"][0]["role"], "entity");
        assert_eq!(value["nodes"][1]["id"], "friendly");
        assert_eq!(value["edges"][0]["width"], 2.0);
        assert_eq!(value["metadata"]["fully_resolved"], true);
    }
}
