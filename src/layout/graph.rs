use super::LayoutError;
use crate::model::{AssociationTable, LayoutEdge, NodeRole};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub label: String,
    pub role: NodeRole,
}

/// Undirected entity–attribute graph for the selected entities.
///
/// Entities and attributes are kept in separate namespaces, so an attribute
/// spelled like an entity still gets its own node.
pub struct RelationGraph {
    graph: UnGraph<GraphNode, u64>,
    entities: Vec<NodeIndex>,
    attributes: Vec<NodeIndex>,
}

impl RelationGraph {
    /// Build the graph for `selected` entities from `table`.
    ///
    /// Entity nodes follow the order of `selected`. Attribute nodes are created
    /// on first sight while walking the selected entities in order and, for each,
    /// the table rows in order. Rows of unselected entities are ignored.
    pub fn build<S: AsRef<str>>(
        table: &AssociationTable,
        selected: &[S],
    ) -> Result<Self, LayoutError> {
        validate(table)?;

        let mut graph: UnGraph<GraphNode, u64> = UnGraph::new_undirected();
        let mut entity_indices: HashMap<&str, NodeIndex> = HashMap::new();
        let mut attribute_indices: HashMap<&str, NodeIndex> = HashMap::new();
        let mut entities = Vec::with_capacity(selected.len());
        let mut attributes = Vec::new();

        for name in selected {
            let name = name.as_ref();
            if entity_indices.contains_key(name) {
                continue;
            }
            let idx = graph.add_node(GraphNode {
                label: name.to_string(),
                role: NodeRole::Entity,
            });
            entity_indices.insert(name, idx);
            entities.push(idx);
        }

        for &entity_idx in &entities {
            let entity = graph[entity_idx].label.clone();
            for row in table.rows().iter().filter(|r| r.entity == entity) {
                let attr_idx = match attribute_indices.get(row.attribute.as_str()) {
                    Some(&idx) => idx,
                    None => {
                        let idx = graph.add_node(GraphNode {
                            label: row.attribute.clone(),
                            role: NodeRole::Attribute,
                        });
                        attribute_indices.insert(row.attribute.as_str(), idx);
                        attributes.push(idx);
                        idx
                    }
                };

                // Input should already be aggregated; merge stragglers.
                match graph.find_edge(entity_idx, attr_idx) {
                    Some(edge) => graph[edge] = graph[edge].saturating_add(row.count),
                    None => {
                        graph.add_edge(entity_idx, attr_idx, row.count);
                    }
                }
            }
        }

        Ok(Self {
            graph,
            entities,
            attributes,
        })
    }

    pub fn graph(&self) -> &UnGraph<GraphNode, u64> {
        &self.graph
    }

    pub fn entities(&self) -> &[NodeIndex] {
        &self.entities
    }

    pub fn attributes(&self) -> &[NodeIndex] {
        &self.attributes
    }

    pub fn label(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].label
    }

    /// Entity neighbours of an attribute node, in entity selection order.
    pub fn connected_entities(&self, attribute: NodeIndex) -> Vec<NodeIndex> {
        let neighbours: HashSet<NodeIndex> = self
            .graph
            .neighbors(attribute)
            .filter(|&n| self.graph[n].role == NodeRole::Entity)
            .collect();
        self.entities
            .iter()
            .copied()
            .filter(|e| neighbours.contains(e))
            .collect()
    }

    /// Number of distinct selected entities linked to `attribute`.
    pub fn connectivity(&self, attribute: NodeIndex) -> usize {
        self.connected_entities(attribute).len()
    }

    /// Edges grouped by entity in selection order, attributes in insertion order.
    pub fn edges(&self) -> Vec<LayoutEdge> {
        let mut out = Vec::with_capacity(self.graph.edge_count());
        for &entity in &self.entities {
            let mut local: Vec<_> = self
                .graph
                .edges(entity)
                .map(|e| {
                    let other = if e.source() == entity { e.target() } else { e.source() };
                    (other, *e.weight())
                })
                .collect();
            local.sort_by_key(|(other, _)| other.index());
            out.extend(local.into_iter().map(|(attr, weight)| LayoutEdge {
                entity: self.graph[entity].label.clone(),
                attribute: self.graph[attr].label.clone(),
                weight,
            }));
        }
        out
    }
}

fn validate(table: &AssociationTable) -> Result<(), LayoutError> {
    if table.is_empty() {
        return Err(LayoutError::InvalidInput(
            "association table has no rows".to_string(),
        ));
    }

    for (i, row) in table.rows().iter().enumerate() {
        if row.entity.trim().is_empty() {
            return Err(LayoutError::InvalidInput(format!(
                "row {} has an empty entity",
                i + 1
            )));
        }
        if row.attribute.trim().is_empty() {
            return Err(LayoutError::InvalidInput(format!(
                "row {} has an empty attribute",
                i + 1
            )));
        }
        if row.count == 0 {
            return Err(LayoutError::InvalidInput(format!(
                "row {} has a zero count",
                i + 1
            )));
        }
    }

    Ok(())
}
