// Radial layout of an entity–attribute relation graph.
//
// Pipeline (each step pure, recomputed from scratch on every call):
// - selection: top-k entities by total association count
// - ring: entities evenly spaced on a circle around the origin
// - graph: entity and shared attribute nodes with weighted edges
// - placement: greedy, collision-avoiding attribute positions
//
// Only the placement step draws random numbers, from the caller's RNG.

mod graph;
mod placement;
mod ring;
mod selection;

pub use graph::{GraphNode, RelationGraph};
pub use placement::{OffsetRamp, PlacementParams, place_attributes, propose};
pub use ring::{ring_angle, ring_positions};
pub use selection::{entity_totals, select_top_entities};

use crate::model::{AssociationTable, GraphLayout, PlacedNode};
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No entities selected")]
    EmptySelection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    /// Radius of the entity ring.
    pub ring_radius: f64,
    pub placement: PlacementParams,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            ring_radius: 1.5,
            placement: PlacementParams::default(),
        }
    }
}

impl LayoutParams {
    /// Reject parameters that would stack nodes on top of each other.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.ring_radius > 0.0) {
            return Err(LayoutError::InvalidInput(format!(
                "ring_radius must be positive, got {}",
                self.ring_radius
            )));
        }
        if !(self.placement.min_separation > 0.0) {
            return Err(LayoutError::InvalidInput(format!(
                "min_separation must be positive, got {}",
                self.placement.min_separation
            )));
        }
        if self.placement.max_attempts == 0 {
            return Err(LayoutError::InvalidInput(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Lay out the top `k` entities of `table` and their attributes.
///
/// Callers are expected to clamp `k` to `[1, distinct entities]`; a larger
/// `k` simply selects every entity, while `k == 0` is rejected.
pub fn layout_graph<R: Rng>(
    table: &AssociationTable,
    k: usize,
    params: &LayoutParams,
    rng: &mut R,
) -> Result<GraphLayout, LayoutError> {
    params.validate()?;
    if k == 0 {
        return Err(LayoutError::EmptySelection);
    }

    let selected = select_top_entities(table, k);
    let graph = RelationGraph::build(table, &selected)?;
    if graph.entities().is_empty() {
        return Err(LayoutError::EmptySelection);
    }

    let ring = ring_positions(&selected, params.ring_radius);
    tracing::debug!(
        requested = k,
        entities = selected.len(),
        attributes = graph.attributes().len(),
        "laying out relation graph"
    );

    let attributes = place_attributes(&graph, &ring, &params.placement, rng);
    let entities = selected
        .iter()
        .zip(ring.iter())
        .map(|(label, &pos)| PlacedNode::entity(label.clone(), pos))
        .collect();

    Ok(GraphLayout {
        entities,
        attributes,
        edges: graph.edges(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeRole, Point};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn scenario_a() -> AssociationTable {
        [("E1", "A1", 5), ("E1", "A2", 3), ("E2", "A1", 2)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_scenario_a() {
        let mut rng = StdRng::seed_from_u64(11);
        let layout = layout_graph(&scenario_a(), 2, &LayoutParams::default(), &mut rng).unwrap();

        let e1 = layout.node(NodeRole::Entity, "E1").unwrap().position;
        let e2 = layout.node(NodeRole::Entity, "E2").unwrap().position;
        assert!(e1.distance(&Point::new(1.5, 0.0)) < 1e-9);
        assert!(e2.distance(&Point::new(-1.5, 0.0)) < 1e-9);

        let a1 = layout.node(NodeRole::Attribute, "A1").unwrap();
        assert_eq!(a1.connectivity, 2);
        let from_mid = a1.position.norm();
        assert!(from_mid > 0.15 - 1e-9 && from_mid < 0.25 + 1e-9, "A1 at {}", from_mid);

        let a2 = layout.node(NodeRole::Attribute, "A2").unwrap();
        assert_eq!(a2.connectivity, 1);
        let from_e1 = a2.position.distance(&e1);
        assert!(from_e1 > 0.25 - 1e-9 && from_e1 < 0.35 + 1e-9, "A2 at {}", from_e1);

        assert_eq!(layout.edges.len(), 3);
        assert!(layout.fully_resolved());
    }

    #[test]
    fn test_scenario_b_k_exceeds_entities() {
        let mut rng = StdRng::seed_from_u64(0);
        let layout = layout_graph(&scenario_a(), 5, &LayoutParams::default(), &mut rng).unwrap();
        assert_eq!(layout.entities.len(), 2);
    }

    #[test]
    fn test_scenario_d_empty_table() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = layout_graph(
            &AssociationTable::default(),
            3,
            &LayoutParams::default(),
            &mut rng,
        );
        assert!(matches!(result, Err(LayoutError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_k_is_empty_selection() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = layout_graph(&scenario_a(), 0, &LayoutParams::default(), &mut rng);
        assert_eq!(result, Err(LayoutError::EmptySelection));
    }

    #[test]
    fn test_degenerate_params_rejected() {
        let mut no_attempts = LayoutParams::default();
        no_attempts.placement.max_attempts = 0;
        let mut no_gap = LayoutParams::default();
        no_gap.placement.min_separation = 0.0;
        let flat_ring = LayoutParams {
            ring_radius: -1.0,
            ..Default::default()
        };

        for params in [no_attempts, no_gap, flat_ring] {
            let mut rng = StdRng::seed_from_u64(0);
            let result = layout_graph(&scenario_a(), 2, &params, &mut rng);
            assert!(matches!(result, Err(LayoutError::InvalidInput(_))), "{:?}", params);
        }
    }

    #[test]
    fn test_duplicate_huge_counts_do_not_overflow() {
        let table: AssociationTable = [("E1", "a", u64::MAX), ("E1", "a", 1), ("E2", "b", 4)]
            .into_iter()
            .collect();
        let mut rng = StdRng::seed_from_u64(0);
        let layout = layout_graph(&table, 1, &LayoutParams::default(), &mut rng).unwrap();

        assert_eq!(layout.entities[0].label, "E1");
        assert_eq!(layout.edges[0].weight, u64::MAX);
    }

    #[test]
    fn test_custom_radius() {
        let params = LayoutParams {
            ring_radius: 3.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let layout = layout_graph(&scenario_a(), 2, &params, &mut rng).unwrap();
        for e in &layout.entities {
            assert!((e.position.norm() - 3.0).abs() < 1e-9);
        }
    }
}
