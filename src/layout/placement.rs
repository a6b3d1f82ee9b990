// Greedy attribute placement around the entity ring.
//
// Attributes are placed one at a time, most-connected first, and each accepted
// position becomes an obstacle for every later attribute. Results therefore
// depend on processing order; the order is part of the contract:
//
//   1. descending connectivity (entities linked)
//   2. graph construction order on ties
//
// Candidates:
// - shared attributes (connectivity > 1) orbit the shrunken centroid of their
//   entities at a random angle, with the orbit widening per attempt
// - single-entity attributes sweep a fixed fan of angles around their entity,
//   also widening per attempt
//
// A candidate is accepted when it is farther than `min_separation` from every
// occupied position. When the attempt budget runs out the last candidate is
// kept anyway and the node is flagged as unresolved.

use super::graph::RelationGraph;
use crate::model::{NodeRole, PlacedNode, Point};
use petgraph::graph::NodeIndex;
use rand::Rng;
use std::collections::HashMap;
use std::f64::consts::TAU;

/// Offset radius that grows linearly from `start` to `start + span` over the
/// attempt budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetRamp {
    pub start: f64,
    pub span: f64,
}

impl OffsetRamp {
    pub fn at(&self, attempt: usize, max_attempts: usize) -> f64 {
        self.start + self.span * attempt as f64 / max_attempts.max(1) as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacementParams {
    /// Pulls the centroid of shared attributes toward the origin.
    pub shrink_factor: f64,
    pub min_separation: f64,
    pub max_attempts: usize,
    /// Orbit radius around the centroid for shared attributes.
    pub shared_offset: OffsetRamp,
    /// Distance from the entity for single-entity attributes.
    pub single_offset: OffsetRamp,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            shrink_factor: 0.8,
            min_separation: 0.2,
            max_attempts: 50,
            shared_offset: OffsetRamp {
                start: 0.15,
                span: 0.1,
            },
            single_offset: OffsetRamp {
                start: 0.25,
                span: 0.1,
            },
        }
    }
}

/// Place every attribute node of `graph`.
///
/// `entity_positions` must hold one position per entity node in
/// `graph.entities()` order. Entity positions are treated as occupied from
/// the start. Returned nodes are in placement order.
pub fn place_attributes<R: Rng>(
    graph: &RelationGraph,
    entity_positions: &[Point],
    params: &PlacementParams,
    rng: &mut R,
) -> Vec<PlacedNode> {
    let positions: HashMap<NodeIndex, Point> = graph
        .entities()
        .iter()
        .copied()
        .zip(entity_positions.iter().copied())
        .collect();

    let mut order: Vec<(NodeIndex, Vec<NodeIndex>)> = graph
        .attributes()
        .iter()
        .map(|&attr| (attr, graph.connected_entities(attr)))
        .collect();
    // Stable: ties keep construction order.
    order.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    let mut occupied: Vec<Point> = entity_positions.to_vec();
    let mut placed = Vec::with_capacity(order.len());

    for (attr, connected) in order {
        let anchors: Vec<Point> = connected
            .iter()
            .filter_map(|e| positions.get(e).copied())
            .collect();
        if anchors.is_empty() {
            continue;
        }

        let (position, attempts, resolved) = find_position(&anchors, &occupied, params, rng);
        if !resolved {
            tracing::warn!(
                attribute = graph.label(attr),
                attempts,
                "no free position within attempt budget, keeping last candidate"
            );
        }

        occupied.push(position);
        placed.push(PlacedNode {
            label: graph.label(attr).to_string(),
            role: NodeRole::Attribute,
            position,
            connectivity: connected.len(),
            attempts,
            resolved,
        });
    }

    placed
}

/// Search for a free spot near `anchors`. Returns the position, the attempt
/// index it was accepted at (or the budget), and whether it was accepted.
fn find_position<R: Rng>(
    anchors: &[Point],
    occupied: &[Point],
    params: &PlacementParams,
    rng: &mut R,
) -> (Point, usize, bool) {
    let mut candidate = anchors[0];

    for attempt in 0..params.max_attempts {
        candidate = propose(anchors, attempt, params, rng);
        if is_free(&candidate, occupied, params.min_separation) {
            return (candidate, attempt, true);
        }
    }

    (candidate, params.max_attempts, false)
}

/// Candidate position for the given attempt.
pub fn propose<R: Rng>(
    anchors: &[Point],
    attempt: usize,
    params: &PlacementParams,
    rng: &mut R,
) -> Point {
    let budget = params.max_attempts.max(1);

    if anchors.len() > 1 {
        let center = Point::centroid(anchors)
            .unwrap_or(Point::ORIGIN)
            .scale(params.shrink_factor);
        let radius = params.shared_offset.at(attempt, budget);
        let angle = rng.random_range(0.0..TAU);
        center + Point::polar(radius, angle)
    } else {
        let radius = params.single_offset.at(attempt, budget);
        let angle = TAU * attempt as f64 / budget as f64;
        anchors[0] + Point::polar(radius, angle)
    }
}

fn is_free(candidate: &Point, occupied: &[Point], min_separation: f64) -> bool {
    occupied
        .iter()
        .all(|o| candidate.distance(o) > min_separation)
}
