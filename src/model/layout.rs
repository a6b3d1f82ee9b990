use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A position in layout units. The entity ring is centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from the origin in direction `angle` (radians).
    pub fn polar(radius: f64, angle: f64) -> Self {
        Self {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
        }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn scale(&self, factor: f64) -> Point {
        Point {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Arithmetic mean of `points`, or `None` for an empty slice.
    pub fn centroid(points: &[Point]) -> Option<Point> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point { x: sx / n, y: sy / n })
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Entity,
    Attribute,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRole::Entity => write!(f, "entity"),
            NodeRole::Attribute => write!(f, "attribute"),
        }
    }
}

/// A node with its final position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedNode {
    pub label: String,
    pub role: NodeRole,
    pub position: Point,
    /// Number of selected entities linked to this node (0 for entities).
    pub connectivity: usize,
    /// Attempt index at which the position was accepted. Equals the attempt
    /// budget when placement gave up.
    pub attempts: usize,
    /// False when the attempt budget ran out and the last candidate was kept.
    pub resolved: bool,
}

impl PlacedNode {
    pub fn entity(label: impl Into<String>, position: Point) -> Self {
        Self {
            label: label.into(),
            role: NodeRole::Entity,
            position,
            connectivity: 0,
            attempts: 0,
            resolved: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub entity: String,
    pub attribute: String,
    pub weight: u64,
}

/// Result of one layout run: the entity ring, the placed attributes, and the
/// weighted edges between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphLayout {
    /// Entities in selection order (descending total count).
    pub entities: Vec<PlacedNode>,
    /// Attributes in placement order (descending connectivity).
    pub attributes: Vec<PlacedNode>,
    pub edges: Vec<LayoutEdge>,
}

impl GraphLayout {
    pub fn nodes(&self) -> impl Iterator<Item = &PlacedNode> {
        self.entities.iter().chain(self.attributes.iter())
    }

    pub fn node(&self, role: NodeRole, label: &str) -> Option<&PlacedNode> {
        let pool = match role {
            NodeRole::Entity => &self.entities,
            NodeRole::Attribute => &self.attributes,
        };
        pool.iter().find(|n| n.label == label)
    }

    pub fn edges_for<'a>(&'a self, entity: &'a str) -> impl Iterator<Item = &'a LayoutEdge> + 'a {
        self.edges.iter().filter(move |e| e.entity == entity)
    }

    /// True when every attribute found a non-overlapping position.
    pub fn fully_resolved(&self) -> bool {
        self.attributes.iter().all(|n| n.resolved)
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &PlacedNode> {
        self.attributes.iter().filter(|n| !n.resolved)
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centroid() {
        let c = Point::centroid(&[Point::new(1.5, 0.0), Point::new(-1.5, 0.0)]).unwrap();
        assert!(c.norm() < 1e-12);
        assert!(Point::centroid(&[]).is_none());
    }

    #[test]
    fn test_polar_distance() {
        let p = Point::polar(2.0, std::f64::consts::FRAC_PI_2);
        assert!((p.distance(&Point::ORIGIN) - 2.0).abs() < 1e-12);
        assert!(p.x.abs() < 1e-12);
    }
}
