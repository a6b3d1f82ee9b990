//! Edge stroke widths and per-entity colours shared by the JSON and SVG output.

use crate::model::GraphLayout;
use std::collections::HashMap;
use std::f64::consts::PI;

/// Stroke width of an entity's heaviest edge.
pub const MAX_STROKE_WIDTH: f64 = 2.0;

pub const ENTITY_FILL: &str = "#e6f2ff";
pub const ATTRIBUTE_FILL: &str = "#F2F2F2";
pub const ENTITY_LABEL: &str = "#238dff";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Rainbow colormap (purple → red) sampled at `t` in `[0, 1]`.
pub fn rainbow(t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgb {
        r: channel((2.0 * t - 0.5).abs()),
        g: channel((t * PI).sin()),
        b: channel((t * PI / 2.0).cos()),
    }
}

/// Colour for entity `index` of `count`, spread evenly over the colormap.
pub fn entity_color(index: usize, count: usize) -> Rgb {
    if count <= 1 {
        return rainbow(0.0);
    }
    rainbow(index as f64 / (count - 1) as f64)
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStyle {
    pub width: f64,
    pub color: Rgb,
}

impl EdgeStyle {
    /// One style per edge of `layout`, in edge order.
    ///
    /// Widths are normalised per entity: each entity's heaviest edge gets
    /// `MAX_STROKE_WIDTH`, lighter ones scale linearly. Colours follow the
    /// entity's position in the selection.
    pub fn for_layout(layout: &GraphLayout) -> Vec<EdgeStyle> {
        let count = layout.entities.len();
        let index: HashMap<&str, usize> = layout
            .entities
            .iter()
            .enumerate()
            .map(|(i, e)| (e.label.as_str(), i))
            .collect();

        let mut max_weight: HashMap<&str, u64> = HashMap::new();
        for edge in &layout.edges {
            let slot = max_weight.entry(edge.entity.as_str()).or_insert(0);
            *slot = (*slot).max(edge.weight);
        }

        layout
            .edges
            .iter()
            .map(|edge| {
                let max = max_weight.get(edge.entity.as_str()).copied().unwrap_or(0);
                let width = if max == 0 {
                    0.0
                } else {
                    edge.weight as f64 / max as f64 * MAX_STROKE_WIDTH
                };
                let i = index.get(edge.entity.as_str()).copied().unwrap_or(0);
                EdgeStyle {
                    width,
                    color: entity_color(i, count),
                }
            })
            .collect()
    }
}
