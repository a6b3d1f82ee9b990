use super::style::{ATTRIBUTE_FILL, ENTITY_FILL, ENTITY_LABEL, EdgeStyle};
use crate::model::{GraphLayout, NodeRole, Point};
use crate::output::OutputFormatter;
use std::collections::HashMap;
use std::io::Write;

/// Node radii and font sizes are given for a 900px canvas and scaled with it.
const REFERENCE_SIZE: f64 = 900.0;
const ENTITY_RADIUS: f64 = 28.0;
const ATTRIBUTE_RADIUS: f64 = 18.0;
const ENTITY_FONT: f64 = 13.0;
const ATTRIBUTE_FONT: f64 = 10.0;

/// Standalone SVG drawing of a layout.
pub struct SvgOutput {
    /// The drawing shows `[-extent, extent]` on both axes.
    pub extent: f64,
    /// Width and height in pixels.
    pub size: u32,
}

impl SvgOutput {
    pub fn new(extent: f64, size: u32) -> Self {
        Self { extent, size }
    }

    fn scale(&self) -> f64 {
        self.size as f64 / REFERENCE_SIZE
    }

    /// Layout units to pixels, with y pointing up.
    fn project(&self, p: Point) -> (f64, f64) {
        let size = self.size as f64;
        let extent = if self.extent > 0.0 { self.extent } else { 2.0 };
        let x = (p.x + extent) / (2.0 * extent) * size;
        let y = (extent - p.y) / (2.0 * extent) * size;
        (x, y)
    }
}

impl Default for SvgOutput {
    fn default() -> Self {
        Self::new(2.0, 900)
    }
}

impl OutputFormatter for SvgOutput {
    fn format<W: Write>(&self, layout: &GraphLayout, writer: &mut W) -> std::io::Result<()> {
        let size = self.size;
        let scale = self.scale();

        writeln!(
            writer,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}" font-family="sans-serif">"#
        )?;
        writeln!(writer, r#"  <rect width="100%" height="100%" fill="white"/>"#)?;

        let positions: HashMap<(NodeRole, &str), Point> = layout
            .nodes()
            .map(|n| ((n.role, n.label.as_str()), n.position))
            .collect();

        writeln!(writer, r#"  <g class="edges" stroke-opacity="0.7" stroke-linecap="round">"#)?;
        for (edge, style) in layout.edges.iter().zip(EdgeStyle::for_layout(layout)) {
            let from = positions.get(&(NodeRole::Entity, edge.entity.as_str()));
            let to = positions.get(&(NodeRole::Attribute, edge.attribute.as_str()));
            let (Some(&from), Some(&to)) = (from, to) else {
                continue;
            };
            let (x1, y1) = self.project(from);
            let (x2, y2) = self.project(to);
            writeln!(
                writer,
                r#"    <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}"><title>{} – {}: {}</title></line>"#,
                x1,
                y1,
                x2,
                y2,
                style.color.hex(),
                style.width * scale,
                escape(&edge.entity),
                escape(&edge.attribute),
                edge.weight
            )?;
        }
        writeln!(writer, "  </g>")?;

        writeln!(writer, r#"  <g class="nodes">"#)?;
        for node in &layout.entities {
            let (x, y) = self.project(node.position);
            writeln!(
                writer,
                r#"    <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
                x,
                y,
                ENTITY_RADIUS * scale,
                ENTITY_FILL
            )?;
        }
        for node in &layout.attributes {
            let (x, y) = self.project(node.position);
            writeln!(
                writer,
                r#"    <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" fill-opacity="0.7"/>"#,
                x,
                y,
                ATTRIBUTE_RADIUS * scale,
                ATTRIBUTE_FILL
            )?;
        }
        writeln!(writer, "  </g>")?;

        writeln!(
            writer,
            r#"  <g class="labels" text-anchor="middle" dominant-baseline="central">"#
        )?;
        for node in &layout.entities {
            let (x, y) = self.project(node.position);
            writeln!(
                writer,
                r#"    <text x="{:.2}" y="{:.2}" font-size="{:.1}" font-weight="600" fill="{}">{}</text>"#,
                x,
                y,
                ENTITY_FONT * scale,
                ENTITY_LABEL,
                escape(&node.label)
            )?;
        }
        for node in &layout.attributes {
            let (x, y) = self.project(node.position);
            writeln!(
                writer,
                r#"    <text x="{:.2}" y="{:.2}" font-size="{:.1}" fill="black">{}</text>"#,
                x,
                y,
                ATTRIBUTE_FONT * scale,
                escape(&node.label)
            )?;
        }
        writeln!(writer, "  </g>")?;

        writeln!(writer, "</svg>")
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
