use crate::layout::ring_angle;
use crate::model::GraphLayout;
use crate::output::OutputFormatter;
use std::collections::HashMap;
use std::io::Write;

/// Human-readable summary of a layout run.
pub struct MarkdownOutput {
    pub title: String,
}

impl MarkdownOutput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl OutputFormatter for MarkdownOutput {
    fn format<W: Write>(&self, layout: &GraphLayout, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "# Entity–Attribute Relations: {}\n", self.title)?;

        if layout.is_empty() {
            writeln!(writer, "No entities to display.")?;
            return Ok(());
        }

        let mut linked: HashMap<&str, Vec<&str>> = HashMap::new();
        for edge in &layout.edges {
            linked
                .entry(edge.attribute.as_str())
                .or_default()
                .push(edge.entity.as_str());
        }

        writeln!(writer, "## Entities\n")?;
        writeln!(writer, "| # | Entity | Mentions | Attributes | Angle |")?;
        writeln!(writer, "|---|--------|----------|------------|-------|")?;
        let k = layout.entities.len();
        for (i, entity) in layout.entities.iter().enumerate() {
            let (total, attrs) = layout
                .edges_for(&entity.label)
                .fold((0u64, 0usize), |(total, attrs), edge| {
                    (total.saturating_add(edge.weight), attrs + 1)
                });
            writeln!(
                writer,
                "| {} | {} | {} | {} | {:.0}° |",
                i + 1,
                entity.label,
                total,
                attrs,
                ring_angle(i, k).to_degrees()
            )?;
        }

        writeln!(writer, "\n## Attributes\n")?;
        writeln!(writer, "| Attribute | Entities | Position | Attempts |")?;
        writeln!(writer, "|-----------|----------|----------|----------|")?;
        for attr in &layout.attributes {
            let entities = linked
                .get(attr.label.as_str())
                .map(|v| v.join(", "))
                .unwrap_or_default();
            writeln!(
                writer,
                "| {} | {} | ({:.2}, {:.2}) | {} |",
                attr.label, entities, attr.position.x, attr.position.y, attr.attempts
            )?;
        }

        let unresolved: Vec<_> = layout.unresolved().collect();
        if unresolved.is_empty() {
            writeln!(writer, "\nAll attributes placed without overlap.")?;
        } else {
            writeln!(writer, "\n## Crowded Placements\n")?;
            writeln!(
                writer,
                "These attributes ran out of placement attempts and may overlap other nodes:\n"
            )?;
            for node in unresolved {
                writeln!(writer, "- `{}`", node.label)?;
            }
        }

        Ok(())
    }
}
