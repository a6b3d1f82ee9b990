mod json;
mod markdown;
pub mod style;
mod svg;

pub use json::JsonOutput;
pub use markdown::MarkdownOutput;
pub use style::EdgeStyle;
pub use svg::SvgOutput;

use crate::model::GraphLayout;
use std::io::Write;

pub trait OutputFormatter {
    fn format<W: Write>(&self, layout: &GraphLayout, writer: &mut W) -> std::io::Result<()>;
}

/// Format `layout` into a string.
pub fn render_to_string<F: OutputFormatter>(
    formatter: &F,
    layout: &GraphLayout,
) -> std::io::Result<String> {
    let mut buffer = Vec::new();
    formatter.format(layout, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
