use crate::cli::RenderArgs;
use crate::fs::{FileSystem, default_fs};
use crate::output::{SvgOutput, render_to_string};
use crate::style;

use super::CommandContext;

pub fn cmd_render(args: RenderArgs, ctx: &CommandContext) -> i32 {
    cmd_render_with_fs(args, ctx, default_fs())
}

pub fn cmd_render_with_fs(args: RenderArgs, ctx: &CommandContext, fs: &dyn FileSystem) -> i32 {
    let layout = match ctx.compute_layout(&args.source, fs) {
        Ok(layout) => layout,
        Err(code) => return code,
    };

    let render = &ctx.config.render;
    let svg = SvgOutput::new(render.extent, args.size.unwrap_or(render.size));
    let text = match render_to_string(&svg, &layout) {
        Ok(text) => text,
        Err(e) => {
            style::error(&format!("Failed to render SVG: {}", e));
            return 1;
        }
    };

    if let Err(e) = fs.write(&args.output, &text) {
        style::error(&format!("Failed to write SVG: {}", e));
        return 1;
    }

    style::success(&format!("Graph drawn to: {}", style::path(&args.output)));
    style::section("Summary");
    println!("{}", style::metric("Entities", layout.entities.len()));
    println!("{}", style::metric("Attributes", layout.attributes.len()));
    println!("{}", style::metric("Edges", layout.edges.len()));

    if args.open {
        if let Err(e) = open::that(&args.output) {
            style::warning(&format!("Could not open viewer: {}", e));
        }
    }

    0
}
