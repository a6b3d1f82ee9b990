use crate::cli::{LayoutArgs, OutputFormat};
use crate::fs::{FileSystem, default_fs};
use crate::output::{JsonOutput, MarkdownOutput, render_to_string};
use crate::style;
use std::io::{self, Write};

use super::CommandContext;

pub fn cmd_layout(args: LayoutArgs, ctx: &CommandContext) -> i32 {
    cmd_layout_with_fs(args, ctx, default_fs())
}

pub fn cmd_layout_with_fs(args: LayoutArgs, ctx: &CommandContext, fs: &dyn FileSystem) -> i32 {
    let layout = match ctx.compute_layout(&args.source, fs) {
        Ok(layout) => layout,
        Err(code) => return code,
    };

    let formatted = match args.format {
        OutputFormat::Json => {
            let formatter = if args.compact {
                JsonOutput::compact()
            } else {
                JsonOutput::new()
            };
            render_to_string(&formatter, &layout)
        }
        OutputFormat::Markdown => {
            let title = args
                .source
                .input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("associations");
            render_to_string(&MarkdownOutput::new(title), &layout)
        }
    };

    let text = match formatted {
        Ok(text) => text,
        Err(e) => {
            style::error(&format!("Failed to format output: {}", e));
            return 1;
        }
    };

    if let Some(path) = &args.output {
        if let Err(e) = fs.write(path, &text) {
            style::error(&format!("Failed to write output: {}", e));
            return 1;
        }
        style::success(&format!("Layout written to: {}", style::path(path)));
        return 0;
    }

    let mut stdout = io::stdout();
    let write_result = match args.format {
        OutputFormat::Markdown => style::render_markdown(&text, &mut stdout),
        OutputFormat::Json => write!(stdout, "{}", text),
    };

    if let Err(e) = write_result {
        style::error(&format!("Failed to write output: {}", e));
        return 1;
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SourceArgs;
    use crate::config::Config;
    use crate::fs::mock::MockFs;
    use std::path::{Path, PathBuf};

    const CSV: &str = "ENTITY,ATTRIBUTE,COUNT\nStaff,friendly,6\nStaff,slow,3\nCoffee,strong,5\nCoffee,friendly,4\n";

    fn args(output: &str) -> LayoutArgs {
        LayoutArgs {
            source: SourceArgs {
                input: PathBuf::from("/data/attributes.csv"),
                entities: Some(2),
                seed: Some(9),
                raw: false,
            },
            format: OutputFormat::Json,
            output: Some(PathBuf::from(output)),
            compact: false,
        }
    }

    #[test]
    fn test_layout_writes_json() {
        let fs = MockFs::new().with_file("/data/attributes.csv", CSV);
        let ctx = CommandContext::with_config(Config::default());

        assert_eq!(cmd_layout_with_fs(args("/out/layout.json"), &ctx, &fs), 0);

        let written = fs.get(Path::new("/out/layout.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["metadata"]["entity_count"], 2);
        assert_eq!(value["metadata"]["attribute_count"], 3);
    }

    #[test]
    fn test_layout_markdown_to_file() {
        let fs = MockFs::new().with_file("/data/attributes.csv", CSV);
        let ctx = CommandContext::with_config(Config::default());
        let mut a = args("/out/summary.md");
        a.format = OutputFormat::Markdown;

        assert_eq!(cmd_layout_with_fs(a, &ctx, &fs), 0);
        let written = fs.get(Path::new("/out/summary.md")).unwrap();
        assert!(written.starts_with("# Entity–Attribute Relations: attributes"));
    }

    #[test]
    fn test_missing_input_fails() {
        let fs = MockFs::new();
        let ctx = CommandContext::with_config(Config::default());
        assert_eq!(cmd_layout_with_fs(args("/out/layout.json"), &ctx, &fs), 1);
    }

    #[test]
    fn test_everything_filtered_fails() {
        let fs = MockFs::new().with_file("/data/attributes.csv", "ENTITY,ATTRIBUTE,COUNT\nStaff,ok,1\n");
        let ctx = CommandContext::with_config(Config::default());
        assert_eq!(cmd_layout_with_fs(args("/out/layout.json"), &ctx, &fs), 1);
        assert!(!fs.exists(Path::new("/out/layout.json")));
    }
}
