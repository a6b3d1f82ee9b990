mod init;
mod layout;
mod render;

pub use init::{cmd_init, cmd_init_with_fs};
pub use layout::{cmd_layout, cmd_layout_with_fs};
pub use render::{cmd_render, cmd_render_with_fs};

use crate::api::{self, LayoutOptions};
use crate::cli::SourceArgs;
use crate::config::Config;
use crate::data;
use crate::fs::FileSystem;
use crate::model::GraphLayout;
use crate::style;
use std::path::Path;

/// State shared by the commands: the effective configuration.
pub struct CommandContext {
    pub config: Config,
}

impl CommandContext {
    /// Load the configuration. An explicitly named file must load; the
    /// implicit `./.relmap.toml` falls back to defaults with a warning.
    /// Returns Err(exit_code) if setup fails.
    pub fn new(config_path: Option<&Path>) -> Result<Self, i32> {
        let config = match config_path {
            Some(path) => match Config::load_file(path) {
                Ok(config) => config,
                Err(e) => {
                    style::error(&format!("{} ({})", e, style::path(path)));
                    return Err(1);
                }
            },
            None => Config::load(Path::new(".")).unwrap_or_else(|e| {
                style::warning(&format!("Failed to load config: {}. Using defaults.", e));
                Config::default()
            }),
        };

        Ok(Self { config })
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Read, clean and lay out the association table named by `source`.
    pub fn compute_layout(&self, source: &SourceArgs, fs: &dyn FileSystem) -> Result<GraphLayout, i32> {
        let content = match fs.read_to_string(&source.input) {
            Ok(content) => content,
            Err(e) => {
                style::error(&format!(
                    "Could not read {}: {}",
                    style::path(&source.input),
                    e
                ));
                return Err(1);
            }
        };

        let mut table = match data::parse_associations(&content) {
            Ok(table) => table,
            Err(e) => {
                style::error(&e.to_string());
                style::hint("expected a header row with ENTITY, ATTRIBUTE and COUNT columns");
                return Err(1);
            }
        };

        if !source.raw {
            table = data::prepare(&table, &self.config.prepare);
        }

        if table.is_empty() {
            style::error("No associations left to display.");
            if !source.raw {
                style::hint("lower [prepare] min_count in .relmap.toml or pass --raw");
            }
            return Err(1);
        }

        let defaults = LayoutOptions::from(&self.config);
        let options = LayoutOptions {
            entities: source.entities.unwrap_or(defaults.entities),
            seed: source.seed,
            prepare: None,
            ..defaults
        };

        let layout = match api::layout(&table, &options) {
            Ok(layout) => layout,
            Err(e) => {
                style::error(&e.to_string());
                return Err(1);
            }
        };

        let crowded = layout.unresolved().count();
        if crowded > 0 {
            style::warning(&format!(
                "{} attribute(s) could not be placed without overlap",
                crowded
            ));
        }

        Ok(layout)
    }
}
