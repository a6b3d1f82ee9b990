pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod data;
pub mod fs;
pub mod layout;
pub mod model;
pub mod output;
pub mod style;

pub use api::{LayoutOptions, RelmapError, layout, layout_csv};
pub use cli::Cli;
pub use commands::{CommandContext, cmd_init, cmd_layout, cmd_render};
pub use config::Config;
pub use layout::{LayoutError, LayoutParams, PlacementParams, layout_graph};
pub use model::{Association, AssociationTable, GraphLayout, NodeRole, PlacedNode, Point};
