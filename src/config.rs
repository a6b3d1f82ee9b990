use crate::data::{PrepareOptions, default_stop_entities};
use crate::layout::{LayoutError, LayoutParams, PlacementParams};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".relmap.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub layout: LayoutSettings,
    pub prepare: PrepareOptions,
    pub render: RenderSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSettings {
    pub params: LayoutParams,
    /// Entities shown when no count is requested.
    pub default_entities: usize,
    /// Upper bound for the requested entity count.
    pub max_entities: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// Half-width of the drawn square, in layout units.
    pub extent: f64,
    /// Output size of the SVG in pixels.
    pub size: u32,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    layout: Option<RawLayout>,
    prepare: Option<RawPrepare>,
    render: Option<RawRender>,
}

#[derive(Debug, Deserialize)]
struct RawLayout {
    ring_radius: Option<f64>,
    min_separation: Option<f64>,
    max_attempts: Option<usize>,
    shrink_factor: Option<f64>,
    default_entities: Option<usize>,
    max_entities: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawPrepare {
    min_count: Option<u64>,
    max_attributes_per_entity: Option<usize>,
    stop_entities: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawRender {
    extent: Option<f64>,
    size: Option<u32>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            params: LayoutParams::default(),
            default_entities: 5,
            max_entities: 10,
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            extent: 2.0,
            size: 900,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: LayoutSettings::default(),
            prepare: PrepareOptions::default(),
            render: RenderSettings::default(),
        }
    }
}

impl Config {
    /// Load `.relmap.toml` from `dir`, or defaults when it does not exist.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_file(&config_path)
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;

        let layout_defaults = LayoutSettings::default();
        let placement_defaults = PlacementParams::default();
        let layout = match raw.layout {
            Some(l) => LayoutSettings {
                params: LayoutParams {
                    ring_radius: l.ring_radius.unwrap_or(layout_defaults.params.ring_radius),
                    placement: PlacementParams {
                        shrink_factor: l.shrink_factor.unwrap_or(placement_defaults.shrink_factor),
                        min_separation: l
                            .min_separation
                            .unwrap_or(placement_defaults.min_separation),
                        max_attempts: l.max_attempts.unwrap_or(placement_defaults.max_attempts),
                        ..placement_defaults
                    },
                },
                default_entities: l.default_entities.unwrap_or(layout_defaults.default_entities),
                max_entities: l.max_entities.unwrap_or(layout_defaults.max_entities),
            },
            None => layout_defaults,
        };

        let prepare = match raw.prepare {
            Some(p) => PrepareOptions {
                min_count: p.min_count.unwrap_or(2),
                max_attributes_per_entity: match p.max_attributes_per_entity {
                    Some(0) => None,
                    Some(n) => Some(n),
                    None => Some(8),
                },
                stop_entities: p.stop_entities.unwrap_or_else(default_stop_entities),
            },
            None => PrepareOptions::default(),
        };

        let render = match raw.render {
            Some(r) => RenderSettings {
                extent: r.extent.unwrap_or(2.0),
                size: r.size.unwrap_or(900),
            },
            None => RenderSettings::default(),
        };

        layout.params.validate().map_err(|e| match e {
            LayoutError::InvalidInput(msg) => ConfigError::Invalid(msg),
            other => ConfigError::Invalid(other.to_string()),
        })?;
        if !(render.extent > 0.0) || render.size == 0 {
            return Err(ConfigError::Invalid(
                "[render] extent and size must be positive".to_string(),
            ));
        }

        Ok(Self {
            layout,
            prepare,
            render,
        })
    }
}

/// Commented starter configuration written by `relmap init`.
pub fn generate_config_template() -> String {
    r#"# relmap configuration
# Every key is optional; missing keys use the defaults shown here.

[layout]
# Radius of the entity ring, in layout units.
ring_radius = 1.5
# Minimum distance between any two nodes.
min_separation = 0.2
# Placement tries per attribute before accepting an overlapping spot.
max_attempts = 50
# Pulls attributes shared by several entities toward the centre.
shrink_factor = 0.8
# Entities shown when -k is not given, and the largest -k accepted.
default_entities = 5
max_entities = 10

[prepare]
# Keep pairs mentioned more than this many times.
min_count = 2
# Heaviest attributes kept per entity (0 keeps all).
max_attributes_per_entity = 8
# Entity labels to ignore.
# stop_entities = ["i", "I", "you", "You", "she", "She", "he", "He", "it", "It", "we", "We", "they", "They"]

[render]
# The SVG shows [-extent, extent] on both axes.
extent = 2.0
# SVG width and height in pixels.
size = 900
"#
    .to_string()
}
