//! Library entry points.
//!
//! These wrap the layout pipeline with table preparation, entity-count
//! clamping and RNG setup, and return `Result`s instead of exit codes.
//!
//! # Example
//!
//! ```no_run
//! use relmap::{LayoutOptions, layout_csv};
//! use std::path::Path;
//!
//! let layout = layout_csv(Path::new("attributes.csv"), &LayoutOptions {
//!     entities: 5,
//!     seed: Some(7),
//!     ..Default::default()
//! })?;
//! for node in &layout.entities {
//!     println!("{} at ({:.2}, {:.2})", node.label, node.position.x, node.position.y);
//! }
//! # Ok::<(), relmap::RelmapError>(())
//! ```

use crate::config::{Config, ConfigError};
use crate::data::{self, DataError, PrepareOptions};
use crate::layout::{self, LayoutError, LayoutParams};
use crate::model::{AssociationTable, GraphLayout};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelmapError {
    /// The association CSV does not exist.
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// The table is empty, malformed, or the layout parameters are unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No entity was selected for layout.
    #[error("No entities left to display")]
    EmptySelection,

    /// `.relmap.toml` could not be read, parsed or validated.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reading the association CSV failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<LayoutError> for RelmapError {
    fn from(e: LayoutError) -> Self {
        match e {
            LayoutError::InvalidInput(msg) => RelmapError::InvalidInput(msg),
            LayoutError::EmptySelection => RelmapError::EmptySelection,
        }
    }
}

impl From<DataError> for RelmapError {
    fn from(e: DataError) -> Self {
        match e {
            DataError::Io(io) => RelmapError::Io(io),
            other => RelmapError::InvalidInput(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Requested entity count; clamped to `[1, min(max_entities, available)]`.
    pub entities: usize,

    /// Upper bound for `entities`.
    pub max_entities: usize,

    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    pub params: LayoutParams,

    /// Table cleaning; `None` uses the table as given.
    pub prepare: Option<PrepareOptions>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            entities: 5,
            max_entities: 10,
            seed: None,
            params: LayoutParams::default(),
            prepare: Some(PrepareOptions::default()),
        }
    }
}

impl From<&Config> for LayoutOptions {
    fn from(config: &Config) -> Self {
        Self {
            entities: config.layout.default_entities,
            max_entities: config.layout.max_entities,
            seed: None,
            params: config.layout.params.clone(),
            prepare: Some(config.prepare.clone()),
        }
    }
}

impl LayoutOptions {
    /// Options from the `.relmap.toml` in `dir`, or defaults when there is none.
    pub fn load(dir: &Path) -> Result<Self, RelmapError> {
        let config = Config::load(dir)?;
        Ok(Self::from(&config))
    }
}

/// Clamp a requested entity count to what the table can show.
/// Returns 0 only when there are no entities at all.
pub fn clamp_entity_count(requested: usize, max_entities: usize, available: usize) -> usize {
    if available == 0 {
        return 0;
    }
    requested.clamp(1, max_entities.max(1).min(available))
}

/// Prepare `table` and lay out its top entities.
///
/// # Example
///
/// ```
/// use relmap::{AssociationTable, LayoutOptions, layout};
///
/// let table: AssociationTable = [("E1", "A1", 5), ("E1", "A2", 3), ("E2", "A1", 2)]
///     .into_iter()
///     .collect();
/// let result = layout(&table, &LayoutOptions {
///     entities: 2,
///     seed: Some(1),
///     prepare: None,
///     ..Default::default()
/// })?;
/// assert_eq!(result.entities.len(), 2);
/// assert_eq!(result.attributes.len(), 2);
/// # Ok::<(), relmap::RelmapError>(())
/// ```
pub fn layout(table: &AssociationTable, options: &LayoutOptions) -> Result<GraphLayout, RelmapError> {
    let prepared;
    let table = match &options.prepare {
        Some(prepare) => {
            prepared = data::prepare(table, prepare);
            &prepared
        }
        None => table,
    };

    if table.is_empty() {
        return Err(RelmapError::InvalidInput(
            "association table has no rows".to_string(),
        ));
    }

    let available = table.distinct_entities().len();
    let k = clamp_entity_count(options.entities, options.max_entities, available);

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    Ok(layout::layout_graph(table, k, &options.params, &mut rng)?)
}

/// Load an association CSV and lay it out.
pub fn layout_csv(path: &Path, options: &LayoutOptions) -> Result<GraphLayout, RelmapError> {
    if !path.exists() {
        return Err(RelmapError::InputNotFound(path.to_path_buf()));
    }
    let table = data::load_associations(path)?;
    layout(&table, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_entity_count() {
        assert_eq!(clamp_entity_count(5, 10, 2), 2);
        assert_eq!(clamp_entity_count(0, 10, 4), 1);
        assert_eq!(clamp_entity_count(25, 10, 40), 10);
        assert_eq!(clamp_entity_count(3, 10, 0), 0);
    }

    #[test]
    fn test_layout_prepares_by_default() {
        // Only Staff survives the > 2 threshold.
        let table: AssociationTable = [("Staff", "kind", 5), ("Room", "cold", 1), ("It", "fine", 9)]
            .into_iter()
            .collect();
        let result = layout(
            &table,
            &LayoutOptions {
                seed: Some(3),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(result.entities.len(), 1);
        assert_eq!(result.entities[0].label, "Staff");
    }

    #[test]
    fn test_options_follow_config() {
        let config =
            Config::from_toml("[layout]\ndefault_entities = 3\n[prepare]\nmin_count = 0\n")
                .unwrap();
        let options = LayoutOptions::from(&config);

        assert_eq!(options.entities, 3);
        assert_eq!(options.max_entities, 10);
        assert_eq!(options.prepare.map(|p| p.min_count), Some(0));
    }

    #[test]
    fn test_load_reports_bad_config() {
        let dir = std::env::temp_dir().join(format!("relmap-api-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(".relmap.toml"), "[layout]\nmax_attempts = 0\n").unwrap();

        let result = LayoutOptions::load(&dir);
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(matches!(result, Err(RelmapError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn test_everything_filtered_is_invalid_input() {
        let table: AssociationTable = [("Room", "cold", 1)].into_iter().collect();
        let err = layout(&table, &LayoutOptions::default()).unwrap_err();
        assert!(matches!(err, RelmapError::InvalidInput(_)));
    }
}
