mod loader;
mod prepare;

pub use loader::{
    ATTRIBUTE_COLUMN, COUNT_COLUMN, ENTITY_COLUMN, load_associations, parse_associations,
    read_associations,
};
pub use prepare::{PrepareOptions, default_stop_entities, prepare};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read association table: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Association table is missing the {0} column")]
    MissingColumn(String),
    #[error("Row {row}: count '{value}' is not a non-negative integer")]
    InvalidCount { row: usize, value: String },
}
