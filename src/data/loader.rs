use super::DataError;
use crate::model::{Association, AssociationTable};
use std::io::Read;
use std::path::Path;

pub const ENTITY_COLUMN: &str = "ENTITY";
pub const ATTRIBUTE_COLUMN: &str = "ATTRIBUTE";
pub const COUNT_COLUMN: &str = "COUNT";

/// Read an association table from CSV text with a header row.
///
/// The `ENTITY`, `ATTRIBUTE` and `COUNT` columns are located by name
/// (case-insensitive) and may appear in any order; other columns are ignored.
pub fn parse_associations(content: &str) -> Result<AssociationTable, DataError> {
    read_associations(content.as_bytes())
}

pub fn load_associations(path: &Path) -> Result<AssociationTable, DataError> {
    let file = std::fs::File::open(path)?;
    read_associations(file)
}

pub fn read_associations<R: Read>(reader: R) -> Result<AssociationTable, DataError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| -> Result<usize, DataError> {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    };
    let entity_col = column(ENTITY_COLUMN)?;
    let attribute_col = column(ATTRIBUTE_COLUMN)?;
    let count_col = column(COUNT_COLUMN)?;

    let mut table = AssociationTable::default();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let raw_count = field(count_col);
        let count = parse_count(raw_count).ok_or_else(|| DataError::InvalidCount {
            row: i + 1,
            value: raw_count.to_string(),
        })?;

        table.push(Association::new(field(entity_col), field(attribute_col), count));
    }

    Ok(table)
}

/// Counts are usually integers but exports sometimes write them as floats
/// ("3.0"); accept whole non-negative floats too.
fn parse_count(raw: &str) -> Option<u64> {
    if let Ok(n) = raw.parse::<u64>() {
        return Some(n);
    }
    let f = raw.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 {
        Some(f as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_table() {
        let csv = "ENTITY,ATTRIBUTE,COUNT\nStaff,friendly,4\nCoffee,hot,3\n";
        let table = parse_associations(csv).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0], Association::new("Staff", "friendly", 4));
    }

    #[test]
    fn test_columns_any_order_and_case() {
        let csv = "count,extra,attribute,entity\n7,x,clean,Room\n";
        let table = parse_associations(csv).unwrap();
        assert_eq!(table.rows()[0], Association::new("Room", "clean", 7));
    }

    #[test]
    fn test_missing_column_is_named() {
        let csv = "ENTITY,COUNT\nStaff,4\n";
        match parse_associations(csv) {
            Err(DataError::MissingColumn(name)) => assert_eq!(name, "ATTRIBUTE"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_float_counts_accepted() {
        let csv = "ENTITY,ATTRIBUTE,COUNT\nStaff,friendly,3.0\n";
        assert_eq!(parse_associations(csv).unwrap().rows()[0].count, 3);
    }

    #[test]
    fn test_bad_count_reports_row() {
        let csv = "ENTITY,ATTRIBUTE,COUNT\nStaff,friendly,4\nStaff,rude,lots\n";
        match parse_associations(csv) {
            Err(DataError::InvalidCount { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "lots");
            }
            other => panic!("expected InvalidCount, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_is_empty() {
        let table = parse_associations("ENTITY,ATTRIBUTE,COUNT\n").unwrap();
        assert!(table.is_empty());
    }
}
