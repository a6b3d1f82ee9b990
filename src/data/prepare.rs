use crate::model::{Association, AssociationTable};
use std::collections::{HashMap, HashSet};

/// How a raw association export is cleaned before layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PrepareOptions {
    /// Entity labels to drop entirely (exact match).
    pub stop_entities: Vec<String>,
    /// Pairs must have a count strictly greater than this to survive.
    pub min_count: u64,
    /// Keep only the heaviest attributes of each entity.
    pub max_attributes_per_entity: Option<usize>,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            stop_entities: default_stop_entities(),
            min_count: 2,
            max_attributes_per_entity: Some(8),
        }
    }
}

/// Subject pronouns that entity extraction tends to pick up.
pub fn default_stop_entities() -> Vec<String> {
    ["i", "you", "she", "he", "it", "we", "they"]
        .iter()
        .flat_map(|p| [p.to_string(), capitalize(p)])
        .collect()
}

/// Clean a raw table: drop stop-listed entities, sum duplicate pairs, drop
/// light pairs, then cap attributes per entity. Row order of first appearance
/// is preserved throughout.
pub fn prepare(table: &AssociationTable, options: &PrepareOptions) -> AssociationTable {
    let stop: HashSet<&str> = options.stop_entities.iter().map(String::as_str).collect();

    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut merged: Vec<Association> = Vec::new();
    for row in table.rows() {
        if stop.contains(row.entity.as_str()) {
            continue;
        }
        let key = (row.entity.as_str(), row.attribute.as_str());
        match index.get(&key) {
            Some(&i) => merged[i].count = merged[i].count.saturating_add(row.count),
            None => {
                index.insert(key, merged.len());
                merged.push(row.clone());
            }
        }
    }

    merged.retain(|row| row.count > options.min_count);

    if let Some(cap) = options.max_attributes_per_entity {
        let keep = heaviest_per_entity(&merged, cap);
        merged = merged
            .into_iter()
            .enumerate()
            .filter(|(i, _)| keep.contains(i))
            .map(|(_, row)| row)
            .collect();
    }

    tracing::debug!(
        input = table.len(),
        output = merged.len(),
        "prepared association table"
    );

    AssociationTable::new(merged)
}

/// Row indices of the `cap` heaviest attributes of every entity.
fn heaviest_per_entity(rows: &[Association], cap: usize) -> HashSet<usize> {
    let mut by_entity: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, row) in rows.iter().enumerate() {
        by_entity.entry(row.entity.as_str()).or_default().push(i);
    }

    by_entity
        .into_values()
        .flat_map(|mut indices| {
            indices.sort_by(|&a, &b| rows[b].count.cmp(&rows[a].count));
            indices.truncate(cap);
            indices
        })
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}
